//! Subcommands exposed on the CLI, one per coordinator verb.

use clap::Subcommand;
use corelib::transport::HttpTransport;
use corelib::Coordinator;
use serde_json::Value;

pub type CommandResult = anyhow::Result<()>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a value by key.
    Get { key: String },
    /// Store a value at a key, overwriting any existing value.
    Put {
        key: String,
        /// Value to store, parsed as JSON (falls back to a JSON string).
        value: String,
        /// Time-to-live in seconds; -1 means no expiry.
        #[arg(long, default_value_t = -1)]
        ttl: i64,
    },
    /// Store a value at a key only if the key does not already exist.
    Add {
        key: String,
        value: String,
        #[arg(long, default_value_t = -1)]
        ttl: i64,
    },
    /// Remove a key.
    Delete { key: String },
    /// Query the on-disk/in-memory size reported for the node associated
    /// with the given IP (routed by hashing the IP itself as a key).
    NodeSize { ip: String },
    /// Ping every live node in the fleet.
    Ping,
    /// Flush every live node's cache.
    Flush,
    /// Collect system metrics from every live node.
    SysMetrics,
    /// Collect application metrics from every live node.
    AppMetrics,
}

impl Command {
    pub async fn run(&self, coordinator: &Coordinator<HttpTransport>) -> CommandResult {
        match self {
            Command::Get { key } => {
                let resp = coordinator.get(key).await?;
                println!("{}", serde_json::to_string_pretty(&resp.gobj)?);
            }
            Command::Put { key, value, ttl } => {
                let resp = coordinator.put(key, parse_value(value), *ttl).await?;
                print_status(&resp.message, resp.is_success());
            }
            Command::Add { key, value, ttl } => {
                let resp = coordinator.add(key, parse_value(value), *ttl).await?;
                print_status(&resp.message, resp.is_success());
            }
            Command::Delete { key } => {
                let resp = coordinator.delete(key).await?;
                print_status(&resp.message, resp.is_success());
            }
            Command::NodeSize { ip } => {
                let resp = coordinator.node_size(ip).await?;
                println!("{}", serde_json::to_string_pretty(&resp.gobj)?);
            }
            Command::Ping => print_fan_out(&coordinator.ping().await?),
            Command::Flush => print_fan_out(&coordinator.flush().await?),
            Command::SysMetrics => print_fan_out(&coordinator.get_sys_metrics().await?),
            Command::AppMetrics => print_fan_out(&coordinator.get_app_metrics().await?),
        }
        Ok(())
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn print_status(message: &str, ok: bool) {
    if ok {
        println!("ok: {message}");
    } else {
        eprintln!("error: {message}");
    }
}

fn print_fan_out(results: &[corelib::coordinator::NodeMetric]) {
    for metric in results {
        println!("{}: {}", metric.node_id, metric.response.message);
    }
}
