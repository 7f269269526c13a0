//! Command-line surface: argument parsing and process wiring around the
//! coordinator. `CliConfig` owns everything clap needs to build a
//! [`corelib::CoordinatorConfig`] plus the subcommand to run.

use crate::commands::Command;
use anyhow::Context;
use clap::Parser;
use corelib::config::{DEFAULT_REPLICAS, DEFAULT_REVIVE_INTERVAL_SECS};
use corelib::{Coordinator, CoordinatorConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shardcache", version, about = "Client coordinator for a sharded remote cache fleet")]
pub struct CliConfig {
    /// Path to a newline-delimited file of initial cluster node addresses.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use HTTPS instead of plain HTTP when talking to backend nodes.
    /// Unset, the coordinator talks HTTP, matching the original default.
    #[arg(long, global = true)]
    pub https: bool,

    /// Port backend nodes listen on.
    #[arg(long, global = true, default_value = "11200")]
    pub port: String,

    /// Number of virtual points per node on the ring.
    #[arg(long, global = true, default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Seconds between background revive passes over dead nodes.
    #[arg(long, global = true, default_value_t = DEFAULT_REVIVE_INTERVAL_SECS)]
    pub revive_interval: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();

        let mut coordinator_config = CoordinatorConfig::new(self.config.clone(), !self.https, self.port.clone());
        coordinator_config.replicas = self.replicas;
        coordinator_config.revive_interval_secs = self.revive_interval;

        let coordinator = Coordinator::from_config(coordinator_config)
            .context("failed to initialize coordinator from cluster configuration")?;

        let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
        runtime.block_on(async {
            coordinator.spawn_reviver();
            self.command.run(&coordinator).await
        })
    }
}
