//! CLI tool for driving a sharded remote-cache coordinator.
//!
//! Provides subcommands for the full client-facing verb surface: key
//! operations (get/put/add/delete/nodeSize) and fleet-wide operations
//! (ping/flush/getSysMetrics/getAppMetrics).

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
