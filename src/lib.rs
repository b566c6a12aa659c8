//! Free-address reporting for DHCPv4 subnets.
//!
//! For every configured subnet the `free-addresses` command reports the
//! pool capacity minus the addresses held by in-pool host reservations or
//! active leases, counting an address that is both reserved and leased once.

pub mod config;
mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod source;

pub use config::Config;
pub use error::{Error, Result};
pub use output::Answer;
pub use processing::{free_addresses, handle_command, reconcile, MissingCapacityPolicy, Report};
pub use source::{read_snapshot, ServerState, Snapshot};

/// Load the configured snapshot and answer the configured command.
pub async fn run(config: &Config) -> Result<Answer> {
    log::info!("Reading snapshot file: {}", config.snapshot.display());
    let json = tokio::fs::read_to_string(&config.snapshot).await?;
    let mut snapshot = Snapshot::from_json(&json)?;
    Ok(answer_snapshot(config, &mut snapshot))
}

/// Answer the configured command against an already loaded snapshot.
pub fn answer_snapshot(config: &Config, snapshot: &mut Snapshot) -> Answer {
    if config.derive_capacity {
        if let Err(e) = snapshot.derive_missing_capacity() {
            log::error!("deriving capacity failed: {e}");
            return Answer::error(output::CONTROL_RESULT_ERROR, e.to_string());
        }
    }
    handle_command(
        &config.command,
        snapshot.process(),
        &*snapshot,
        config.on_missing_capacity,
    )
}
