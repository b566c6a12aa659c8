//! Command dispatch for the control channel.

use super::{ensure_process, free_addresses, MissingCapacityPolicy, Report};
use crate::config;
use crate::error::{Error, Result};
use crate::output::{Answer, CONTROL_RESULT_COMMAND_UNSUPPORTED, CONTROL_RESULT_ERROR};
use crate::source::ServerState;
use chrono::{DateTime, Utc};

/// Run a named command after checking the hosting daemon.
pub fn run_command<S>(
    command: &str,
    process_name: &str,
    state: &S,
    policy: MissingCapacityPolicy,
) -> Result<Report>
where
    S: ServerState + ?Sized,
{
    ensure_process(process_name, config::EXPECTED_PROCESS)?;
    match command.trim() {
        config::COMMAND_NAME => free_addresses(state, policy),
        other => Err(Error::UnknownCommand(other.to_string())),
    }
}

/// Run a command and wrap the outcome in an [`Answer`] stamped now.
pub fn handle_command<S>(
    command: &str,
    process_name: &str,
    state: &S,
    policy: MissingCapacityPolicy,
) -> Answer
where
    S: ServerState + ?Sized,
{
    handle_command_at(command, process_name, state, policy, Utc::now())
}

pub fn handle_command_at<S>(
    command: &str,
    process_name: &str,
    state: &S,
    policy: MissingCapacityPolicy,
    at: DateTime<Utc>,
) -> Answer
where
    S: ServerState + ?Sized,
{
    log::debug!("handle_command({command}) in {process_name}");
    match run_command(command, process_name, state, policy) {
        Ok(report) => Answer::success(&report, at),
        Err(e @ Error::UnknownCommand(_)) => {
            log::warn!("{e}");
            Answer::error(CONTROL_RESULT_COMMAND_UNSUPPORTED, e.to_string())
        }
        Err(e) => {
            log::error!("{command} failed: {e}");
            Answer::error(CONTROL_RESULT_ERROR, e.to_string())
        }
    }
}
