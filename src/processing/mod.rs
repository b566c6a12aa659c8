//! Free-address processing logic.
//!
//! This module contains the business logic of the `free-addresses` command:
//! - [`reconcile`] - Free addresses of one subnet
//! - [`free_addresses`] - Iteration over all subnets
//! - [`command`] - Command dispatch and answer building

mod command;
mod free_addresses;
mod reconcile;

// Re-export public functions
pub use command::{handle_command, handle_command_at, run_command};
pub use free_addresses::{ensure_process, free_addresses, MissingCapacityPolicy, Report};
pub use reconcile::reconcile;
