//! Output formatting for free-address results.
//!
//! This module handles formatting and outputting command answers:
//! - [`result_set`] - Answer envelope and timestamped result set, as JSON
//! - [`terminal`] - Terminal table output with colors

mod result_set;
mod terminal;

use crate::config::ENV_OUTPUT;
use crate::error::{Error, Result};
use std::str::FromStr;

pub use result_set::{
    format_timestamp, Answer, Arguments, ResultSet, Row, CONTROL_RESULT_COMMAND_UNSUPPORTED,
    CONTROL_RESULT_ERROR, CONTROL_RESULT_SUCCESS,
};
pub use terminal::{format_answer, format_field, format_row, print_answer};

/// How the binary renders an answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(Error::InvalidConfig {
                key: ENV_OUTPUT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}
