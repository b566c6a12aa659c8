//! Control-channel answer and tabular result set.

use crate::config;
use crate::models::{SubnetId, UtilizationResult};
use crate::processing::Report;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Command completed.
pub const CONTROL_RESULT_SUCCESS: i32 = 0;
/// Command failed.
pub const CONTROL_RESULT_ERROR: i32 = 1;
/// Command name not recognised.
pub const CONTROL_RESULT_COMMAND_UNSUPPORTED: i32 = 2;

/// One `[subnet-id, free-addresses]` row.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Row(pub SubnetId, pub i64);

impl From<&UtilizationResult> for Row {
    fn from(result: &UtilizationResult) -> Row {
        Row(result.subnet_id, result.free)
    }
}

/// Timestamped table with named columns.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub timestamp: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS.ffffff`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

impl ResultSet {
    pub fn new(columns: &[&str], at: DateTime<Utc>) -> ResultSet {
        ResultSet {
            timestamp: format_timestamp(at),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Free-address rows of a report, stamped with `at`.
    pub fn from_report(report: &Report, at: DateTime<Utc>) -> ResultSet {
        let mut result_set = ResultSet::new(&config::COLUMN_LABELS, at);
        result_set.rows = report.rows.iter().map(Row::from).collect();
        result_set
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Arguments {
    pub result_set: ResultSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_subnets: Vec<SubnetId>,
}

/// Response envelope returned to the caller of a command.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub result: i32,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
}

impl Answer {
    pub fn success(report: &Report, at: DateTime<Utc>) -> Answer {
        Answer {
            result: CONTROL_RESULT_SUCCESS,
            text: "Ok".to_string(),
            arguments: Some(Arguments {
                result_set: ResultSet::from_report(report, at),
                skipped_subnets: report.skipped.clone(),
            }),
        }
    }

    pub fn error(result: i32, text: impl Into<String>) -> Answer {
        Answer {
            result,
            text: text.into(),
            arguments: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == CONTROL_RESULT_SUCCESS
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 5).unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(at()), "2026-10-18 09:30:05.000000");
    }

    #[test]
    fn test_success_json() {
        let report = Report {
            rows: vec![
                UtilizationResult {
                    subnet_id: SubnetId(1),
                    free: 96,
                },
                UtilizationResult {
                    subnet_id: SubnetId(2),
                    free: -1,
                },
            ],
            skipped: vec![],
        };
        let answer = Answer::success(&report, at());
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "result": 0,
                "text": "Ok",
                "arguments": {
                    "result-set": {
                        "timestamp": "2026-10-18 09:30:05.000000",
                        "columns": ["subnet-id", "free-addresses"],
                        "rows": [[1, 96], [2, -1]]
                    }
                }
            })
        );
    }

    #[test]
    fn test_success_lists_skipped() {
        let report = Report {
            rows: vec![],
            skipped: vec![SubnetId(4)],
        };
        let value = serde_json::to_value(Answer::success(&report, at())).unwrap();
        assert_eq!(value["arguments"]["skipped-subnets"], serde_json::json!([4]));
        assert_eq!(value["arguments"]["result-set"]["rows"], serde_json::json!([]));
    }

    #[test]
    fn test_error_json() {
        let answer = Answer::error(CONTROL_RESULT_ERROR, "boom");
        assert!(!answer.is_success());
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value, serde_json::json!({"result": 1, "text": "boom"}));
    }
}
