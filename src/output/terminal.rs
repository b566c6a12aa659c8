//! Terminal output utilities.
//!
//! Renders an [`Answer`] as a right-aligned table.

use super::result_set::{Answer, Row};
use colored::Colorize;

const SUBNET_ID_WIDTH: usize = 12;
const FREE_WIDTH: usize = 18;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// A single table row without colour.
pub fn format_row(row: &Row) -> String {
    format!(
        "{subnet_id},{free}",
        subnet_id = format_field(row.0, SUBNET_ID_WIDTH),
        free = format_field(row.1, FREE_WIDTH)
    )
}

/// Table lines for an answer, header first.
pub fn format_answer(answer: &Answer) -> Vec<String> {
    let Some(arguments) = &answer.arguments else {
        return vec![format!("result={} {}", answer.result, answer.text)];
    };
    let result_set = &arguments.result_set;

    let mut lines = Vec::with_capacity(result_set.rows.len() + 2);
    let widths = [SUBNET_ID_WIDTH, FREE_WIDTH];
    lines.push(
        result_set
            .columns
            .iter()
            .zip(widths)
            .map(|(c, w)| format_field(c, w))
            .collect::<Vec<String>>()
            .join(","),
    );
    lines.extend(result_set.rows.iter().map(format_row));
    lines.push(format!("# {} at {}", answer.text, result_set.timestamp));
    lines
}

/// Print an answer as a table to stdout.
pub fn print_answer(answer: &Answer) {
    let Some(arguments) = &answer.arguments else {
        println!(
            "{} result={} {}",
            "ERROR".on_red(),
            answer.result,
            answer.text
        );
        return;
    };

    let lines = format_answer(answer);
    for (i, line) in lines.iter().enumerate() {
        // lines[1..=rows] are data rows
        let negative = i > 0
            && arguments
                .result_set
                .rows
                .get(i - 1)
                .is_some_and(|row| row.1 < 0);
        if negative {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }

    for subnet_id in &arguments.skipped_subnets {
        println!(
            "#{}# subnet {subnet_id} skipped: no total-addresses recorded",
            "NOTE".on_red()
        );
    }
}
