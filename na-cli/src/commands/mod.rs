//! CLI command implementations.

pub mod bgp;
pub mod catalog;
pub mod jobs;
pub mod servers;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::Value;

use na_api::NodeDriver;
use na_core::config::ApiConfig;
use na_core::constants;
use na_core::error::{NaError, NaResult};

use crate::OutputFormat;

/// Helper to create a driver from config.
pub fn create_driver(config: &ApiConfig) -> NaResult<NodeDriver> {
    if !config.is_configured() {
        return Err(NaError::MissingConfig(format!(
            "no API key; set {} or api.key in the config file",
            constants::API_KEY_ENV
        )));
    }
    NodeDriver::from_config(config)
}

/// Print an API result in the requested format.
///
/// Text output renders a list of objects as a table, an object as
/// key/value lines, and anything else as-is.
pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        }
        OutputFormat::Text => match value {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                println!("{}", object_table(items, &[]));
            }
            Value::Array(items) if items.is_empty() => println!("No results."),
            Value::Object(map) => {
                let width = map.keys().map(String::len).max().unwrap_or(0);
                for (key, value) in map {
                    println!("  {key:<width$}  {}", cell(value));
                }
            }
            other => println!("{}", cell(other)),
        },
    }
}

/// Build a table from a list of objects.
///
/// `columns` picks and orders the columns; when empty, the keys of the
/// first row are used.
pub fn object_table(rows: &[Value], columns: &[&str]) -> Table {
    let columns: Vec<String> = if columns.is_empty() {
        rows.first()
            .and_then(Value::as_object)
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        columns.iter().map(|c| c.to_string()).collect()
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(columns.clone());

    for row in rows {
        table.add_row(
            columns
                .iter()
                .map(|c| row.get(c).map(cell).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Render a JSON value for a table cell.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => truncate(&value.to_string(), 60),
        other => other.to_string(),
    }
}

/// Truncate a string to a maximum length, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
