//! Output rendering: pretty JSON or terse text lines.

use serde::Serialize;

use crate::cli::OutputFormat;

/// Print a serializable response in the requested format.
///
/// Text mode prints compact one-line-per-item output for arrays and a
/// key-per-line rendering for objects; JSON mode prints pretty JSON.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            let value = serde_json::to_value(value)?;
            print_text(&value);
        }
    }
    Ok(())
}

fn print_text(value: &serde_json::Value) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                println!("{}", line_for(item));
            }
        }
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                println!("{key}: {}", line_for(val));
            }
        }
        scalar => println!("{}", line_for(scalar)),
    }
}

fn line_for(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}={}", line_for(v)))
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}
