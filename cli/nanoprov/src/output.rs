//! Output formatting for CLI commands.

use std::str::FromStr;

use clap::ValueEnum;
use colored::Colorize;
use nanoprov_provider::Schema;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!("unknown output format '{other}'")),
        }
    }
}

/// Print data in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", format_json(data, "[]")),
    }
}

/// Print a single item. Documents are JSON in either format.
pub fn print_single<T: Serialize>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

/// One schema attribute as a table row.
#[derive(Debug, Serialize, Tabled)]
pub struct SchemaRow {
    #[tabled(rename = "ATTRIBUTE")]
    pub attribute: String,
    #[tabled(rename = "TYPE")]
    pub kind: String,
    #[tabled(rename = "MODE")]
    pub mode: String,
    #[tabled(rename = "DEFAULT")]
    pub default: String,
    #[tabled(rename = "REPLACE")]
    pub replace: String,
}

impl SchemaRow {
    pub fn rows(schema: &Schema) -> Vec<Self> {
        schema
            .attributes
            .iter()
            .map(|attr| {
                let mode = match (attr.optional, attr.computed) {
                    (true, true) => "optional, computed",
                    (true, false) => "optional",
                    (false, true) => "computed",
                    (false, false) => "required",
                };
                let replace = match attr.replace {
                    Some(trigger) => serde_json::to_value(trigger)
                        .ok()
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_else(|| "yes".to_string()),
                    None => "-".to_string(),
                };
                let default = match &attr.default {
                    Some(serde_json::Value::String(s)) if s.chars().count() > 16 => {
                        let head: String = s.chars().take(16).collect();
                        format!("{head}...")
                    }
                    Some(value) => value.to_string(),
                    None => "-".to_string(),
                };

                Self {
                    attribute: attr.name.to_string(),
                    kind: attr.kind.to_string(),
                    mode: mode.to_string(),
                    default,
                    replace,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoprov_provider::NanoidProvider;

    #[test]
    fn test_schema_rows_describe_every_attribute() {
        let schemas = NanoidProvider::default().schemas();
        let rows = SchemaRow::rows(&schemas["nanoid_dns"]);

        let names: Vec<_> = rows.iter().map(|r| r.attribute.as_str()).collect();
        assert!(names.contains(&"id"));
        assert!(names.contains(&"length"));
        assert!(names.contains(&"keepers"));

        let id = rows.iter().find(|r| r.attribute == "id").unwrap();
        assert_eq!(id.mode, "computed");
        assert_eq!(id.replace, "-");

        let length = rows.iter().find(|r| r.attribute == "length").unwrap();
        assert_eq!(length.default, "10");
    }

    #[test]
    fn test_long_defaults_are_abbreviated() {
        let schemas = NanoidProvider::default().schemas();
        let rows = SchemaRow::rows(&schemas["nanoid_id"]);
        let alphabet = rows.iter().find(|r| r.attribute == "alphabet").unwrap();
        assert!(alphabet.default.ends_with("..."));
    }
}
