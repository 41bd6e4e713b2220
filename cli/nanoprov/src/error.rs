//! Error handling and display for the CLI.

use colored::Colorize;
use nanoprov_provider::{Diagnostic, ProviderError, Severity};
use thiserror::Error;

use crate::output::OutputFormat;

/// CLI-specific errors. Provider failures travel as [`ProviderError`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid JSON document from {origin}: {source}")]
    Document {
        origin: String,
        source: serde_json::Error,
    },
}

impl CliError {
    pub fn document(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Document {
            origin: origin.into(),
            source,
        }
    }
}

/// Print an error in a user-friendly format.
///
/// Provider failures are shown as diagnostics; in JSON mode they are
/// written as a `{"diagnostics": [...]}` document.
pub fn print_error(err: &anyhow::Error, format: OutputFormat) {
    if let Some(provider_err) = err.downcast_ref::<ProviderError>() {
        let diagnostic = Diagnostic::from(provider_err);
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&serde_json::json!({
                    "diagnostics": [&diagnostic]
                }))
                .unwrap_or_else(|_| diagnostic.detail.clone());
                eprintln!("{}", json);
            }
            OutputFormat::Table => print_diagnostic(&diagnostic),
        }
        return;
    }

    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(CliError::Document { .. }) = err.downcast_ref::<CliError>() {
        eprintln!(
            "\n{}",
            "Hint: pass inline JSON, @path to a file, or - to read stdin.".yellow()
        );
    }
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let label = match diagnostic.severity {
        Severity::Error => "Error:".red().bold(),
    };

    eprintln!("{} {}", label, diagnostic.summary);
    if let Some(attribute) = &diagnostic.attribute {
        eprintln!("  {} {}", "attribute:".dimmed(), attribute);
    }
    eprintln!("\n{}", diagnostic.detail);
}
