//! CLI commands.

mod generate;
mod resource;
mod schema;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nanoprov_provider::{NanoidProvider, ProviderData, Resource};
use serde_json::Value;

use crate::config::Config;
use crate::input::load_document;
use crate::output::OutputFormat;

/// nanoprov - generate and manage nanoid identifiers.
#[derive(Debug, Parser)]
#[command(name = "nanoprov")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Overrides the configured default.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Provider configuration document (inline JSON, @path, or -).
    #[arg(long, global = true)]
    provider_config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show resource schemas.
    Schema(schema::SchemaCommand),

    /// Generate identifiers without managing them.
    Generate(generate::GenerateCommand),

    /// Decide what applying a configuration would do.
    Plan(resource::PlanCommand),

    /// Create a new instance and print its state.
    Create(resource::CreateCommand),

    /// Refresh an instance's state.
    Read(resource::ReadCommand),

    /// Apply an in-place change to an instance.
    Update(resource::UpdateCommand),

    /// Destroy an instance.
    Delete(resource::DeleteCommand),

    /// Adopt an existing identifier.
    Import(resource::ImportCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Output format requested on the command line, if any.
    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }

    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let format = self.format.unwrap_or(config.output);

        let provider = NanoidProvider::new(env!("CARGO_PKG_VERSION"));
        let provider_config = match self.provider_config.as_deref() {
            Some(arg) => load_document(arg)?,
            None => Value::Null,
        };
        let data = provider.configure(&provider_config)?;

        let ctx = CommandContext {
            format,
            provider,
            data,
        };

        match self.command {
            Commands::Schema(cmd) => cmd.run(ctx),
            Commands::Generate(cmd) => cmd.run(ctx),
            Commands::Plan(cmd) => cmd.run(ctx),
            Commands::Create(cmd) => cmd.run(ctx),
            Commands::Read(cmd) => cmd.run(ctx),
            Commands::Update(cmd) => cmd.run(ctx),
            Commands::Delete(cmd) => cmd.run(ctx),
            Commands::Import(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("nanoprov {}", ctx.provider.version());
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
    pub provider: NanoidProvider,
    pub data: ProviderData,
}

impl CommandContext {
    /// Load a configured resource by full type name.
    pub fn resource(&self, type_name: &str) -> Result<Box<dyn Resource>> {
        Ok(self.provider.resource(type_name, Some(&self.data))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_flag_is_global() {
        let cli = Cli::parse_from(["nanoprov", "import", "nanoid_id", "abc", "--format", "json"]);
        assert_eq!(cli.format(), Some(OutputFormat::Json));

        let cli = Cli::parse_from(["nanoprov", "version"]);
        assert_eq!(cli.format(), None);
    }

    #[test]
    fn test_provider_config_is_validated() {
        let cli = Cli::parse_from([
            "nanoprov",
            "--provider-config",
            r#"{"seed": 1}"#,
            "version",
        ]);
        let err = cli.run(Config::default()).unwrap_err();
        assert!(err
            .downcast_ref::<nanoprov_provider::ProviderError>()
            .is_some_and(|e| e.is_validation()));
    }
}
