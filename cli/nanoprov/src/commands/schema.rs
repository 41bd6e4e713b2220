//! Schema command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::output::{print_output, print_single, OutputFormat, SchemaRow};

use super::CommandContext;

/// Show the schema of one resource, or of all of them.
#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: Option<String>,
}

impl SchemaCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let mut schemas = ctx.provider.schemas();

        if let Some(name) = &self.resource {
            // Surface the provider's own unknown-resource error.
            ctx.resource(name)?;
            schemas.retain(|type_name, _| type_name == name);
        }

        match ctx.format {
            OutputFormat::Json => print_single(&schemas),
            OutputFormat::Table => {
                for (type_name, schema) in &schemas {
                    println!("{} {}", type_name.bold(), schema.description.dimmed());
                    print_output(&SchemaRow::rows(schema), ctx.format);
                    println!();
                }
            }
        }

        Ok(())
    }
}
