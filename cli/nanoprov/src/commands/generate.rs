//! Generate command.

use anyhow::Result;
use clap::Args;
use nanoprov_id::{generate, Alphabet};
use tracing::debug;

use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Generate identifiers without creating a managed resource.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Symbols to draw from. Defaults to the URL-safe 64-symbol set.
    #[arg(long)]
    alphabet: Option<String>,

    /// Number of symbols per identifier (1-64).
    #[arg(long, default_value_t = 21, allow_negative_numbers = true)]
    length: i64,

    /// How many identifiers to print.
    #[arg(long, default_value_t = 1)]
    count: usize,
}

impl GenerateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let alphabet = match self.alphabet.as_deref() {
            Some(symbols) => Alphabet::new(symbols)?,
            None => Alphabet::standard(),
        };

        debug!(
            alphabet_size = alphabet.len(),
            length = self.length,
            count = self.count,
            "Generating identifiers"
        );

        let ids = (0..self.count)
            .map(|_| generate(&alphabet, self.length))
            .collect::<Result<Vec<_>, _>>()?;

        match ctx.format {
            OutputFormat::Json => print_single(&ids),
            OutputFormat::Table => {
                for id in &ids {
                    println!("{}", id);
                }
            }
        }

        Ok(())
    }
}
