//! Lifecycle commands: plan, create, read, update, delete, import.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nanoprov_provider::{PlanAction, PlanRequest, PlanResponse};
use serde_json::Value;

use crate::input::load_document;
use crate::output::{print_info, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Decide what applying a configuration would do.
#[derive(Debug, Args)]
pub struct PlanCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: String,

    /// Configuration document.
    #[arg(long)]
    config: String,

    /// Prior state document. Omit when the instance does not exist yet.
    #[arg(long)]
    state: Option<String>,
}

impl PlanCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let resource = ctx.resource(&self.resource)?;
        let config = load_document(&self.config)?;
        let prior = self.state.as_deref().map(load_document).transpose()?;

        let response = resource.plan(PlanRequest {
            prior: prior.as_ref(),
            config: &config,
        })?;

        match ctx.format {
            OutputFormat::Json => print_single(&response),
            OutputFormat::Table => print_plan(&self.resource, &response),
        }

        Ok(())
    }
}

fn print_plan(type_name: &str, response: &PlanResponse) {
    let action = response.action.to_string();
    let action = match response.action {
        PlanAction::Create => action.green().bold(),
        PlanAction::NoOp => action.dimmed(),
        PlanAction::Update => action.yellow().bold(),
        PlanAction::Replace => action.red().bold(),
    };
    println!("{} {}", type_name.bold(), action);

    if !response.requires_replace.is_empty() {
        println!(
            "  {} {}",
            "forces replacement:".dimmed(),
            response.requires_replace.join(", ")
        );
    }

    print_single(&response.planned);
}

/// Create a new instance and print its state.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: String,

    /// Configuration or planned-state document.
    #[arg(long)]
    config: String,
}

impl CreateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let resource = ctx.resource(&self.resource)?;
        let config = load_document(&self.config)?;

        let state = resource.create(&config)?;
        print_single(&state);
        Ok(())
    }
}

/// Refresh an instance's state.
#[derive(Debug, Args)]
pub struct ReadCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: String,

    /// Current state document.
    #[arg(long)]
    state: String,
}

impl ReadCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let resource = ctx.resource(&self.resource)?;
        let state = load_document(&self.state)?;

        print_single(&resource.read(&state)?);
        Ok(())
    }
}

/// Apply an in-place change to an instance.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: String,

    /// Current state document.
    #[arg(long)]
    state: String,

    /// Planned state document, as printed by `plan`.
    #[arg(long)]
    planned: String,
}

impl UpdateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let resource = ctx.resource(&self.resource)?;
        let prior = load_document(&self.state)?;
        let planned = planned_state(load_document(&self.planned)?);

        print_single(&resource.update(&prior, &planned)?);
        Ok(())
    }
}

/// Accept either a bare planned state or the full `plan --format json` output.
fn planned_state(doc: Value) -> Value {
    match doc {
        Value::Object(mut map) if map.contains_key("action") && map.contains_key("planned") => {
            map.remove("planned").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Destroy an instance.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: String,

    /// Current state document.
    #[arg(long)]
    state: String,
}

impl DeleteCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let resource = ctx.resource(&self.resource)?;
        let state = load_document(&self.state)?;

        resource.delete(&state)?;

        if let OutputFormat::Table = ctx.format {
            let id = state.get("id").and_then(Value::as_str).unwrap_or("-");
            print_success(&format!("Removed {} {} from management", self.resource, id));
        }

        Ok(())
    }
}

/// Adopt an existing identifier.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Full resource type name, e.g. nanoid_id.
    resource: String,

    /// The identifier to adopt.
    id: String,
}

impl ImportCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let resource = ctx.resource(&self.resource)?;
        let state = resource.import(&self.id)?;

        if let OutputFormat::Table = ctx.format {
            print_info("Imported; the next plan adopts the configured settings.");
        }
        print_single(&state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_planned_state_unwraps_plan_output() {
        let plan = json!({"action": "update", "planned": {"id": "abc", "length": 3}});
        assert_eq!(planned_state(plan), json!({"id": "abc", "length": 3}));
    }

    #[test]
    fn test_planned_state_passes_bare_state_through() {
        let state = json!({"id": "abc", "length": 3});
        assert_eq!(planned_state(state.clone()), state);
    }
}
