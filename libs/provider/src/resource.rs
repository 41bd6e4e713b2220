//! The resource interface the orchestrating caller drives.

use nanoprov_reconcile::PlanAction;
use serde::Serialize;
use serde_json::Value;

use crate::{ProviderError, ResourceData, Schema};

/// Input to the plan step.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    /// State recorded by the last apply, or `None` if the resource does not exist yet.
    pub prior: Option<&'a Value>,

    /// Configuration as written by the user; unset attributes are absent or `null`.
    pub config: &'a Value,
}

/// Result of the plan step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResponse {
    pub action: PlanAction,

    /// Attributes whose change forces replacement.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires_replace: Vec<String>,

    /// Planned state. Computed attributes not yet known are `null`.
    pub planned: Value,
}

/// A managed resource type.
///
/// Every call is independent: a resource holds no per-instance state, so one
/// value may serve many instances concurrently.
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `nanoid_id` for provider `nanoid`.
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    /// Accept provider data. `None` means the provider is not configured yet.
    fn configure(&mut self, data: Option<&dyn ResourceData>) -> Result<(), ProviderError>;

    /// Resolve defaults, validate, and decide what applying would do.
    fn plan(&self, request: PlanRequest<'_>) -> Result<PlanResponse, ProviderError>;

    /// Create a new instance from configuration (or a plan) and return its state.
    fn create(&self, config: &Value) -> Result<Value, ProviderError>;

    /// Refresh an instance's state.
    fn read(&self, state: &Value) -> Result<Value, ProviderError>;

    /// Apply an in-place change.
    fn update(&self, prior: &Value, planned: &Value) -> Result<Value, ProviderError>;

    /// Destroy an instance.
    fn delete(&self, state: &Value) -> Result<(), ProviderError>;

    /// Adopt an existing identifier into management.
    fn import(&self, id: &str) -> Result<Value, ProviderError>;
}
