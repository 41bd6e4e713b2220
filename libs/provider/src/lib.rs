//! # nanoprov-provider
//!
//! Declarative identifier resources for an infrastructure orchestrator.
//!
//! Two resource types are registered under the `nanoid` provider:
//!
//! - `nanoid_id`: random identifiers over a configurable alphabet
//!   (default 64 URL-safe symbols, length 21)
//! - `nanoid_dns`: lower-case alphanumeric identifiers safe for DNS labels
//!   (length 10)
//!
//! ## Lifecycle
//!
//! The orchestrator owns state and drives every transition:
//!
//! - `plan` resolves defaults, validates bounds and decides between create,
//!   no-op, in-place update and replace
//! - `create` generates the identifier, exactly once per instance
//! - `read`, `update` and `delete` never regenerate it
//! - `import` adopts an existing identifier without regenerating it
//!
//! Changing `alphabet`, `length`, or configured `keepers` always plans a
//! replacement.

mod data;
mod error;
pub mod lifecycle;
mod provider;
mod resource;
pub mod resources;
pub mod schema;

pub use data::{ProviderData, ResourceData};
pub use error::{Diagnostic, ProviderError, Severity};
pub use lifecycle::{IdentifierResource, IdentifierState};
pub use provider::NanoidProvider;
pub use resource::{PlanRequest, PlanResponse, Resource};
pub use schema::Schema;

/// Re-export for callers inspecting plan results.
pub use nanoprov_reconcile::PlanAction;
