//! The provider: resource registry and configure step.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::resources::RESOURCES;
use crate::{ProviderData, ProviderError, Resource, ResourceData, Schema};

/// Provider configuration. The provider takes no settings today; unknown
/// keys are rejected rather than ignored.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderModel {}

/// Generates unique resource identifiers.
#[derive(Debug, Clone)]
pub struct NanoidProvider {
    /// "dev" for local builds, the release version otherwise.
    version: String,
}

impl NanoidProvider {
    /// Type name prefix of every resource.
    pub const TYPE_NAME: &'static str = "nanoid";

    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Validate provider configuration and produce the data resources receive.
    pub fn configure(&self, config: &Value) -> Result<ProviderData, ProviderError> {
        if !config.is_null() {
            ProviderModel::deserialize(config)
                .map_err(|e| ProviderError::validation("provider", e.to_string()))?;
        }

        debug!(version = %self.version, "Provider configured");

        Ok(ProviderData {
            version: self.version.clone(),
        })
    }

    /// Full type names of every registered resource.
    pub fn resource_types(&self) -> Vec<String> {
        RESOURCES
            .iter()
            .map(|factory| factory().type_name(Self::TYPE_NAME))
            .collect()
    }

    /// Build and configure the resource registered under `type_name`.
    pub fn resource(
        &self,
        type_name: &str,
        data: Option<&ProviderData>,
    ) -> Result<Box<dyn Resource>, ProviderError> {
        let mut resource = RESOURCES
            .iter()
            .map(|factory| factory())
            .find(|r| r.type_name(Self::TYPE_NAME) == type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))?;

        resource.configure(data.map(|d| d as &dyn ResourceData))?;
        Ok(resource)
    }

    /// Schemas of every registered resource, keyed by full type name.
    pub fn schemas(&self) -> BTreeMap<String, Schema> {
        RESOURCES
            .iter()
            .map(|factory| {
                let resource = factory();
                (resource.type_name(Self::TYPE_NAME), resource.schema())
            })
            .collect()
    }
}

impl Default for NanoidProvider {
    fn default() -> Self {
        Self::new("dev")
    }
}
