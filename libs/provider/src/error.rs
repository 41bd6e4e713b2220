//! Error types and structured diagnostics.

use nanoprov_id::GenerationError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by provider and resource operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An attribute value is outside its declared bounds or has the wrong shape.
    #[error("invalid value for attribute '{attribute}': {message}")]
    Validation { attribute: String, message: String },

    /// The random source could not produce an identifier.
    #[error("failed to generate id: {0}")]
    Generation(#[from] GenerationError),

    /// A resource was configured with data of a foreign type.
    #[error("unexpected resource configure type: expected {expected}, got: {received}")]
    UnexpectedConfigureType {
        expected: &'static str,
        received: &'static str,
    },

    /// No resource is registered under this type name.
    #[error("unknown resource type: {0}")]
    UnknownResource(String),

    /// A state document could not be decoded.
    #[error("invalid state document: {0}")]
    State(#[from] serde_json::Error),
}

impl ProviderError {
    /// Create a validation error for an attribute.
    pub fn validation(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Returns true if the caller supplied out-of-bounds input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if the random source failed.
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    /// Name of the offending attribute, when there is one.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Validation { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// A structured diagnostic, as returned to the orchestrating caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    /// Attach the attribute path this diagnostic refers to.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

impl From<&ProviderError> for Diagnostic {
    fn from(err: &ProviderError) -> Self {
        match err {
            ProviderError::Validation { attribute, message } => {
                Diagnostic::error("Invalid attribute value", message.clone())
                    .with_attribute(attribute.clone())
            }
            ProviderError::Generation(e) => {
                Diagnostic::error("Failed to generate id", format!("Failed to generate id: {e}."))
            }
            ProviderError::UnexpectedConfigureType { expected, received } => Diagnostic::error(
                "Unexpected Resource Configure Type",
                format!(
                    "Expected {expected}, got: {received}. Please report this issue to the provider developers."
                ),
            ),
            ProviderError::UnknownResource(name) => Diagnostic::error(
                "Unknown resource type",
                format!("No resource named '{name}' is registered with this provider."),
            ),
            ProviderError::State(e) => {
                Diagnostic::error("Invalid resource state", format!("Failed to decode state: {e}."))
            }
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        Diagnostic::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_diagnostic_names_attribute() {
        let err = ProviderError::validation("length", "must be between 1 and 64, got 65");
        let diag = Diagnostic::from(&err);

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.attribute.as_deref(), Some("length"));
        assert!(diag.detail.contains("between 1 and 64"));
    }

    #[test]
    fn test_configure_type_diagnostic_reports_received_type() {
        let err = ProviderError::UnexpectedConfigureType {
            expected: "ProviderData",
            received: "alloc::string::String",
        };
        let diag = Diagnostic::from(err);

        assert!(diag.detail.contains("got: alloc::string::String"));
        assert!(diag.attribute.is_none());
    }

    #[test]
    fn test_generation_diagnostic() {
        let err = ProviderError::from(GenerationError::EmptyAlphabet);
        assert!(err.is_generation());

        let json = serde_json::to_value(Diagnostic::from(&err)).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["summary"], "Failed to generate id");
        assert!(json.get("attribute").is_none());
    }
}
