//! Declarative attribute schemas.
//!
//! A schema is the single source of truth for an attribute's type, default,
//! bounds and replacement behaviour. Configuration is validated and
//! defaulted against it before any lifecycle operation runs.

use nanoprov_reconcile::{AttributeRule, Attributes, ReplaceTrigger};
use serde::Serialize;
use serde_json::Value;

use crate::ProviderError;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
    /// A map of string keys to string values.
    StringMap,
}

impl AttributeType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int64 => value.is_i64(),
            Self::StringMap => value
                .as_object()
                .is_some_and(|map| map.values().all(Value::is_string)),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Int64 => "integer",
            Self::StringMap => "map of strings",
        };
        f.write_str(s)
    }
}

/// Inclusive bounds. For integers the value is bounded; for strings the
/// number of symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

/// One attribute of a resource schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub optional: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<ReplaceTrigger>,
    pub description: &'static str,
}

impl Attribute {
    /// An attribute only the provider sets.
    pub fn computed(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            optional: false,
            computed: true,
            default: None,
            bounds: None,
            replace: None,
            description,
        }
    }

    /// An attribute the caller may set.
    pub fn optional(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self {
            optional: true,
            computed: false,
            ..Self::computed(name, kind, description)
        }
    }

    /// Use `default` when the caller leaves the attribute unset.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self.computed = true;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: i64, max: i64) -> Self {
        self.bounds = Some(Bounds { min, max });
        self
    }

    #[must_use]
    pub fn replaced_by(mut self, trigger: ReplaceTrigger) -> Self {
        self.replace = Some(trigger);
        self
    }

    /// Returns true if only the provider may set this attribute.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional
    }

    /// Validate a configured value. `null` means unset and is always accepted.
    pub fn validate(&self, value: &Value) -> Result<(), ProviderError> {
        if value.is_null() {
            return Ok(());
        }

        if !self.kind.matches(value) {
            return Err(ProviderError::validation(
                self.name,
                format!("expected {}, got {}", self.kind, describe(value)),
            ));
        }

        let Some(Bounds { min, max }) = self.bounds else {
            return Ok(());
        };

        match self.kind {
            AttributeType::Int64 => {
                let actual = value.as_i64().unwrap_or_default();
                if actual < min || actual > max {
                    return Err(ProviderError::validation(
                        self.name,
                        format!("must be between {min} and {max}, got {actual}"),
                    ));
                }
            }
            AttributeType::String => {
                let actual = value.as_str().map_or(0, |s| s.chars().count()) as i64;
                if actual < min || actual > max {
                    return Err(ProviderError::validation(
                        self.name,
                        format!("string length must be between {min} and {max}, got {actual}"),
                    ));
                }
            }
            AttributeType::StringMap => {}
        }

        Ok(())
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// A resource schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Diff rules for the plan step.
    pub fn rules(&self) -> Vec<AttributeRule> {
        self.attributes
            .iter()
            .filter(|a| !a.is_read_only())
            .map(|a| AttributeRule {
                name: a.name,
                trigger: a.replace,
            })
            .collect()
    }

    /// Validate a configuration document against the schema.
    ///
    /// Rejects unknown attributes, values for provider-set attributes, wrong
    /// types and out-of-bounds values.
    pub fn validate_config(&self, config: &Attributes) -> Result<(), ProviderError> {
        for (name, value) in config {
            let Some(attribute) = self.attribute(name) else {
                return Err(ProviderError::validation(
                    name.as_str(),
                    "unsupported attribute",
                ));
            };

            if attribute.is_read_only() && !value.is_null() {
                return Err(ProviderError::validation(
                    name.as_str(),
                    "value is computed by the provider and cannot be configured",
                ));
            }

            attribute.validate(value)?;
        }

        Ok(())
    }

    /// Keep only schema attributes, with missing ones as `null`.
    pub fn project(&self, attributes: &Attributes) -> Attributes {
        self.attributes
            .iter()
            .map(|a| {
                let value = attributes.get(a.name).cloned().unwrap_or(Value::Null);
                (a.name.to_string(), value)
            })
            .collect()
    }

    /// Fill unset attributes that declare a default.
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        for attribute in &self.attributes {
            let Some(default) = &attribute.default else {
                continue;
            };

            let slot = attributes
                .entry(attribute.name.to_string())
                .or_insert(Value::Null);
            if slot.is_null() {
                *slot = default.clone();
            }
        }
    }
}
