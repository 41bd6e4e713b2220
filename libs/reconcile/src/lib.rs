//! Plan-diff primitives.
//!
//! A declarative caller hands the provider three views of a resource:
//!
//! - **Prior state**: what was recorded after the last apply.
//! - **Configuration**: what the user wrote, with unset attributes as `null`.
//! - **Planned state**: the configuration with defaults resolved.
//!
//! This library compares them attribute by attribute and decides whether the
//! resource can be left alone, updated in place, or must be destroyed and
//! recreated.
//!
//! # Invariants
//!
//! - Decisions are deterministic given the same inputs
//! - An attribute with a replacement trigger never reaches the update path
//!   when its trigger fires
//! - Fingerprints do not depend on key order

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Attribute name to value, as carried in state and configuration documents.
pub type Attributes = serde_json::Map<String, Value>;

/// What applying a plan will do to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// No prior state; the resource will be created.
    Create,

    /// Prior state already matches the plan.
    NoOp,

    /// Only attributes without replacement triggers changed.
    Update,

    /// A replacement-triggering attribute changed; destroy then recreate.
    Replace,
}

impl PlanAction {
    /// Returns true if applying the plan produces a new resource instance.
    pub fn creates_instance(&self) -> bool {
        matches!(self, Self::Create | Self::Replace)
    }
}

impl std::fmt::Display for PlanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::NoOp => "no-op",
            Self::Update => "update",
            Self::Replace => "replace",
        };
        f.write_str(s)
    }
}

/// When a change to an attribute forces replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceTrigger {
    /// Any difference between prior and planned value.
    Always,

    /// A difference, but only while the configuration sets the attribute.
    /// Removing the attribute from configuration is an in-place update.
    IfConfigured,
}

impl ReplaceTrigger {
    /// Decide whether this attribute forces replacement.
    pub fn fires(&self, prior: &Value, config: &Value, planned: &Value) -> bool {
        if prior == planned {
            return false;
        }

        match self {
            Self::Always => true,
            Self::IfConfigured => !config.is_null(),
        }
    }
}

/// Diff rule for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    /// Attribute name.
    pub name: &'static str,

    /// Replacement trigger, or `None` for attributes updatable in place.
    pub trigger: Option<ReplaceTrigger>,
}

impl AttributeRule {
    /// Rule for an attribute that is replaced on any change.
    pub const fn replace(name: &'static str) -> Self {
        Self {
            name,
            trigger: Some(ReplaceTrigger::Always),
        }
    }

    /// Rule for an attribute that is replaced on change while configured.
    pub const fn replace_if_configured(name: &'static str) -> Self {
        Self {
            name,
            trigger: Some(ReplaceTrigger::IfConfigured),
        }
    }

    /// Rule for an attribute that can change in place.
    pub const fn in_place(name: &'static str) -> Self {
        Self {
            name,
            trigger: None,
        }
    }
}

/// Attributes that differ between prior and planned state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changed: Vec<String>,
    replace: Vec<String>,
}

impl ChangeSet {
    /// Compare prior state with the plan under the given rules.
    ///
    /// Attributes not named by a rule (computed ones, typically) are ignored.
    pub fn between(
        prior: &Attributes,
        config: &Attributes,
        planned: &Attributes,
        rules: &[AttributeRule],
    ) -> Self {
        let mut set = Self::default();

        for rule in rules {
            let prior_value = prior.get(rule.name).unwrap_or(&Value::Null);
            let config_value = config.get(rule.name).unwrap_or(&Value::Null);
            let planned_value = planned.get(rule.name).unwrap_or(&Value::Null);

            if prior_value == planned_value {
                continue;
            }

            set.changed.push(rule.name.to_string());

            if let Some(trigger) = rule.trigger {
                if trigger.fires(prior_value, config_value, planned_value) {
                    set.replace.push(rule.name.to_string());
                }
            }
        }

        set
    }

    /// Keep `name` as a change but stop it from forcing replacement.
    pub fn waive(&mut self, name: &str) {
        self.replace.retain(|n| n != name);
    }

    /// Changed attribute names, in rule order.
    pub fn changed(&self) -> &[String] {
        &self.changed
    }

    /// Attribute names that force replacement, in rule order.
    pub fn requires_replace(&self) -> &[String] {
        &self.replace
    }

    /// Returns true if `name` changed.
    pub fn is_changed(&self, name: &str) -> bool {
        self.changed.iter().any(|n| n == name)
    }

    /// The action for an existing resource with this change set.
    pub fn action(&self) -> PlanAction {
        if !self.replace.is_empty() {
            PlanAction::Replace
        } else if !self.changed.is_empty() {
            PlanAction::Update
        } else {
            PlanAction::NoOp
        }
    }
}

/// A configuration fingerprint for deterministic comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint from canonical JSON.
    pub fn from_json(json: &Value) -> Self {
        let canonical = canonical_json(json);
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let result = hasher.finalize();
        Self(format!("sha256:{}", hex::encode(&result[..16]))) // First 16 bytes (128 bits)
    }

    /// Fingerprint the named attributes; missing ones count as `null`.
    pub fn of(attributes: &Attributes, names: &[&str]) -> Self {
        let selected: Attributes = names
            .iter()
            .map(|name| {
                let value = attributes.get(*name).cloned().unwrap_or(Value::Null);
                ((*name).to_string(), value)
            })
            .collect();
        Self::from_json(&Value::Object(selected))
    }

    /// Get the fingerprint string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Produce canonical JSON (sorted keys, no extra whitespace).
fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by_key(|(k, _)| *k);
            let inner: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape_json_string(k), canonical_json(v)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
        Value::Array(arr) => {
            let inner: Vec<String> = arr.iter().map(canonical_json).collect();
            format!("[{}]", inner.join(","))
        }
        Value::String(s) => format!("\"{}\"", escape_json_string(s)),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
