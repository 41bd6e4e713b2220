//! The identifier lifecycle shared by every identifier resource.
//!
//! An instance moves `Unconfigured -> Planned -> Created -> Destroyed`, with
//! import as a second way into `Created`. The orchestrating caller owns the
//! state; each operation here is a pure function of its inputs plus, for
//! create, fresh randomness.
//!
//! Resources differ only in their [`Profile`]: whether the alphabet is
//! configurable, the default length, and what import does with keepers.

use std::collections::BTreeMap;

use nanoprov_id::{Alphabet, GenerationError, MAX_ALPHABET_SIZE, MAX_LENGTH, MIN_LENGTH};
use nanoprov_reconcile::{Attributes, ChangeSet, Fingerprint, PlanAction, ReplaceTrigger};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::schema::{Attribute, AttributeType, Schema};
use crate::{PlanRequest, PlanResponse, ProviderData, ProviderError, Resource, ResourceData};

/// Signature of the identifier generator.
pub type GenerateFn = fn(&Alphabet, i64) -> Result<String, GenerationError>;

/// Attributes that force a new identifier when they change.
const IDENTITY_ATTRIBUTES: &[&str] = &["alphabet", "length", "keepers"];

/// Where a resource's alphabet comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetPolicy {
    /// Caller may set `alphabet`; `default` applies when unset.
    Configurable { default: &'static str },

    /// Always this alphabet; `alphabet` is not an attribute.
    Fixed(&'static str),
}

/// What import records for `keepers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKeepers {
    Unset,
    Empty,
}

/// The fixed differences between identifier resources.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    /// Type name suffix, appended to the provider type name.
    pub kind: &'static str,
    pub description: &'static str,
    pub alphabet: AlphabetPolicy,
    pub default_length: i64,
    pub import_keepers: ImportKeepers,
}

impl Profile {
    /// The attribute schema for this profile.
    pub fn schema(&self) -> Schema {
        let mut attributes = Vec::with_capacity(4);

        if let AlphabetPolicy::Configurable { default } = self.alphabet {
            attributes.push(
                Attribute::optional(
                    "alphabet",
                    AttributeType::String,
                    "Supply your own list of characters to use for id generation.",
                )
                .with_default(json!(default))
                .with_bounds(1, MAX_ALPHABET_SIZE as i64)
                .replaced_by(ReplaceTrigger::Always),
            );
        }

        attributes.push(
            Attribute::optional(
                "length",
                AttributeType::Int64,
                "The length of the desired id. The minimum value for length is 1 and the maximum value is 64.",
            )
            .with_default(json!(self.default_length))
            .with_bounds(MIN_LENGTH, MAX_LENGTH)
            .replaced_by(ReplaceTrigger::Always),
        );

        attributes.push(
            Attribute::optional(
                "keepers",
                AttributeType::StringMap,
                "Arbitrary map of values that, when changed, will trigger recreation of the resource.",
            )
            .replaced_by(ReplaceTrigger::IfConfigured),
        );

        attributes.push(Attribute::computed(
            "id",
            AttributeType::String,
            "The generated random string.",
        ));

        Schema {
            description: self.description,
            attributes,
        }
    }
}

/// Recorded state of one identifier instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierState {
    pub id: String,

    /// Unset after import until a plan adopts the configured alphabet.
    #[serde(default)]
    pub alphabet: Option<String>,

    pub length: i64,

    #[serde(default)]
    pub keepers: Option<BTreeMap<String, String>>,
}

/// A resource implementing the identifier lifecycle for one [`Profile`].
#[derive(Debug, Clone)]
pub struct IdentifierResource {
    profile: &'static Profile,
    generator: GenerateFn,
    provider: Option<ProviderData>,
}

impl IdentifierResource {
    pub fn new(profile: &'static Profile) -> Self {
        Self {
            profile,
            generator: nanoprov_id::generate,
            provider: None,
        }
    }

    /// Replace the identifier generator.
    #[must_use]
    pub fn with_generator(mut self, generator: GenerateFn) -> Self {
        self.generator = generator;
        self
    }

    /// Version of the configuring provider, for log context.
    fn provider_version(&self) -> &str {
        self.provider
            .as_ref()
            .map_or("unconfigured", |data| data.version.as_str())
    }

    /// Validate configuration and resolve defaults.
    ///
    /// Returns the configuration as given and the planned attributes.
    fn resolve(&self, config: &Value) -> Result<(Attributes, Attributes), ProviderError> {
        let config = as_object(config, "config")?;
        let schema = self.profile.schema();

        schema.validate_config(&config)?;

        let mut planned = schema.project(&config);
        schema.apply_defaults(&mut planned);

        Ok((config, planned))
    }

    fn alphabet(&self, planned: &Attributes) -> Result<Alphabet, ProviderError> {
        let raw = match self.profile.alphabet {
            AlphabetPolicy::Fixed(raw) => raw,
            AlphabetPolicy::Configurable { default } => planned
                .get("alphabet")
                .and_then(Value::as_str)
                .unwrap_or(default),
        };

        Ok(Alphabet::new(raw)?)
    }

    fn length(&self, planned: &Attributes) -> i64 {
        planned
            .get("length")
            .and_then(Value::as_i64)
            .unwrap_or(self.profile.default_length)
    }

    fn keepers(planned: &Attributes) -> Result<Option<BTreeMap<String, String>>, ProviderError> {
        let value = planned.get("keepers").cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    fn encode(&self, state: &IdentifierState) -> Result<Value, ProviderError> {
        let value = serde_json::to_value(state)?;
        let attributes = as_object(&value, "state")?;
        Ok(Value::Object(self.profile.schema().project(&attributes)))
    }

    fn decode(&self, state: &Value) -> Result<IdentifierState, ProviderError> {
        Ok(serde_json::from_value(state.clone())?)
    }

    /// An imported instance has no recorded alphabet. It adopts the configured
    /// one without replacement as long as the identifier fits it.
    fn adopts_alphabet(&self, prior: &Attributes, planned: &Attributes) -> bool {
        if !matches!(self.profile.alphabet, AlphabetPolicy::Configurable { .. }) {
            return false;
        }

        if !prior.get("alphabet").is_some_and(Value::is_null) {
            return false;
        }

        let (Some(id), Some(raw)) = (
            prior.get("id").and_then(Value::as_str),
            planned.get("alphabet").and_then(Value::as_str),
        ) else {
            return false;
        };

        Alphabet::new(raw).is_ok_and(|alphabet| alphabet.covers(id))
    }
}

impl Resource for IdentifierResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}", self.profile.kind)
    }

    fn schema(&self) -> Schema {
        self.profile.schema()
    }

    fn configure(&mut self, data: Option<&dyn ResourceData>) -> Result<(), ProviderError> {
        let data = ProviderData::from_handle(data).inspect_err(|e| {
            warn!(kind = self.profile.kind, error = %e, "Rejected provider data");
        })?;

        if let Some(data) = data {
            self.provider = Some(data.clone());
        }

        Ok(())
    }

    fn plan(&self, request: PlanRequest<'_>) -> Result<PlanResponse, ProviderError> {
        let (config, mut planned) = self.resolve(request.config)?;
        let desired = Fingerprint::of(&planned, IDENTITY_ATTRIBUTES);

        let Some(prior) = request.prior else {
            planned.insert("id".to_string(), Value::Null);
            debug!(kind = self.profile.kind, fingerprint = %desired, "Planned create");

            return Ok(PlanResponse {
                action: PlanAction::Create,
                requires_replace: Vec::new(),
                planned: Value::Object(planned),
            });
        };

        let schema = self.profile.schema();
        let prior = schema.project(&as_object(prior, "state")?);

        // An empty keepers map and an unset one are the same.
        let prior_keepers_empty = prior
            .get("keepers")
            .and_then(Value::as_object)
            .is_some_and(|m| m.is_empty());
        if prior_keepers_empty && planned.get("keepers").is_some_and(Value::is_null) {
            planned.insert("keepers".to_string(), json!({}));
        }

        let mut changes = ChangeSet::between(&prior, &config, &planned, &schema.rules());
        if self.adopts_alphabet(&prior, &planned) {
            changes.waive("alphabet");
        }

        let action = changes.action();
        let id = if action.creates_instance() {
            Value::Null
        } else {
            prior.get("id").cloned().unwrap_or(Value::Null)
        };
        planned.insert("id".to_string(), id);

        debug!(
            kind = self.profile.kind,
            %action,
            prior = %Fingerprint::of(&prior, IDENTITY_ATTRIBUTES),
            desired = %desired,
            changed = ?changes.changed(),
            "Planned change"
        );

        Ok(PlanResponse {
            action,
            requires_replace: changes.requires_replace().to_vec(),
            planned: Value::Object(planned),
        })
    }

    fn create(&self, config: &Value) -> Result<Value, ProviderError> {
        let (_, planned) = self.resolve(config)?;

        let alphabet = self.alphabet(&planned)?;
        let length = self.length(&planned);
        let keepers = Self::keepers(&planned)?;

        let id = (self.generator)(&alphabet, length).inspect_err(|e| {
            warn!(kind = self.profile.kind, error = %e, "Failed to generate id");
        })?;

        let state = IdentifierState {
            id,
            alphabet: match self.profile.alphabet {
                AlphabetPolicy::Configurable { .. } => Some(alphabet.to_string()),
                AlphabetPolicy::Fixed(_) => None,
            },
            length,
            keepers,
        };

        info!(
            kind = self.profile.kind,
            provider_version = self.provider_version(),
            length,
            alphabet_size = alphabet.len(),
            "Generated id"
        );

        self.encode(&state)
    }

    fn read(&self, state: &Value) -> Result<Value, ProviderError> {
        let state = self.decode(state)?;
        self.encode(&state)
    }

    fn update(&self, prior: &Value, planned: &Value) -> Result<Value, ProviderError> {
        let prior = self.decode(prior)?;

        // The planned id echoes prior state and is not configuration.
        let mut planned = as_object(planned, "planned")?;
        planned.remove("id");
        let (_, planned) = self.resolve(&Value::Object(planned))?;

        // Identity attributes never change in place; only keepers removal
        // and alphabet adoption reach this path.
        let alphabet = match self.profile.alphabet {
            AlphabetPolicy::Configurable { .. } => prior.alphabet.clone().or_else(|| {
                planned
                    .get("alphabet")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            }),
            AlphabetPolicy::Fixed(_) => None,
        };

        let state = IdentifierState {
            id: prior.id,
            alphabet,
            length: prior.length,
            keepers: Self::keepers(&planned)?,
        };

        debug!(kind = self.profile.kind, "Updated in place");
        self.encode(&state)
    }

    fn delete(&self, state: &Value) -> Result<(), ProviderError> {
        self.decode(state)?;
        debug!(kind = self.profile.kind, "Deleted");
        Ok(())
    }

    fn import(&self, id: &str) -> Result<Value, ProviderError> {
        let length = id.chars().count() as i64;

        if length > MAX_LENGTH {
            return Err(ProviderError::validation(
                "id",
                format!("The id must be at most {MAX_LENGTH} characters long, got {length}."),
            ));
        }

        let state = IdentifierState {
            id: id.to_string(),
            alphabet: None,
            length,
            keepers: match self.profile.import_keepers {
                ImportKeepers::Unset => None,
                ImportKeepers::Empty => Some(BTreeMap::new()),
            },
        };

        info!(
            kind = self.profile.kind,
            provider_version = self.provider_version(),
            length,
            "Imported id"
        );
        self.encode(&state)
    }
}

/// Treat `null` as an empty document; anything else must be an object.
fn as_object(value: &Value, what: &str) -> Result<Attributes, ProviderError> {
    match value {
        Value::Null => Ok(Attributes::new()),
        Value::Object(map) => Ok(map.clone()),
        _ => Err(ProviderError::validation(
            what,
            "expected an object of attributes",
        )),
    }
}
