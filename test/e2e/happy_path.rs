//! End-to-end happy path test.
//!
//! Plays the orchestrator across several runs, persisting state to disk
//! between them the way a state file would:
//!
//! 1. Configure the provider
//! 2. First apply creates one instance of each resource
//! 3. Refresh and re-plan with no changes (no-op)
//! 4. Change keepers, apply the replacement
//! 5. Drop keepers, apply the in-place update
//! 6. Import an existing identifier and adopt configuration
//! 7. Destroy everything
//!
//! ## Running
//!
//! ```bash
//! cargo test -p nanoprov-e2e --test happy_path
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use nanoprov_id::{Alphabet, DEFAULT_ALPHABET};
use nanoprov_provider::{NanoidProvider, PlanAction, PlanRequest, ProviderData, Resource};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Instance address -> (resource type, configuration).
type Configuration = BTreeMap<&'static str, (&'static str, Value)>;

/// Minimal orchestrator: plans every instance against its stored state and
/// applies the result.
struct Orchestrator {
    provider: NanoidProvider,
    data: ProviderData,
    state_dir: PathBuf,
}

impl Orchestrator {
    fn new(state_dir: &Path) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,nanoprov_provider=debug".into()),
            )
            .with_test_writer()
            .try_init();

        let provider = NanoidProvider::new("e2e");
        let data = provider.configure(&json!({})).expect("configure failed");

        Self {
            provider,
            data,
            state_dir: state_dir.to_path_buf(),
        }
    }

    fn resource(&self, type_name: &str) -> Box<dyn Resource> {
        self.provider
            .resource(type_name, Some(&self.data))
            .unwrap_or_else(|e| panic!("failed to load {type_name}: {e}"))
    }

    fn state_path(&self, address: &str) -> PathBuf {
        self.state_dir.join(format!("{address}.json"))
    }

    fn load(&self, address: &str) -> Option<Value> {
        let path = self.state_path(address);
        path.exists().then(|| {
            let text = fs::read_to_string(&path).expect("unreadable state file");
            serde_json::from_str(&text).expect("corrupt state file")
        })
    }

    fn save(&self, address: &str, state: &Value) {
        let text = serde_json::to_string_pretty(state).unwrap();
        fs::write(self.state_path(address), text).expect("failed to write state");
    }

    fn remove(&self, address: &str) {
        fs::remove_file(self.state_path(address)).expect("failed to remove state");
    }

    /// Refresh, plan and apply every instance. Returns the action taken per address.
    fn apply(&self, configuration: &Configuration) -> BTreeMap<&'static str, PlanAction> {
        let mut actions = BTreeMap::new();

        for (address, (type_name, config)) in configuration {
            let resource = self.resource(type_name);
            let prior = self
                .load(address)
                .map(|state| resource.read(&state).expect("refresh failed"));

            let plan = resource
                .plan(PlanRequest {
                    prior: prior.as_ref(),
                    config,
                })
                .expect("plan failed");

            let state = match (plan.action, &prior) {
                (PlanAction::NoOp, Some(prior)) => prior.clone(),
                (PlanAction::Update, Some(prior)) => {
                    resource.update(prior, &plan.planned).expect("update failed")
                }
                (PlanAction::Replace, Some(prior)) => {
                    resource.delete(prior).expect("delete failed");
                    resource.create(&plan.planned).expect("create failed")
                }
                (PlanAction::Create, None) => {
                    resource.create(&plan.planned).expect("create failed")
                }
                (action, prior) => panic!("unexpected {action} with prior {prior:?}"),
            };

            self.save(address, &state);
            actions.insert(*address, plan.action);
        }

        actions
    }

    fn import(&self, address: &str, type_name: &str, id: &str) {
        let state = self.resource(type_name).import(id).expect("import failed");
        self.save(address, &state);
    }

    fn destroy(&self, configuration: &Configuration) {
        for (address, (type_name, _)) in configuration {
            if let Some(state) = self.load(address) {
                self.resource(type_name).delete(&state).expect("delete failed");
                self.remove(address);
            }
        }
    }

    fn id(&self, address: &str) -> String {
        let state = self.load(address).expect("no state recorded");
        state["id"].as_str().expect("state has no id").to_string()
    }
}

#[test]
fn happy_path() {
    let dir = TempDir::new().unwrap();
    let orchestrator = Orchestrator::new(dir.path());

    // Step 1-2: first apply creates everything.
    let mut configuration: Configuration = BTreeMap::from([
        ("nanoid_id.session", ("nanoid_id", json!({"keepers": {"image": "v1"}}))),
        ("nanoid_dns.host", ("nanoid_dns", json!({"length": 9}))),
    ]);

    let actions = orchestrator.apply(&configuration);
    assert!(actions.values().all(|a| *a == PlanAction::Create));

    let session = orchestrator.id("nanoid_id.session");
    assert_eq!(session.chars().count(), 21);
    assert!(Alphabet::standard().covers(&session));

    let host = orchestrator.id("nanoid_dns.host");
    assert_eq!(host.len(), 9);
    assert!(Alphabet::dns().covers(&host));

    let stored = orchestrator.load("nanoid_id.session").unwrap();
    assert_eq!(stored["alphabet"], DEFAULT_ALPHABET);
    assert_eq!(stored["length"], 21);

    // Step 3: nothing changed, nothing happens.
    let actions = orchestrator.apply(&configuration);
    assert!(actions.values().all(|a| *a == PlanAction::NoOp));
    assert_eq!(orchestrator.id("nanoid_id.session"), session);
    assert_eq!(orchestrator.id("nanoid_dns.host"), host);

    // Step 4: a keepers change rotates the session id only.
    configuration.insert(
        "nanoid_id.session",
        ("nanoid_id", json!({"keepers": {"image": "v2"}})),
    );
    let actions = orchestrator.apply(&configuration);
    assert_eq!(actions["nanoid_id.session"], PlanAction::Replace);
    assert_eq!(actions["nanoid_dns.host"], PlanAction::NoOp);

    let rotated = orchestrator.id("nanoid_id.session");
    assert_ne!(rotated, session);
    assert_eq!(orchestrator.id("nanoid_dns.host"), host);

    // Step 5: removing keepers is not a reason for a new id.
    configuration.insert("nanoid_id.session", ("nanoid_id", json!({})));
    let actions = orchestrator.apply(&configuration);
    assert_eq!(actions["nanoid_id.session"], PlanAction::Update);
    assert_eq!(orchestrator.id("nanoid_id.session"), rotated);
    assert_eq!(
        orchestrator.load("nanoid_id.session").unwrap()["keepers"],
        Value::Null
    );

    // Step 6: import a pre-existing id and bring it under configuration.
    orchestrator.import("nanoid_dns.legacy", "nanoid_dns", "k3v9x0p2aa");
    configuration.insert("nanoid_dns.legacy", ("nanoid_dns", json!({})));

    let actions = orchestrator.apply(&configuration);
    assert_eq!(actions["nanoid_dns.legacy"], PlanAction::NoOp);
    assert_eq!(orchestrator.id("nanoid_dns.legacy"), "k3v9x0p2aa");

    // Step 7: destroy.
    orchestrator.destroy(&configuration);
    for address in configuration.keys() {
        assert!(orchestrator.load(address).is_none());
    }
}

#[test]
fn invalid_configuration_leaves_state_untouched() {
    let dir = TempDir::new().unwrap();
    let orchestrator = Orchestrator::new(dir.path());

    let configuration: Configuration =
        BTreeMap::from([("nanoid_id.token", ("nanoid_id", json!({"length": 12})))]);
    orchestrator.apply(&configuration);
    let before = orchestrator.load("nanoid_id.token").unwrap();

    let resource = orchestrator.resource("nanoid_id");
    let err = resource
        .plan(PlanRequest {
            prior: Some(&before),
            config: &json!({"length": 65}),
        })
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(orchestrator.load("nanoid_id.token").unwrap(), before);
}
