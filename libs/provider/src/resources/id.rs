//! `nanoid_id`: random identifiers over a caller-chosen alphabet.

use nanoprov_id::DEFAULT_ALPHABET;

use crate::lifecycle::{AlphabetPolicy, IdentifierResource, ImportKeepers, Profile};
use crate::Resource;

pub static ID_PROFILE: Profile = Profile {
    kind: "id",
    description: "The id resource generates random strings that are intended to be used as unique \
                  identifiers for other resources. Use it with create_before_destroy to avoid name \
                  conflicts while old and new resources exist side by side.",
    alphabet: AlphabetPolicy::Configurable {
        default: DEFAULT_ALPHABET,
    },
    default_length: 21,
    import_keepers: ImportKeepers::Unset,
};

pub fn new_id_resource() -> Box<dyn Resource> {
    Box::new(IdentifierResource::new(&ID_PROFILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanRequest;
    use nanoprov_id::{Alphabet, GenerationError};
    use nanoprov_reconcile::PlanAction;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn never(_: &Alphabet, _: i64) -> Result<String, GenerationError> {
        panic!("generator must not run when validation fails")
    }

    fn resource() -> IdentifierResource {
        IdentifierResource::new(&ID_PROFILE)
    }

    #[test]
    fn test_default_configuration() {
        let state = resource().create(&json!({})).unwrap();

        assert_eq!(state["length"], 21);
        assert_eq!(state["alphabet"], DEFAULT_ALPHABET);

        let id = state["id"].as_str().unwrap();
        assert_eq!(id.chars().count(), 21);
        assert!(Alphabet::standard().covers(id));
    }

    #[test]
    fn test_custom_alphabet_and_length() {
        let state = resource()
            .create(&json!({"alphabet": "01", "length": 11}))
            .unwrap();

        let id = state["id"].as_str().unwrap();
        assert_eq!(id.len(), 11);
        assert!(id.chars().all(|c| c == '0' || c == '1'));
        assert_eq!(state["alphabet"], "01");
    }

    #[test]
    fn test_keepers_are_echoed() {
        let state = resource()
            .create(&json!({"keepers": {"ami": "ami-123"}}))
            .unwrap();
        assert_eq!(state["keepers"], json!({"ami": "ami-123"}));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(65)]
    #[case(1000)]
    fn test_length_out_of_bounds(#[case] length: i64) {
        let resource = resource().with_generator(never);
        let config = json!({ "length": length });

        let err = resource.create(&config).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.attribute(), Some("length"));
        assert!(err.to_string().contains("between 1 and 64"));

        let err = resource
            .plan(PlanRequest {
                prior: None,
                config: &config,
            })
            .unwrap_err();
        assert_eq!(err.attribute(), Some("length"));
    }

    #[rstest]
    #[case(1)]
    #[case(21)]
    #[case(64)]
    fn test_length_in_bounds(#[case] length: i64) {
        let state = resource().create(&json!({ "length": length })).unwrap();
        assert_eq!(state["id"].as_str().unwrap().chars().count() as i64, length);
    }

    #[test]
    fn test_alphabet_out_of_bounds() {
        let resource = resource().with_generator(never);

        let err = resource.create(&json!({"alphabet": ""})).unwrap_err();
        assert_eq!(err.attribute(), Some("alphabet"));

        let too_large: String = (0..256u32)
            .map(|i| char::from_u32(0x400 + i).unwrap())
            .collect();
        let err = resource
            .create(&json!({ "alphabet": too_large }))
            .unwrap_err();
        assert_eq!(err.attribute(), Some("alphabet"));
        assert!(err.to_string().contains("between 1 and 255, got 256"));
    }

    #[test]
    fn test_plan_defaults_and_unknown_id() {
        let plan = resource()
            .plan(PlanRequest {
                prior: None,
                config: &json!({"length": 8}),
            })
            .unwrap();

        assert_eq!(plan.action, PlanAction::Create);
        assert_eq!(plan.planned["alphabet"], DEFAULT_ALPHABET);
        assert_eq!(plan.planned["length"], 8);
        assert_eq!(plan.planned["id"], Value::Null);
    }

    #[rstest]
    #[case(json!({"length": 22}), "length")]
    #[case(json!({"alphabet": "abc"}), "alphabet")]
    #[case(json!({"keepers": {"rev": "2"}}), "keepers")]
    fn test_identity_change_replaces(#[case] config: Value, #[case] attribute: &str) {
        let resource = resource();
        let prior = resource
            .create(&json!({"keepers": {"rev": "1"}}))
            .unwrap();

        let mut config = config;
        if config.get("keepers").is_none() {
            config["keepers"] = json!({"rev": "1"});
        }

        let plan = resource
            .plan(PlanRequest {
                prior: Some(&prior),
                config: &config,
            })
            .unwrap();

        assert_eq!(plan.action, PlanAction::Replace);
        assert_eq!(plan.requires_replace, vec![attribute.to_string()]);
        assert_eq!(plan.planned["id"], Value::Null);
    }

    #[test]
    fn test_import_leaves_alphabet_and_keepers_unset() {
        let state = resource().import("V1StGXR8_Z5jdHi6B-myT").unwrap();

        assert_eq!(state["id"], "V1StGXR8_Z5jdHi6B-myT");
        assert_eq!(state["length"], 21);
        assert_eq!(state["alphabet"], Value::Null);
        assert_eq!(state["keepers"], Value::Null);
    }
}
