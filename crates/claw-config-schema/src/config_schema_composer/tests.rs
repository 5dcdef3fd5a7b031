use claw_config::{base_config_schema, BASE_CONFIG_PROPERTY_KEYS};
use claw_extensions::ChannelDescriptor;
use proptest::prelude::*;
use serde_json::{json, Value};

use super::{
    compose_config_schema, CompositionError, CONTRIBUTION_METADATA_KEY, EXTENSIONS_NAMESPACE,
};
use crate::{normalize_extension_descriptors, ContributionSource, ExtensionContribution};

fn contribution(id: &str, fragment: Option<Value>) -> ExtensionContribution {
    ExtensionContribution {
        id: id.to_string(),
        display_name: format!("{id} display"),
        description: None,
        schema_fragment: fragment,
        ui_hints: None,
        source: ContributionSource::Plugin,
    }
}

fn top_level_keys(document: &Value) -> Vec<String> {
    let mut keys = document["properties"]
        .as_object()
        .expect("properties object")
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    keys.sort();
    keys
}

#[test]
fn unit_compose_without_contributions_returns_base_schema() {
    let base = base_config_schema();
    let composed = compose_config_schema(&base, &[]).expect("compose");
    assert_eq!(composed.as_value(), &base);
    assert!(composed.extension_ids().is_empty());
    assert_eq!(top_level_keys(composed.as_value()), BASE_CONFIG_PROPERTY_KEYS);
}

#[test]
fn functional_compose_namespaces_one_entry_per_contribution() {
    let base = base_config_schema();
    let fragment = json!({
        "type": "object",
        "properties": { "provider": { "type": "string" } }
    });
    let composed = compose_config_schema(
        &base,
        &[
            contribution("voice-call", Some(fragment.clone())),
            contribution("telegram", None),
        ],
    )
    .expect("compose");

    assert_eq!(composed.extension_ids(), vec!["telegram", "voice-call"]);
    let namespace = &composed.as_value()["properties"][EXTENSIONS_NAMESPACE];
    assert_eq!(namespace["properties"]["voice-call"], fragment);
    assert_eq!(namespace["properties"]["telegram"], json!({}));
    for key in BASE_CONFIG_PROPERTY_KEYS {
        assert_eq!(
            composed.as_value()["properties"][*key],
            base["properties"][*key],
            "base key {key} must pass through untouched"
        );
    }
}

#[test]
fn functional_compose_keeps_display_metadata_out_of_fragments() {
    let mut entry = contribution("voice-call", Some(json!({ "type": "object" })));
    entry.description = Some("Places phone calls.".to_string());
    entry.ui_hints = Some(json!({ "provider": { "label": "Provider" } }));
    let composed = compose_config_schema(&base_config_schema(), &[entry]).expect("compose");

    let namespace = &composed.as_value()["properties"][EXTENSIONS_NAMESPACE];
    assert_eq!(namespace["properties"]["voice-call"], json!({ "type": "object" }));
    let metadata = &namespace[CONTRIBUTION_METADATA_KEY]["voice-call"];
    assert_eq!(metadata["displayName"], "voice-call display");
    assert_eq!(metadata["description"], "Places phone calls.");
    assert_eq!(metadata["uiHints"]["provider"]["label"], "Provider");
    assert_eq!(metadata["source"], "plugin");
}

#[test]
fn functional_composed_document_compiles_as_json_schema() {
    let composed = compose_config_schema(
        &base_config_schema(),
        &[
            contribution(
                "voice-call",
                Some(json!({
                    "type": "object",
                    "properties": { "provider": { "type": "string" } },
                    "required": ["provider"]
                })),
            ),
            contribution("discord", Some(json!(true))),
        ],
    )
    .expect("compose");

    let validator = jsonschema::validator_for(composed.as_value()).expect("schema compiles");
    assert!(validator.is_valid(&json!({
        "extensions": { "voice-call": { "provider": "twilio" }, "discord": {} }
    })));
    assert!(!validator.is_valid(&json!({
        "extensions": { "voice-call": { "provider": 7 } }
    })));
}

#[test]
fn regression_compose_rejects_duplicate_ids_without_output() {
    let error = compose_config_schema(
        &base_config_schema(),
        &[
            contribution("telegram", None),
            contribution("voice-call", None),
            contribution("telegram", Some(json!({ "type": "object" }))),
        ],
    )
    .expect_err("duplicate ids must fail");
    assert_eq!(
        error,
        CompositionError::DuplicateContributionId {
            id: "telegram".to_string()
        }
    );
    assert!(error.to_string().contains("telegram"));
}

#[test]
fn regression_compose_rejects_whitespace_padded_duplicate_ids() {
    let channel = |id: &str| ChannelDescriptor {
        id: id.to_string(),
        label: "Telegram".to_string(),
        blurb: String::new(),
        config_schema: None,
        ui_hints: None,
    };
    let contributions =
        normalize_extension_descriptors(&[], &[channel(" telegram"), channel("telegram")]);
    let error = compose_config_schema(&base_config_schema(), &contributions)
        .expect_err("padded duplicate must fail");
    assert_eq!(
        error,
        CompositionError::DuplicateContributionId {
            id: "telegram".to_string()
        }
    );
}

#[test]
fn regression_compose_rejects_base_schema_owning_namespace() {
    let base = json!({
        "type": "object",
        "properties": { "extensions": { "type": "object" } }
    });
    let error = compose_config_schema(&base, &[contribution("telegram", None)])
        .expect_err("namespace conflict");
    assert!(matches!(error, CompositionError::NamespaceConflict { .. }));

    let untouched = compose_config_schema(&base, &[]).expect("no contributions, no conflict");
    assert_eq!(untouched.as_value(), &base);
}

#[test]
fn regression_compose_rejects_non_object_base_schema() {
    let error = compose_config_schema(&json!([]), &[]).expect_err("array base");
    assert!(matches!(error, CompositionError::InvalidBaseSchema { .. }));

    let error = compose_config_schema(&json!({ "properties": 3 }), &[])
        .expect_err("scalar properties");
    assert!(matches!(error, CompositionError::InvalidBaseSchema { .. }));
}

#[test]
fn regression_compose_rejects_scalar_fragment() {
    let error = compose_config_schema(
        &base_config_schema(),
        &[contribution("matrix", Some(json!("object")))],
    )
    .expect_err("string fragment");
    assert_eq!(
        error,
        CompositionError::InvalidFragment {
            id: "matrix".to_string()
        }
    );
}

#[test]
fn unit_compose_adds_properties_when_base_has_none() {
    let composed = compose_config_schema(
        &json!({ "type": "object" }),
        &[contribution("slack", None)],
    )
    .expect("compose");
    assert_eq!(composed.extension_ids(), vec!["slack"]);
}

proptest! {
    #[test]
    fn property_compose_is_deterministic_and_order_independent(
        ids in prop::collection::btree_set("[a-z][a-z0-9-]{0,10}", 0..8)
    ) {
        let base = base_config_schema();
        let forward = ids
            .iter()
            .map(|id| contribution(id, Some(json!({ "type": "object", "title": id }))))
            .collect::<Vec<_>>();
        let mut reversed = forward.clone();
        reversed.reverse();

        let first = compose_config_schema(&base, &forward).expect("compose");
        let second = compose_config_schema(&base, &forward).expect("compose again");
        let shuffled = compose_config_schema(&base, &reversed).expect("compose reversed");

        let first_json = first.to_json_string().expect("serialize");
        prop_assert_eq!(&first_json, &second.to_json_string().expect("serialize"));
        prop_assert_eq!(&first_json, &shuffled.to_json_string().expect("serialize"));
        prop_assert_eq!(
            first.extension_ids(),
            ids.iter().cloned().collect::<Vec<_>>()
        );
    }
}
