//! Merges extension contributions into the base configuration schema.
//!
//! Each contribution lands under `properties.extensions.properties.<id>` as
//! its raw validation fragment. Display metadata lives next to it under
//! `properties.extensions["x-contributions"].<id>` so it never participates
//! in validation.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::ExtensionContribution;

pub const EXTENSIONS_NAMESPACE: &str = "extensions";
pub const CONTRIBUTION_METADATA_KEY: &str = "x-contributions";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Enumerates supported `CompositionError` values.
pub enum CompositionError {
    #[error("duplicate extension contribution id '{id}'")]
    DuplicateContributionId { id: String },
    #[error("base config schema is invalid: {reason}")]
    InvalidBaseSchema { reason: String },
    #[error("base config schema already defines the '{namespace}' property")]
    NamespaceConflict { namespace: String },
    #[error("schema fragment for extension '{id}' must be a JSON object or boolean")]
    InvalidFragment { id: String },
}

#[derive(Debug, Clone, PartialEq)]
/// A fully merged configuration schema document.
pub struct ComposedSchema(Value);

impl ComposedSchema {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Ids present under the extension namespace, in key order.
    pub fn extension_ids(&self) -> Vec<String> {
        self.0
            .get("properties")
            .and_then(|properties| properties.get(EXTENSIONS_NAMESPACE))
            .and_then(|namespace| namespace.get("properties"))
            .and_then(Value::as_object)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn first_duplicate_id(contributions: &[ExtensionContribution]) -> Option<&str> {
    let mut seen = BTreeSet::new();
    contributions
        .iter()
        .map(|contribution| contribution.id.as_str())
        .find(|id| !seen.insert(*id))
}

fn contribution_metadata(contribution: &ExtensionContribution) -> Value {
    let mut metadata = Map::new();
    metadata.insert(
        "displayName".to_string(),
        Value::String(contribution.display_name.clone()),
    );
    if let Some(description) = &contribution.description {
        metadata.insert(
            "description".to_string(),
            Value::String(description.clone()),
        );
    }
    if let Some(ui_hints) = &contribution.ui_hints {
        metadata.insert("uiHints".to_string(), ui_hints.clone());
    }
    metadata.insert(
        "source".to_string(),
        Value::String(contribution.source.as_str().to_string()),
    );
    Value::Object(metadata)
}

/// Composes `base` with `contributions` into one namespaced schema document.
///
/// All checks run before the output is assembled, so an error never leaves a
/// partially merged document behind. Output is independent of contribution
/// order.
pub fn compose_config_schema(
    base: &Value,
    contributions: &[ExtensionContribution],
) -> Result<ComposedSchema, CompositionError> {
    if let Some(id) = first_duplicate_id(contributions) {
        return Err(CompositionError::DuplicateContributionId { id: id.to_string() });
    }
    let Some(base_object) = base.as_object() else {
        return Err(CompositionError::InvalidBaseSchema {
            reason: "root must be a JSON object".to_string(),
        });
    };
    let base_properties = match base_object.get("properties") {
        None => None,
        Some(Value::Object(properties)) => Some(properties),
        Some(_) => {
            return Err(CompositionError::InvalidBaseSchema {
                reason: "'properties' must be a JSON object".to_string(),
            })
        }
    };
    if contributions.is_empty() {
        return Ok(ComposedSchema(base.clone()));
    }
    if base_properties.is_some_and(|properties| properties.contains_key(EXTENSIONS_NAMESPACE)) {
        return Err(CompositionError::NamespaceConflict {
            namespace: EXTENSIONS_NAMESPACE.to_string(),
        });
    }
    if let Some(invalid) = contributions.iter().find(|contribution| {
        contribution
            .schema_fragment
            .as_ref()
            .is_some_and(|fragment| !fragment.is_object() && !fragment.is_boolean())
    }) {
        return Err(CompositionError::InvalidFragment {
            id: invalid.id.clone(),
        });
    }

    let mut ordered = contributions.iter().collect::<Vec<_>>();
    ordered.sort_by(|left, right| left.id.cmp(&right.id));

    let mut entries = Map::new();
    let mut metadata = Map::new();
    for contribution in ordered {
        let fragment = contribution
            .schema_fragment
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()));
        entries.insert(contribution.id.clone(), fragment);
        metadata.insert(
            contribution.id.clone(),
            contribution_metadata(contribution),
        );
    }

    let mut namespace = Map::new();
    namespace.insert("type".to_string(), Value::String("object".to_string()));
    namespace.insert(
        "title".to_string(),
        Value::String("Extensions".to_string()),
    );
    namespace.insert("properties".to_string(), Value::Object(entries));
    namespace.insert(
        CONTRIBUTION_METADATA_KEY.to_string(),
        Value::Object(metadata),
    );

    let mut properties = base_properties.cloned().unwrap_or_default();
    properties.insert(EXTENSIONS_NAMESPACE.to_string(), Value::Object(namespace));
    let mut document = base_object.clone();
    document.insert("properties".to_string(), Value::Object(properties));
    Ok(ComposedSchema(Value::Object(document)))
}

#[cfg(test)]
mod tests;
