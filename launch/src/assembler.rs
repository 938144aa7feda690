//! # Claims Assembler
//!
//! Runs every populator registered for a launch's message type concurrently
//! and reduces their contributions into one [`ClaimsDocument`].
//!
//! Assembly is all-or-nothing: the first populator error drops the other
//! in-flight populators and no document is produced. Dropping the returned
//! future has the same effect.

use std::sync::Arc;

use config::PlatformConfig;
use errors::LaunchError;
use futures_util::future::try_join_all;
use lti_core::claims as claim;
use lti_core::{LtiDataService, MessageScope};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::populators::{ClaimSet, Contribution, Populator, PopulatorInput};
use crate::substitution::CustomVariableEngine;
use crate::telemetry::Telemetry;
use crate::urls::UrlBuilder;

/// The unsigned launch payload, keyed by claim URI.
///
/// Keys are kept sorted, so two documents with the same claims serialize to
/// identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClaimsDocument(Map<String, Value>);

impl ClaimsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_json_string(&self) -> Result<String, LaunchError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub(crate) fn insert_new(&mut self, key: &'static str, value: Value) {
        let previous = self.0.insert(key.to_string(), value);
        debug_assert!(previous.is_none(), "claim {key} written twice");
    }

    fn merge_custom(&mut self, entries: Map<String, Value>) {
        let custom = self
            .0
            .entry(claim::CUSTOM)
            .or_insert_with(|| Value::Object(Map::new()));
        match custom {
            Value::Object(existing) => existing.extend(entries),
            other => *other = Value::Object(entries)
        }
    }
}

/// Folds contributions in order into a document.
///
/// Panics in debug builds when a populator writes a key it does not own or
/// a key another populator already wrote.
pub fn reduce(contributions: impl IntoIterator<Item = Contribution>) -> ClaimsDocument {
    let mut document = ClaimsDocument::new();

    for Contribution { populator, claims } in contributions {
        match claims {
            ClaimSet::Claims(entries) => {
                for (key, value) in entries {
                    debug_assert!(
                        populator.claim_keys().contains(&key),
                        "{populator} wrote claim {key} it does not own"
                    );
                    document.insert_new(key, value);
                }
            }
            ClaimSet::CustomMerge(entries) => document.merge_custom(entries),
            ClaimSet::Empty => debug!(populator = populator.name(), "Populator contributed nothing")
        }
    }

    document
}

#[derive(Clone)]
pub struct ClaimsAssembler {
    data: Arc<dyn LtiDataService>,
    urls: UrlBuilder,
    substitution: CustomVariableEngine
}

impl ClaimsAssembler {
    pub fn new(data: Arc<dyn LtiDataService>, config: Arc<PlatformConfig>) -> Self {
        Self {
            substitution: CustomVariableEngine::new(data.clone()),
            urls: UrlBuilder::new(config),
            data
        }
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    #[instrument(
        skip_all,
        fields(
            message_type = %scope.message_type(),
            deployment_id = %scope.deployment().id
        )
    )]
    pub async fn assemble(&self, scope: &MessageScope) -> Result<ClaimsDocument, LaunchError> {
        let populators = Populator::for_message_type(scope.message_type());
        let input = PopulatorInput {
            scope,
            data: self.data.as_ref(),
            urls: &self.urls,
            substitution: &self.substitution
        };

        match try_join_all(populators.iter().map(|p| p.populate(input))).await {
            Ok(contributions) => {
                let document = reduce(contributions);
                Telemetry::record_launch_assembled(scope.message_type().as_str());
                info!(claims = document.len(), "Assembled launch claims");
                Ok(document)
            }
            Err(e) => {
                Telemetry::record_failure(e.kind());
                warn!(error = %e, "Launch assembly failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn custom(entries: Value) -> Map<String, Value> {
        match entries {
            Value::Object(map) => map,
            _ => Map::new()
        }
    }

    #[test]
    fn test_reduce_collects_owned_claims() {
        let document = reduce([
            Contribution {
                populator: Populator::Context,
                claims: ClaimSet::Claims(vec![(claim::CONTEXT, json!({"id": "ctx-1"}))])
            },
            Contribution {
                populator: Populator::Platform,
                claims: ClaimSet::Empty
            },
        ]);

        assert_eq!(document.len(), 1);
        assert_eq!(document.get(claim::CONTEXT), Some(&json!({"id": "ctx-1"})));
        assert!(!document.contains_key(claim::TOOL_PLATFORM));
    }

    #[test]
    fn test_custom_merge_overwrites_existing_keys() {
        let document = reduce([
            Contribution {
                populator: Populator::Custom,
                claims: ClaimSet::CustomMerge(custom(json!({"a": "1", "b": "2"})))
            },
            Contribution {
                populator: Populator::Custom,
                claims: ClaimSet::CustomMerge(custom(json!({"b": "3"})))
            },
        ]);

        assert_eq!(document.get(claim::CUSTOM), Some(&json!({"a": "1", "b": "3"})));
    }

    #[test]
    #[should_panic(expected = "does not own")]
    #[cfg(debug_assertions)]
    fn test_reduce_rejects_foreign_key() {
        reduce([Contribution {
            populator: Populator::Roles,
            claims: ClaimSet::Claims(vec![(claim::CONTEXT, json!({}))])
        }]);
    }

    #[test]
    #[should_panic(expected = "written twice")]
    #[cfg(debug_assertions)]
    fn test_reduce_rejects_collision() {
        let claims = || ClaimSet::Claims(vec![(claim::CONTEXT, json!({}))]);
        reduce([
            Contribution {
                populator: Populator::Context,
                claims: claims()
            },
            Contribution {
                populator: Populator::Context,
                claims: claims()
            },
        ]);
    }

    #[test]
    fn test_serialization_is_key_sorted() {
        let document = reduce([Contribution {
            populator: Populator::UserIdentity,
            claims: ClaimSet::Claims(vec![
                (claim::SUB, json!("user-1")),
                (claim::EMAIL, json!("ada@example.com")),
            ])
        }]);
        assert_eq!(
            document.to_json_string().unwrap(),
            r#"{"email":"ada@example.com","sub":"user-1"}"#
        );
    }
}
