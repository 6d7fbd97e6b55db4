//! Canonical JSON representation of authorization results
//!
//! One-way only: results are produced locally and handed to consumers, so
//! there is no matching deserializer.

use chrono::SecondsFormat;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::outcome::Outcome;
use super::result::AuthorizationResult;

/// Post-processing hook for callers that need extra fields.
pub type JsonCustomizer<'a, O> =
    &'a dyn Fn(&AuthorizationResult<O>, Map<String, Value>) -> Map<String, Value>;

impl<O: Outcome> AuthorizationResult<O> {
    /// Serialize into the canonical shape. `@context` is left out when the
    /// result is `embedded` in a parent document; absent fields are omitted.
    pub fn to_json(&self, embedded: bool, customizer: Option<JsonCustomizer<'_, O>>) -> Value {
        let mut json = Map::new();

        if !embedded {
            json.insert("@context".into(), Value::from(O::JSON_LD_CONTEXT));
        }

        json.insert("result".into(), Value::from(self.outcome().as_str()));

        if let Some(eol) = self.cached_result_end_of_life() {
            json.insert(
                "cachedResultEndOfLifeTime".into(),
                Value::from(eol.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }

        if let Some(session_id) = self.session_id() {
            json.insert("sessionId".into(), Value::from(session_id.as_str()));
        }

        if let Some(provider_id) = self.provider_id() {
            json.insert("providerId".into(), Value::from(provider_id.as_str()));
        }

        json.insert(
            "authorizatorId".into(),
            Value::from(self.authorizator_id().as_str()),
        );

        if !self.description().is_empty() {
            json.insert("description".into(), i18n_json(self.description()));
        }

        if !self.additional_info().is_empty() {
            json.insert("additionalInfo".into(), i18n_json(self.additional_info()));
        }

        if let Some(runtime) = self.runtime() {
            let millis = u64::try_from(runtime.as_millis()).unwrap_or(u64::MAX);
            json.insert("runtime".into(), Value::from(millis));
        }

        let json = match customizer {
            Some(customize) => customize(self, json),
            None => json,
        };

        Value::Object(json)
    }
}

fn i18n_json(text: &crate::domain::i18n::I18nString) -> Value {
    Value::Object(
        text.iter()
            .map(|(language, text)| (language.to_string(), Value::from(text)))
            .collect(),
    )
}

/// Serializes the embedded shape (without `@context`).
impl<O: Outcome> Serialize for AuthorizationResult<O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json(true, None).serialize(serializer)
    }
}
