use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::PayloadError;
use crate::model::{Field, FormState, Rule, SCHEMA, find_choice};

/// Sent in place of optional fields the applicant left blank.
pub const PLACEHOLDER: &str = "-";

/// Key of the submission timestamp in the wire object.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// The flat JSON object posted to the intake endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(skip)]
    submitted_at: DateTime<Utc>,
}

impl Payload {
    /// Returns the wire value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the wire value of a string field, or `""`.
    pub fn str_value(&self, field: Field) -> &str {
        self.get(field.wire_key())
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Returns the time the payload was built.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Returns the number of keys in the wire object, timestamp included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Maps a form snapshot to the intake wire shape.
///
/// Enum codes become their display labels, blank optional fields become
/// [`PLACEHOLDER`], dates are written as `YYYY-MM-DD`, and the submission
/// time is attached under [`TIMESTAMP_KEY`]. Does not modify `state`.
pub fn build_payload(state: &FormState, now: DateTime<Utc>) -> Result<Payload, PayloadError> {
    let mut fields = Map::new();

    for spec in SCHEMA {
        let field = spec.field;
        let value = match spec.rule {
            Rule::Required => {
                let text = state.text(field).trim();
                if text.is_empty() {
                    return Err(PayloadError::Missing(field));
                }
                Value::String(text.to_string())
            }
            Rule::OneOf(choices) => {
                let choice = find_choice(choices, state.text(field))
                    .ok_or(PayloadError::Missing(field))?;
                Value::String(choice.label.to_string())
            }
            Rule::Date => {
                let date = state.date(field).ok_or(PayloadError::Missing(field))?;
                Value::String(date.format("%Y-%m-%d").to_string())
            }
            Rule::MustBeTrue => {
                if !state.flag(field) {
                    return Err(PayloadError::Missing(field));
                }
                Value::Bool(true)
            }
            Rule::Optional => {
                let text = state.text(field).trim();
                let text = if text.is_empty() { PLACEHOLDER } else { text };
                Value::String(text.to_string())
            }
        };
        fields.insert(field.wire_key().to_string(), value);
    }

    fields.insert(
        TIMESTAMP_KEY.to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );

    Ok(Payload {
        fields,
        submitted_at: now,
    })
}
