use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::field::Field;

/// The current value of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Flag(bool),
}

impl FieldValue {
    /// Returns the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Live values and per-field error messages of one registration session.
///
/// Every field starts out unset. Values change only through the setters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<Field, FieldValue>,
    errors: HashMap<Field, String>,
}

impl FormState {
    /// Creates an empty form state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value. `None` unsets the field.
    pub fn set(&mut self, field: Field, value: Option<FieldValue>) {
        match value {
            Some(v) => {
                self.values.insert(field, v);
            }
            None => {
                self.values.remove(&field);
            }
        }
    }

    /// Sets a text value. An empty string is stored as-is.
    pub fn set_text(&mut self, field: Field, text: impl Into<String>) {
        self.set(field, Some(FieldValue::Text(text.into())));
    }

    /// Sets or clears a date value.
    pub fn set_date(&mut self, field: Field, date: Option<NaiveDate>) {
        self.set(field, date.map(FieldValue::Date));
    }

    /// Sets a boolean value.
    pub fn set_flag(&mut self, field: Field, flag: bool) {
        self.set(field, Some(FieldValue::Flag(flag)));
    }

    /// Returns the value of a field, or `None` if it is unset.
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Returns the text of a field, or an empty string if unset or not text.
    pub fn text(&self, field: Field) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Returns the date of a field, if set.
    pub fn date(&self, field: Field) -> Option<NaiveDate> {
        match self.get(field) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    /// Returns `true` only if the field holds `Flag(true)`.
    pub fn flag(&self, field: Field) -> bool {
        matches!(self.get(field), Some(FieldValue::Flag(true)))
    }

    /// Returns the error message recorded for a field.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Records an error message for a field.
    pub fn set_error(&mut self, field: Field, message: String) {
        self.errors.insert(field, message);
    }

    /// Removes the error recorded for a field.
    pub fn clear_error(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Returns `true` if any field has an error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the fields that currently carry an error, in form order.
    pub fn fields_with_errors(&self) -> Vec<Field> {
        Field::all()
            .iter()
            .copied()
            .filter(|f| self.errors.contains_key(f))
            .collect()
    }
}
