//! Declarative validation rules for every registration field.

use super::choice::{BOARDING_OPTIONS, Choice, EDUCATION_LEVELS, GENDERS, PROGRAMS};
use super::field::Field;

/// How a field's value is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty free text.
    Required,
    /// One of a closed set of codes.
    OneOf(&'static [Choice]),
    /// A calendar date must be present.
    Date,
    /// Must be exactly `true`.
    MustBeTrue,
    /// Free text that may be left blank.
    Optional,
}

impl Rule {
    /// Returns `true` for every rule that can fail.
    pub fn is_required(&self) -> bool {
        !matches!(self, Rule::Optional)
    }
}

/// One schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub rule: Rule,
}

const fn spec(field: Field, rule: Rule) -> FieldSpec {
    FieldSpec { field, rule }
}

/// The registration schema, in form order.
pub static SCHEMA: &[FieldSpec] = &[
    spec(Field::FullName, Rule::Required),
    spec(Field::Gender, Rule::OneOf(GENDERS)),
    spec(Field::PlaceOfBirth, Rule::Required),
    spec(Field::DateOfBirth, Rule::Date),
    spec(Field::Phone, Rule::Required),
    spec(Field::Address, Rule::Required),
    spec(Field::City, Rule::Required),
    spec(Field::Province, Rule::Required),
    spec(Field::PostalCode, Rule::Optional),
    spec(Field::FatherName, Rule::Required),
    spec(Field::MotherName, Rule::Required),
    spec(Field::ParentPhone, Rule::Required),
    spec(Field::ParentOccupation, Rule::Optional),
    spec(Field::PreviousSchool, Rule::Required),
    spec(Field::LastEducation, Rule::OneOf(EDUCATION_LEVELS)),
    spec(Field::Program, Rule::OneOf(PROGRAMS)),
    spec(Field::Boarding, Rule::OneOf(BOARDING_OPTIONS)),
    spec(Field::Notes, Rule::Optional),
    spec(Field::AgreeTerms, Rule::MustBeTrue),
];

/// Returns the rule declared for a field.
pub fn rule_for(field: Field) -> Rule {
    SCHEMA
        .iter()
        .find(|s| s.field == field)
        .map_or(Rule::Optional, |s| s.rule)
}
