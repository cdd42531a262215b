use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::choice::find_choice;
use super::field::Field;
use super::form_state::FieldValue;
use super::schema::{Rule, rule_for};

/// A field that fails its schema rule. `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} wajib diisi", .0.label())]
    Empty(Field),
    #[error("Pilih {} yang tersedia", .0.label())]
    NotAllowed(Field),
    #[error("Tanggal lahir wajib diisi dengan format YYYY-MM-DD")]
    MissingDate(Field),
    #[error("Anda harus menyetujui syarat dan ketentuan")]
    MustAgree(Field),
}

impl ValidationError {
    /// Returns the field that failed.
    pub fn field(&self) -> Field {
        match self {
            Self::Empty(f) | Self::NotAllowed(f) | Self::MissingDate(f) | Self::MustAgree(f) => *f,
        }
    }
}

static NON_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("valid hardcoded regex"));

/// Validates a field value against the rule declared in the schema.
pub fn validate_field(field: Field, value: Option<&FieldValue>) -> Result<(), ValidationError> {
    match rule_for(field) {
        Rule::Required => match value {
            Some(FieldValue::Text(s)) if !s.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::Empty(field)),
        },
        Rule::OneOf(choices) => match value {
            Some(FieldValue::Text(code)) if find_choice(choices, code).is_some() => Ok(()),
            _ => Err(ValidationError::NotAllowed(field)),
        },
        Rule::Date => match value {
            Some(FieldValue::Date(_)) => Ok(()),
            _ => Err(ValidationError::MissingDate(field)),
        },
        Rule::MustBeTrue => match value {
            Some(FieldValue::Flag(true)) => Ok(()),
            _ => Err(ValidationError::MustAgree(field)),
        },
        Rule::Optional => Ok(()),
    }
}

/// Reduces a phone number to its digits, mapping the local `0` prefix to `62`.
///
/// Used to compare numbers typed with different punctuation (`0812-345`,
/// `+62 812 345`).
pub fn normalize_phone(phone: &str) -> String {
    let digits = NON_DIGIT_RE.replace_all(phone, "");
    match digits.strip_prefix('0') {
        Some(rest) => format!("62{rest}"),
        None => digits.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::model::choice::{GENDERS, PROGRAMS};
    use crate::model::schema::SCHEMA;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    // --- Required ---

    #[test]
    fn required_accepts_text() {
        assert_eq!(validate_field(Field::FullName, Some(&text("Ahmad"))), Ok(()));
    }

    #[test]
    fn required_rejects_empty() {
        assert_eq!(
            validate_field(Field::Phone, Some(&text(""))),
            Err(ValidationError::Empty(Field::Phone))
        );
    }

    #[test]
    fn required_rejects_whitespace() {
        assert_eq!(
            validate_field(Field::City, Some(&text("   "))),
            Err(ValidationError::Empty(Field::City))
        );
    }

    #[test]
    fn required_rejects_unset() {
        assert_eq!(
            validate_field(Field::FatherName, None),
            Err(ValidationError::Empty(Field::FatherName))
        );
    }

    #[test]
    fn empty_message_names_the_field() {
        let err = validate_field(Field::Phone, None).unwrap_err();
        assert_eq!(err.to_string(), "No. HP / WhatsApp wajib diisi");
    }

    #[test]
    fn every_required_field_rejects_empty_with_message() {
        for spec in SCHEMA.iter().filter(|s| s.rule.is_required()) {
            let err = validate_field(spec.field, Some(&text(""))).unwrap_err();
            assert_eq!(err.field(), spec.field);
            assert!(!err.to_string().is_empty());
        }
    }

    // --- OneOf ---

    #[test]
    fn enum_accepts_every_allowed_code() {
        for choice in GENDERS {
            assert_eq!(validate_field(Field::Gender, Some(&text(choice.code))), Ok(()));
        }
        for choice in PROGRAMS {
            assert_eq!(validate_field(Field::Program, Some(&text(choice.code))), Ok(()));
        }
    }

    #[test]
    fn enum_rejects_label_instead_of_code() {
        assert_eq!(
            validate_field(Field::Gender, Some(&text("Laki-laki"))),
            Err(ValidationError::NotAllowed(Field::Gender))
        );
    }

    #[test]
    fn enum_rejects_unset() {
        assert_eq!(
            validate_field(Field::Program, None),
            Err(ValidationError::NotAllowed(Field::Program))
        );
    }

    #[quickcheck]
    fn enum_rejects_anything_outside_the_set(s: String) -> bool {
        let allowed = GENDERS.iter().any(|c| c.code == s);
        validate_field(Field::Gender, Some(&FieldValue::Text(s))).is_ok() == allowed
    }

    // --- Date ---

    #[test]
    fn date_accepts_date() {
        let date = NaiveDate::from_ymd_opt(2012, 3, 14).unwrap();
        assert_eq!(
            validate_field(Field::DateOfBirth, Some(&FieldValue::Date(date))),
            Ok(())
        );
    }

    #[test]
    fn date_rejects_absent_or_text() {
        assert_eq!(
            validate_field(Field::DateOfBirth, None),
            Err(ValidationError::MissingDate(Field::DateOfBirth))
        );
        assert_eq!(
            validate_field(Field::DateOfBirth, Some(&text("2012-03-14"))),
            Err(ValidationError::MissingDate(Field::DateOfBirth))
        );
    }

    // --- MustBeTrue ---

    #[test]
    fn terms_accept_only_true() {
        assert_eq!(
            validate_field(Field::AgreeTerms, Some(&FieldValue::Flag(true))),
            Ok(())
        );
        assert_eq!(
            validate_field(Field::AgreeTerms, Some(&FieldValue::Flag(false))),
            Err(ValidationError::MustAgree(Field::AgreeTerms))
        );
        assert_eq!(
            validate_field(Field::AgreeTerms, None),
            Err(ValidationError::MustAgree(Field::AgreeTerms))
        );
        assert_eq!(
            validate_field(Field::AgreeTerms, Some(&text("true"))),
            Err(ValidationError::MustAgree(Field::AgreeTerms))
        );
    }

    // --- Optional ---

    #[quickcheck]
    fn optional_never_fails(s: String) -> bool {
        validate_field(Field::Notes, Some(&FieldValue::Text(s))).is_ok()
            && validate_field(Field::PostalCode, None).is_ok()
    }

    // --- normalize_phone ---

    #[test]
    fn phone_local_prefix_becomes_country_code() {
        assert_eq!(normalize_phone("0812-3456-789"), "628123456789");
    }

    #[test]
    fn phone_international_format_kept() {
        assert_eq!(normalize_phone("+62 812 3456 789"), "628123456789");
    }

    #[test]
    fn phone_empty() {
        assert_eq!(normalize_phone(""), "");
    }

    #[quickcheck]
    fn normalized_phone_is_all_digits(s: String) -> bool {
        normalize_phone(&s).chars().all(|c| c.is_ascii_digit())
    }
}
