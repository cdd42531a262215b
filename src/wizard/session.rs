use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use super::error::WizardError;
use crate::intake::{Intake, IntakeError, Payload, PayloadError, build_payload};
use crate::model::{
    Field, FieldValue, FormState, STEP_COUNT, owning_step, step, validate_field,
};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// One of the input steps, `1..=STEP_COUNT`.
    Step(u8),
    /// Terminal state after a delivered submission.
    Success,
}

#[mutants::skip]
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(n) => write!(f, "step {n}"),
            Self::Success => f.write_str("success"),
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The position changed; the view should scroll back to the top.
    Moved,
    /// Validation failed; errors are on the form state.
    Stayed,
}

/// One registration session: position, form values, and submission flag.
#[derive(Debug, Clone)]
pub struct WizardSession {
    position: Position,
    submitting: bool,
    state: FormState,
    notice: Option<String>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Creates a session on step 1 with an empty form.
    pub fn new() -> Self {
        Self {
            position: Position::Step(1),
            submitting: false,
            state: FormState::new(),
            notice: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns the form values and errors.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the last user-facing message (failed submission, missing terms).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_value(&mut self, field: Field, value: Option<FieldValue>) {
        self.state.set(field, value);
    }

    pub fn set_text(&mut self, field: Field, text: impl Into<String>) {
        self.state.set_text(field, text);
    }

    pub fn set_date(&mut self, field: Field, date: Option<NaiveDate>) {
        self.state.set_date(field, date);
    }

    pub fn set_flag(&mut self, field: Field, flag: bool) {
        self.state.set_flag(field, flag);
    }

    /// Validates only the fields owned by step `ordinal`, replacing their errors.
    ///
    /// Errors on other steps' fields are left untouched.
    fn validate_step(&mut self, ordinal: u8) -> bool {
        let Some(definition) = step(ordinal) else {
            return false;
        };
        let mut valid = true;
        for &field in definition.fields {
            self.state.clear_error(field);
            if let Err(e) = validate_field(field, self.state.get(field)) {
                self.state.set_error(field, e.to_string());
                valid = false;
            }
        }
        valid
    }

    /// Moves to the next step if every field of the current step is valid.
    ///
    /// Only defined for steps `1..STEP_COUNT`; the last step is left through
    /// [`submit`](Self::submit).
    pub fn advance(&mut self) -> Result<Navigation, WizardError> {
        match self.position {
            Position::Step(n) if n < STEP_COUNT => {
                if self.validate_step(n) {
                    self.position = Position::Step(n + 1);
                    self.notice = None;
                    info!(from = n, to = n + 1, "wizard advanced");
                    Ok(Navigation::Moved)
                } else {
                    info!(step = n, errors = ?self.state.fields_with_errors(), "step invalid");
                    Ok(Navigation::Stayed)
                }
            }
            from => Err(WizardError::InvalidTransition {
                action: "advance",
                from,
            }),
        }
    }

    /// Moves to the previous step without validating anything.
    pub fn retreat(&mut self) -> Result<Navigation, WizardError> {
        match self.position {
            Position::Step(n) if n > 1 && !self.submitting => {
                self.position = Position::Step(n - 1);
                self.notice = None;
                info!(from = n, to = n - 1, "wizard retreated");
                Ok(Navigation::Moved)
            }
            from => Err(WizardError::InvalidTransition {
                action: "retreat",
                from,
            }),
        }
    }

    /// Checks the submit preconditions and snapshots the form into a payload.
    ///
    /// On success the submitting flag is set; the caller must deliver the
    /// payload and report back through [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<Payload, WizardError> {
        if self.position != Position::Step(STEP_COUNT) {
            return Err(WizardError::InvalidTransition {
                action: "submit",
                from: self.position,
            });
        }
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        if !self.validate_step(STEP_COUNT) {
            let message = self
                .state
                .error(Field::AgreeTerms)
                .unwrap_or("Anda harus menyetujui syarat dan ketentuan")
                .to_string();
            self.notice = Some(message);
            return Err(WizardError::TermsNotAccepted);
        }

        let payload = match build_payload(&self.state, now) {
            Ok(payload) => payload,
            Err(e) => {
                let PayloadError::Missing(field) = e;
                self.notice = Some(match owning_step(field) {
                    Some(owner) => format!(
                        "Data belum lengkap: {e} (langkah {}: {})",
                        owner.ordinal, owner.label
                    ),
                    None => format!("Data belum lengkap: {e}"),
                });
                return Err(e.into());
            }
        };

        self.submitting = true;
        self.notice = None;
        info!("submission started");
        Ok(payload)
    }

    /// Applies the result of a delivery started with [`begin_submit`](Self::begin_submit).
    ///
    /// Success moves to [`Position::Success`]. Failure keeps the form, stays
    /// on the last step, and records a notice inviting a retry. Without a
    /// delivery in flight on the last step this is an invalid transition and
    /// nothing changes.
    pub fn finish_submit(&mut self, result: Result<(), IntakeError>) -> Result<Navigation, WizardError> {
        if !self.submitting || self.position != Position::Step(STEP_COUNT) {
            return Err(WizardError::InvalidTransition {
                action: "finish submit",
                from: self.position,
            });
        }
        self.submitting = false;
        match result {
            Ok(()) => {
                self.position = Position::Success;
                self.notice = None;
                info!("submission succeeded");
                Ok(Navigation::Moved)
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.notice = Some(format!(
                    "Pendaftaran gagal dikirim ({e}). Data Anda tetap tersimpan; tekan Enter untuk mencoba lagi."
                ));
                Err(e.into())
            }
        }
    }

    /// Validates the terms, delivers the payload, and applies the result.
    pub async fn submit<I: Intake>(
        &mut self,
        intake: &I,
        now: DateTime<Utc>,
    ) -> Result<Navigation, WizardError> {
        let payload = self.begin_submit(now)?;
        let result = intake.deliver(&payload).await;
        self.finish_submit(result)
    }
}
