use super::session::Position;
use crate::intake::{IntakeError, PayloadError};

/// Errors returned by wizard transitions.
///
/// Field validation failures are not errors here: they are recorded on the
/// form state and reported as [`Navigation::Stayed`](super::Navigation::Stayed).
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The transition is not defined for the current position.
    #[error("cannot {action} from {from}")]
    InvalidTransition {
        action: &'static str,
        from: Position,
    },

    /// Submission was requested without accepting the terms.
    #[error("terms and conditions have not been accepted")]
    TermsNotAccepted,

    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The form could not be mapped to the wire shape.
    #[error("incomplete registration: {0}")]
    Incomplete(#[from] PayloadError),

    /// The intake delivery failed; the form is kept for a retry.
    #[error("delivery failed: {0}")]
    Delivery(#[from] IntakeError),
}
