use crate::model::Field;

/// A form snapshot that cannot be turned into an intake payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// A field that must be transmitted has no usable value.
    #[error("{} belum diisi", .0.label())]
    Missing(Field),
}

/// Errors that can occur while delivering a registration.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// No intake endpoint has been configured.
    #[error("intake endpoint is not configured")]
    NotConfigured,

    /// The HTTP request could not be sent or failed at transport level.
    #[error("could not reach intake endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The background delivery task ended without producing a result.
    #[error("delivery task aborted: {0}")]
    Aborted(String),
}
