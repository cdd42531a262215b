/// Errors returned by the hosted content backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// No backend URL has been configured.
    #[error("backend is not configured")]
    NotConfigured,

    #[error("could not reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// Sign-in was refused for the given email and password.
    #[error("Email atau kata sandi salah")]
    InvalidCredentials,

    /// The access token was rejected, usually because it expired.
    #[error("Sesi berakhir, silakan masuk kembali")]
    Unauthorized,

    #[error("backend responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A write that should echo the stored record returned nothing.
    #[error("backend returned no record")]
    EmptyResponse,
}
