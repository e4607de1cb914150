//! Management API error types

use thiserror::Error;

/// Errors returned by the management API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status} - {message}")]
    Status { status: u16, message: String },

    #[error("could not authenticate against the API: {0}")]
    AuthenticationFailed(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Domain-ownership verification has not passed yet. The creation call
    /// may be retried once the verification record or file is in place.
    #[error("site verification pending: {message}")]
    SiteVerification { message: String },

    /// The backend already knows this domain. Callers can resolve the
    /// existing site by domain instead of failing.
    #[error("site already exists: {message}")]
    SiteExists { message: String },

    #[error("site not owned: {0}")]
    SiteNotOwned(String),
}

impl ApiError {
    /// True for network/HTTP failures unrelated to business rules.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
