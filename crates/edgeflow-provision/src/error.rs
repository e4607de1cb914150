//! Provisioning error types

use edgeflow_api::ApiError;
use thiserror::Error;

/// Errors surfaced by the provisioning operations.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Network/HTTP failure unrelated to business rules. Never retried,
    /// surfaced immediately.
    #[error("API request failed: {0}")]
    Transport(#[source] ApiError),

    /// Backend rejected the request for business reasons. Fatal.
    #[error("{0}")]
    Validation(String),

    /// Site verification was still pending when the budget ran out.
    #[error("site verification timed out for '{domain}': {reason}")]
    VerificationTimeout { domain: String, reason: String },

    /// The backend reported a terminal failure for a certificate request.
    #[error("certificate request failed: {0}")]
    ProvisioningFailed(String),

    /// The external deadline or cancellation fired. Distinct from a
    /// timed-out budget.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<ApiError> for ProvisionError {
    fn from(err: ApiError) -> Self {
        if err.is_transport() {
            ProvisionError::Transport(err)
        } else {
            ProvisionError::Validation(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
