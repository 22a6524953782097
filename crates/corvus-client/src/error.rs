//! Client error types.

use thiserror::Error;

/// Client error type.
///
/// The variants keep the outcomes a caller must tell apart distinct:
/// transport failures, structured errors returned by the service, build
/// failures, configuration mistakes and poll cancellation/deadline.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange itself failed (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A successfully transported response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service returned a non-2xx response with a structured error.
    #[error("remote error ({status}, {code}): {reason}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Service error code, e.g. `CLUSTERS-MGMT-404`.
        code: String,
        /// Human-readable reason from the service.
        reason: String,
        /// Identifier of the failed operation, when the service sent one.
        operation_id: Option<String>,
    },

    /// Finalizing a record builder failed.
    #[error(transparent)]
    Build(#[from] corvus_model::BuildError),

    /// The caller configured the client or a poll incorrectly. Reported
    /// before any network activity.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A poll's deadline passed before an acceptable result was fetched.
    #[error("deadline exceeded while polling")]
    DeadlineExceeded,

    /// The caller cancelled the poll's execution context.
    #[error("polling cancelled")]
    Cancelled,
}

impl Error {
    /// Check if this is a not-found error from the service.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Remote { status: 404, .. })
    }

    /// Check if this is a conflict error from the service.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Remote { status: 409, .. })
    }

    /// Check if this is a server-side error from the service.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Remote { status, .. } if *status >= 500)
    }

    /// Check if this is a poll deadline or cancellation outcome.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::DeadlineExceeded | Error::Cancelled)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the service for non-2xx responses.
///
/// Decoded leniently: a body that is not valid JSON, or is missing
/// fields, still yields a [`Error::Remote`] with what was available.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct RemoteErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
}

impl RemoteErrorBody {
    /// Turn a non-2xx response body into a structured remote error.
    pub(crate) fn into_error(self, status: u16) -> Error {
        Error::Remote {
            status,
            code: self.code.unwrap_or_else(|| "unknown".to_string()),
            reason: self.reason.unwrap_or_else(|| format!("HTTP {status}")),
            operation_id: self.operation_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_body_decoding() {
        let body: RemoteErrorBody = serde_json::from_str(
            r#"{"kind":"Error","code":"CLUSTERS-MGMT-404","reason":"not found","operation_id":"op-1"}"#,
        )
        .unwrap();
        let err = body.into_error(404);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("CLUSTERS-MGMT-404"));
    }

    #[test]
    fn test_undecodable_body_still_yields_remote_error() {
        let err = RemoteErrorBody::default().into_error(500);
        assert!(err.is_server_error());
        assert!(err.to_string().contains("HTTP 500"));
    }
}
