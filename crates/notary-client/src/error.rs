use thiserror::Error;

/// Errors from the notarization service.
#[derive(Error, Debug)]
pub enum NotarizationError {
    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(String),
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection or transport failure.
    #[error("connection error: {0}")]
    Transport(String),
    /// Non-200 response.
    #[error("service responded {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as diagnostic.
        body: String,
    },
    /// 200 response without a `receipt` field.
    #[error("response carried no receipt")]
    MissingReceipt,
    /// 200 response whose body is not JSON.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
    /// Failure reported by a non-HTTP client implementation.
    #[error("{0}")]
    Other(String),
}
