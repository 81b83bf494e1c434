use notary_canonical::EncodingError;
use notary_store::StoreError;
use thiserror::Error;

/// Why nothing was recorded.
#[derive(Error, Debug)]
pub enum CommitError {
    /// The payload has no canonical form; a caller defect, not retryable.
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),
    /// The storage write failed; notarization was not attempted.
    #[error("storage write failed: {0}")]
    Storage(#[from] StoreError),
}

/// Invalid or incomplete configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("missing required setting {0}")]
    Missing(&'static str),
    /// A setting has an unusable value.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The notary client could not be built from the configuration.
    #[error("notary client setup failed: {0}")]
    Client(#[from] notary_client::NotarizationError),
}
