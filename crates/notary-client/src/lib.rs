//! Client side of the neutral notarization service.
//!
//! The service receives a content hash plus record metadata (never the record
//! itself) and answers with an opaque receipt. Receipts are not parsed or
//! verified locally.

#![deny(missing_docs)]

/// API credentials.
pub mod credential;
/// Error types for notarization.
pub mod error;
/// Blocking HTTP implementation.
pub mod http;
/// Request and receipt types.
pub mod request;

pub use credential::{Credential, CredentialKind, LIVE_KEY_PREFIXES, TEST_KEY_PREFIX};
pub use error::NotarizationError;
pub use http::{HttpNotaryClient, API_KEY_HEADER, DEFAULT_API_URL};
pub use request::{NotarizeRequest, Receipt, TenantField};

/// Service that time-stamps a content hash.
pub trait NotaryClient: Send + Sync {
    /// Submits one hash; returns the receipt on HTTP 200 with a receipt present.
    fn notarize(&self, request: &NotarizeRequest) -> Result<Receipt, NotarizationError>;
}

impl<C: NotaryClient + ?Sized> NotaryClient for std::sync::Arc<C> {
    fn notarize(&self, request: &NotarizeRequest) -> Result<Receipt, NotarizationError> {
        (**self).notarize(request)
    }
}

impl<C: NotaryClient + ?Sized> NotaryClient for Box<C> {
    fn notarize(&self, request: &NotarizeRequest) -> Result<Receipt, NotarizationError> {
        (**self).notarize(request)
    }
}
