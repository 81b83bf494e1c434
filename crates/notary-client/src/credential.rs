//! API credentials and their environment prefixes.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Prefix reserved for test keys.
pub const TEST_KEY_PREFIX: &str = "sk_asn_test_";
/// Prefixes issued for live keys.
pub const LIVE_KEY_PREFIXES: [&str; 2] = ["sk_asn_live_", "sk_asn_prod_"];

/// What the credential prefix says about the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// `sk_asn_test_…`
    Test,
    /// `sk_asn_live_…` or `sk_asn_prod_…`
    Live,
    /// Any other shape.
    Unrecognized,
}

impl CredentialKind {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Test => "test",
            CredentialKind::Live => "live",
            CredentialKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque notarization API key.
///
/// The key is held as a secret; `Debug` shows only its kind.
pub struct Credential {
    secret: SecretString,
    kind: CredentialKind,
}

impl Credential {
    /// Wraps a raw API key.
    pub fn new(key: impl Into<String>) -> Self {
        let key: String = key.into();
        let kind = classify_prefix(&key);
        Self {
            secret: SecretString::from(key),
            kind,
        }
    }

    /// Kind derived from the key prefix, without any network call.
    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    /// Whether the key is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.secret.expose_secret().trim().is_empty()
    }

    pub(crate) fn expose(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn classify_prefix(key: &str) -> CredentialKind {
    if key.starts_with(TEST_KEY_PREFIX) {
        CredentialKind::Test
    } else if LIVE_KEY_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
        CredentialKind::Live
    } else {
        CredentialKind::Unrecognized
    }
}
