use chrono::NaiveDate;
use notary_canonical::{ContentHash, TenantId};
use notary_client::{Credential, CredentialKind};
use notary_store::{StorageKey, StoreError};
use std::fmt;

/// Whether records are evidentiary (`Production`) or not (`Test`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Non-evidentiary records; the service accepts but does not ledger them.
    Test,
    /// Evidentiary records.
    Production,
}

impl Environment {
    /// Classifies a credential by its prefix alone.
    ///
    /// Only the reserved test prefix yields `Test`. Live keys and keys of any
    /// unrecognized shape are treated as `Production`, so an unexpected key
    /// never silently downgrades records to non-evidentiary storage.
    pub fn classify(credential: &Credential) -> Self {
        Self::from_kind(credential.kind())
    }

    /// Routing for an already classified credential.
    pub fn from_kind(kind: CredentialKind) -> Self {
        match kind {
            CredentialKind::Test => Environment::Test,
            CredentialKind::Live | CredentialKind::Unrecognized => Environment::Production,
        }
    }

    /// First segment of every storage key.
    pub fn key_segment(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "prod",
        }
    }

    /// Storage key `{env}/{tenant}/{yyyy}/{mm}/{dd}/{hash}.json`.
    ///
    /// Identical payloads map to identical keys, so re-submission overwrites
    /// with the same bytes.
    pub fn storage_key(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
        hash: &ContentHash,
    ) -> Result<StorageKey, StoreError> {
        StorageKey::parse(format!(
            "{}/{}/{}/{}.json",
            self.key_segment(),
            tenant,
            date.format("%Y/%m/%d"),
            hash
        ))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notary_canonical::hash_bytes;

    #[test]
    fn only_test_prefix_is_test() {
        assert_eq!(
            Environment::classify(&Credential::new("sk_asn_test_x")),
            Environment::Test
        );
        assert_eq!(
            Environment::classify(&Credential::new("sk_asn_live_x")),
            Environment::Production
        );
        assert_eq!(
            Environment::classify(&Credential::new("test_key")),
            Environment::Production
        );
        assert_eq!(
            Environment::classify(&Credential::new("sk_asn_tes")),
            Environment::Production
        );
    }

    #[test]
    fn key_layout_is_dated_and_content_addressed() {
        let hash = hash_bytes(b"abc");
        let key = Environment::Test
            .storage_key(
                &TenantId::parse("tnt_test").unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
                &hash,
            )
            .unwrap();
        assert_eq!(key.as_str(), format!("test/tnt_test/2025/03/09/{hash}.json"));
    }

    #[test]
    fn production_uses_prod_segment() {
        assert_eq!(Environment::Production.key_segment(), "prod");
        assert_eq!(Environment::Production.to_string(), "prod");
    }
}
