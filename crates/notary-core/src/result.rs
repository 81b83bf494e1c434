use crate::errors::CommitError;
use notary_canonical::{ContentHash, Timestamp};
use notary_client::{NotarizationError, Receipt};
use notary_store::StorageKey;
use serde_json::{json, Value};
use uuid::Uuid;

/// What was written to storage for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedRecord {
    /// Object key in the customer bucket.
    pub key: StorageKey,
    /// Hash of the stored canonical bytes.
    pub hash: ContentHash,
    /// Session the record belongs to.
    pub session_id: Uuid,
    /// Sequence number of the record.
    pub sequence: u64,
    /// Payload timestamp.
    pub timestamp: Timestamp,
    /// Canonical bytes, only when debug diagnostics are enabled.
    pub canonical: Option<Vec<u8>>,
}

/// Outcome of one dual-write.
#[derive(Debug)]
pub enum CommitResult {
    /// Stored and notarized.
    FullSuccess {
        /// Receipt issued by the notarization service.
        receipt: Receipt,
        /// Stored record.
        record: CommittedRecord,
    },
    /// Stored, but the neutral timestamp is missing.
    StorageOnlySuccess {
        /// Stored record.
        record: CommittedRecord,
        /// Why notarization failed.
        error: NotarizationError,
    },
    /// Nothing was recorded.
    TotalFailure {
        /// Sequence number consumed by the failed record.
        sequence: u64,
        /// Why nothing was recorded.
        error: CommitError,
    },
}

impl CommitResult {
    /// Whether the evidence is in storage.
    pub fn is_stored(&self) -> bool {
        !matches!(self, CommitResult::TotalFailure { .. })
    }

    /// Whether the record was both stored and notarized.
    pub fn is_notarized(&self) -> bool {
        matches!(self, CommitResult::FullSuccess { .. })
    }

    /// Receipt, if notarized.
    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            CommitResult::FullSuccess { receipt, .. } => Some(receipt),
            _ => None,
        }
    }

    /// Stored record, if any.
    pub fn record(&self) -> Option<&CommittedRecord> {
        match self {
            CommitResult::FullSuccess { record, .. }
            | CommitResult::StorageOnlySuccess { record, .. } => Some(record),
            CommitResult::TotalFailure { .. } => None,
        }
    }

    /// Sequence number the record consumed.
    pub fn sequence(&self) -> u64 {
        match self {
            CommitResult::FullSuccess { record, .. }
            | CommitResult::StorageOnlySuccess { record, .. } => record.sequence,
            CommitResult::TotalFailure { sequence, .. } => *sequence,
        }
    }

    /// Stable outcome name.
    pub fn status(&self) -> &'static str {
        match self {
            CommitResult::FullSuccess { .. } => "full_success",
            CommitResult::StorageOnlySuccess { .. } => "storage_only_success",
            CommitResult::TotalFailure { .. } => "total_failure",
        }
    }

    /// JSON summary for audit trails and CLI output.
    pub fn to_json(&self) -> Value {
        let mut summary = json!({
            "status": self.status(),
            "sequence": self.sequence(),
        });
        if let Some(record) = self.record() {
            summary["session_id"] = json!(record.session_id.to_string());
            summary["key"] = json!(record.key.as_str());
            summary["hash"] = json!(record.hash.as_str());
            summary["timestamp"] = json!(record.timestamp.as_str());
            if let Some(canonical) = &record.canonical {
                summary["canonical"] = json!(String::from_utf8_lossy(canonical));
            }
        }
        match self {
            CommitResult::FullSuccess { receipt, .. } => {
                summary["receipt"] = json!(receipt.as_str());
            }
            CommitResult::StorageOnlySuccess { error, .. } => {
                summary["error"] = json!(error.to_string());
            }
            CommitResult::TotalFailure { error, .. } => {
                summary["error"] = json!(error.to_string());
            }
        }
        summary
    }
}
