//! Ordered dual-write: storage first, then notarization.

use crate::clock::{Clock, SystemClock};
use crate::environment::Environment;
use crate::errors::CommitError;
use crate::payload::{format_timestamp, Payload};
use crate::record::InteractionRecord;
use crate::result::{CommitResult, CommittedRecord};
use crate::session::SessionContext;
use notary_canonical::{hash, Canonicalizer, TenantId};
use notary_client::{NotarizeRequest, NotaryClient, TenantField};
use notary_store::{PutRequest, StorageSink};
use tracing::{debug, warn};

/// Tag name under which the content hash is recorded on the stored object.
pub const HASH_TAG: &str = "hash";

/// Writes each record to the customer bucket, then submits its hash for
/// notarization.
///
/// Evidence must exist before a timestamp attesting to it is requested, so a
/// failed storage write ends the commit without contacting the notary. A
/// failed notarization after a successful write is reported as
/// [`CommitResult::StorageOnlySuccess`].
pub struct DualWriteCoordinator<S, C> {
    storage: S,
    notary: C,
    tenant: TenantId,
    tenant_field: TenantField,
    environment: Environment,
    canonicalizer: Canonicalizer,
    clock: Box<dyn Clock>,
    debug: bool,
}

impl<S: StorageSink, C: NotaryClient> DualWriteCoordinator<S, C> {
    /// Creates a coordinator using the wall clock.
    pub fn new(
        storage: S,
        notary: C,
        tenant: TenantId,
        tenant_field: TenantField,
        environment: Environment,
    ) -> Self {
        Self {
            storage,
            notary,
            tenant,
            tenant_field,
            environment,
            canonicalizer: Canonicalizer::new(),
            clock: Box::new(SystemClock),
            debug: false,
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Enables debug diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replaces the canonicalizer.
    pub fn with_canonicalizer(mut self, canonicalizer: Canonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    /// Routing used for storage keys.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Clock used for timestamps and key dates.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Notary client.
    pub fn notary(&self) -> &C {
        &self.notary
    }

    /// Commits one record under the next sequence number of `session`.
    pub fn commit(&self, record: &InteractionRecord, session: &SessionContext) -> CommitResult {
        let ticket = session.next();
        let now = self.clock.now();

        let (payload, dropped) =
            Payload::build(record, &ticket, now, &self.tenant, self.tenant_field);
        for key in dropped {
            warn!(key = %key, sequence = ticket.sequence, "ignoring caller metadata that shadows a reserved key");
        }

        let canonical = match self.canonicalizer.canonicalize(&payload.to_value()) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(sequence = ticket.sequence, error = %error, "record has no canonical encoding");
                return CommitResult::TotalFailure {
                    sequence: ticket.sequence,
                    error: CommitError::Encoding(error),
                };
            }
        };
        let content_hash = hash(&canonical);
        if self.debug {
            debug!(canonical = %canonical, "data to hash");
            debug!(hash = %content_hash, "content hash");
        }

        let key = match self
            .environment
            .storage_key(&self.tenant, now.date_naive(), &content_hash)
        {
            Ok(key) => key,
            Err(error) => {
                return CommitResult::TotalFailure {
                    sequence: ticket.sequence,
                    error: CommitError::Storage(error),
                }
            }
        };

        let put = PutRequest::json(key.clone(), canonical.as_bytes().to_vec())
            .with_tag(HASH_TAG, content_hash.as_str());
        if let Err(error) = self.storage.put(&put) {
            warn!(
                location = %self.storage.location(),
                key = %key,
                error = %error,
                "storage write failed; skipping notarization"
            );
            return CommitResult::TotalFailure {
                sequence: ticket.sequence,
                error: CommitError::Storage(error),
            };
        }
        debug!(location = %self.storage.location(), key = %key, "evidence stored");

        let committed = CommittedRecord {
            key,
            hash: content_hash.clone(),
            session_id: ticket.session_id,
            sequence: ticket.sequence,
            timestamp: format_timestamp(now),
            canonical: self.debug.then(|| canonical.into_vec()),
        };

        let request = NotarizeRequest {
            hash: content_hash,
            tenant: self.tenant.clone(),
            tenant_field: self.tenant_field,
            metadata: payload.metadata,
        };
        match self.notary.notarize(&request) {
            Ok(receipt) => {
                debug!(receipt = %receipt.prefix(), sequence = ticket.sequence, "record notarized");
                CommitResult::FullSuccess {
                    receipt,
                    record: committed,
                }
            }
            Err(error) => {
                warn!(
                    key = %committed.key,
                    error = %error,
                    "notarization failed; evidence stored without neutral timestamp"
                );
                CommitResult::StorageOnlySuccess {
                    record: committed,
                    error,
                }
            }
        }
    }
}
