//! Single entry point used by framework adapters.

use crate::clock::Clock;
use crate::config::NotaryConfig;
use crate::coordinator::DualWriteCoordinator;
use crate::environment::Environment;
use crate::errors::ConfigError;
use crate::record::InteractionRecord;
use crate::result::CommitResult;
use crate::session::SessionContext;
use notary_canonical::TenantId;
use notary_client::{CredentialKind, HttpNotaryClient, NotaryClient, TenantField};
use notary_store::StorageSink;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Notary pipeline for one session: canonicalize → hash → dual-write.
///
/// # Example
///
/// ```rust
/// use notary_canonical::TenantId;
/// use notary_client::{Credential, NotarizationError, NotarizeRequest, NotaryClient, Receipt};
/// use notary_core::{NotaryConfig, NotaryCore};
/// use notary_store::MemoryStorageSink;
/// use serde_json::{json, Map};
///
/// struct Offline;
/// impl NotaryClient for Offline {
///     fn notarize(&self, _: &NotarizeRequest) -> Result<Receipt, NotarizationError> {
///         Err(NotarizationError::Other("offline".into()))
///     }
/// }
///
/// let config = NotaryConfig::new(
///     Credential::new("sk_asn_test_demo"),
///     TenantId::parse("tnt_demo")?,
///     "demo-bucket",
/// );
/// let core = NotaryCore::new(config, MemoryStorageSink::new("demo"), Offline)?;
/// let result = core.log_interaction(json!({"q": "ping"}), json!({"text": "pong"}), Map::new());
/// assert!(result.is_stored());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct NotaryCore<S, C> {
    coordinator: DualWriteCoordinator<S, C>,
    session: SessionContext,
    tenant: TenantId,
    bucket: String,
}

impl<S: StorageSink, C: NotaryClient> NotaryCore<S, C> {
    /// Builds a pipeline with injected storage and notary backends.
    ///
    /// The credential in `config` is used here only for environment
    /// classification; the notary client carries its own copy.
    pub fn new(config: NotaryConfig, storage: S, notary: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let kind = config.credential.kind();
        Ok(Self::assemble(
            kind,
            config.tenant,
            config.bucket,
            config.tenant_field,
            config.debug,
            storage,
            notary,
        ))
    }

    fn assemble(
        kind: CredentialKind,
        tenant: TenantId,
        bucket: String,
        tenant_field: TenantField,
        debug: bool,
        storage: S,
        notary: C,
    ) -> Self {
        match kind {
            CredentialKind::Test => {
                info!(tenant = %tenant, "running in test mode; records will not be notarized")
            }
            CredentialKind::Unrecognized => {
                warn!("credential prefix not recognized; routing records as production")
            }
            CredentialKind::Live => {}
        }

        let coordinator = DualWriteCoordinator::new(
            storage,
            notary,
            tenant.clone(),
            tenant_field,
            Environment::from_kind(kind),
        )
        .with_debug(debug);

        Self {
            coordinator,
            session: SessionContext::new(),
            tenant,
            bucket,
        }
    }

    /// Replaces the clock used for timestamps and key dates.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.coordinator = self.coordinator.with_clock(clock);
        self
    }

    /// Replaces the session context.
    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    /// Logs one interaction. Never panics or returns an error; every
    /// outcome is a [`CommitResult`].
    pub fn log_interaction(
        &self,
        input: Value,
        output: Value,
        metadata: Map<String, Value>,
    ) -> CommitResult {
        self.log_record(&InteractionRecord::new(input, output).with_metadata(metadata))
    }

    /// Logs a prepared record.
    pub fn log_record(&self, record: &InteractionRecord) -> CommitResult {
        self.coordinator.commit(record, &self.session)
    }

    /// Session shared by every record logged through this pipeline.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Routing derived from the credential.
    pub fn environment(&self) -> Environment {
        self.coordinator.environment()
    }

    /// Tenant.
    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// Bucket name from the configuration.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Underlying coordinator.
    pub fn coordinator(&self) -> &DualWriteCoordinator<S, C> {
        &self.coordinator
    }
}

impl<S: StorageSink> NotaryCore<S, HttpNotaryClient> {
    /// Builds a pipeline that notarizes over HTTP at `config.api_url`.
    pub fn from_config(config: NotaryConfig, storage: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let kind = config.credential.kind();
        let notary = HttpNotaryClient::new(config.api_url, config.credential, config.timeout)?;
        Ok(Self::assemble(
            kind,
            config.tenant,
            config.bucket,
            config.tenant_field,
            config.debug,
            storage,
            notary,
        ))
    }
}
