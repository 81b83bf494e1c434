//! Pipeline configuration.

use crate::environment::Environment;
use crate::errors::ConfigError;
use notary_canonical::TenantId;
use notary_client::{Credential, TenantField, DEFAULT_API_URL};
use std::time::Duration;

/// Default timeout applied to each network call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "NOTARY_API_KEY";
/// Environment variable holding the tenant identifier.
pub const ENV_TENANT: &str = "NOTARY_TENANT";
/// Environment variable holding the bucket name.
pub const ENV_BUCKET: &str = "NOTARY_BUCKET";
/// Environment variable overriding the notarization endpoint.
pub const ENV_API_URL: &str = "NOTARY_API_URL";
/// Environment variable overriding the timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "NOTARY_TIMEOUT_SECS";
/// Environment variable enabling debug diagnostics (`1`/`true`/`yes`).
pub const ENV_DEBUG: &str = "NOTARY_DEBUG";
/// Environment variable selecting the tenant field name (`slug`/`tenant_id`).
pub const ENV_TENANT_FIELD: &str = "NOTARY_TENANT_FIELD";

/// Settings for one notary pipeline.
#[derive(Debug)]
pub struct NotaryConfig {
    /// API key; its prefix selects test or production routing.
    pub credential: Credential,
    /// Tenant the records belong to.
    pub tenant: TenantId,
    /// Customer bucket receiving raw canonical records.
    pub bucket: String,
    /// Notarization endpoint (default: production service).
    pub api_url: String,
    /// Timeout per network call (default: 5 s).
    pub timeout: Duration,
    /// Surface canonical bytes and hashes for diagnostics (default: off).
    pub debug: bool,
    /// Wire name of the tenant field (default: `slug`).
    pub tenant_field: TenantField,
}

impl NotaryConfig {
    /// Creates a configuration with documented defaults for optional fields.
    pub fn new(credential: Credential, tenant: TenantId, bucket: impl Into<String>) -> Self {
        Self {
            credential,
            tenant,
            bucket: bucket.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            tenant_field: TenantField::default(),
        }
    }

    /// Overrides the notarization endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Overrides the network timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables debug diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Selects the tenant field name.
    pub fn with_tenant_field(mut self, tenant_field: TenantField) -> Self {
        self.tenant_field = tenant_field;
        self
    }

    /// Routing derived from the credential.
    pub fn environment(&self) -> Environment {
        Environment::classify(&self.credential)
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credential.is_blank() {
            return Err(ConfigError::Invalid {
                field: "credential",
                reason: "must not be empty".to_string(),
            });
        }
        TenantId::parse(self.tenant.as_str()).map_err(|e| ConfigError::Invalid {
            field: "tenant",
            reason: e.to_string(),
        })?;
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "bucket",
                reason: "must not be empty".to_string(),
            });
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Loads `.env` if present, then reads `NOTARY_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from any name → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let credential = Credential::new(required(ENV_API_KEY)?);
        let tenant = TenantId::parse(required(ENV_TENANT)?).map_err(|e| ConfigError::Invalid {
            field: ENV_TENANT,
            reason: e.to_string(),
        })?;
        let mut config = Self::new(credential, tenant, required(ENV_BUCKET)?);

        if let Some(api_url) = lookup(ENV_API_URL) {
            config.api_url = api_url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::Invalid {
                field: ENV_TIMEOUT_SECS,
                reason: format!("'{secs}' is not a whole number of seconds"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(&debug).ok_or_else(|| ConfigError::Invalid {
                field: ENV_DEBUG,
                reason: format!("'{debug}' is not a boolean"),
            })?;
        }
        if let Some(field) = lookup(ENV_TENANT_FIELD) {
            config.tenant_field = field.trim().parse().map_err(|reason| ConfigError::Invalid {
                field: ENV_TENANT_FIELD,
                reason,
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
