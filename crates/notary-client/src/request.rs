//! Notarization request and receipt types.

use notary_canonical::{ContentHash, TenantId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// JSON field name that carries the tenant identifier.
///
/// Deployments of the service exist under both spellings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantField {
    /// `"slug"`
    #[default]
    Slug,
    /// `"tenant_id"`
    TenantId,
}

impl TenantField {
    /// Field name on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantField::Slug => "slug",
            TenantField::TenantId => "tenant_id",
        }
    }
}

impl fmt::Display for TenantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slug" => Ok(TenantField::Slug),
            "tenant_id" => Ok(TenantField::TenantId),
            other => Err(format!("unknown tenant field '{other}' (expected slug or tenant_id)")),
        }
    }
}

/// Hash submission for one stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct NotarizeRequest {
    /// Content hash of the stored canonical bytes.
    pub hash: ContentHash,
    /// Tenant the record belongs to.
    pub tenant: TenantId,
    /// Wire name of the tenant field.
    pub tenant_field: TenantField,
    /// Record metadata (session, sequence, timestamp, caller fields).
    pub metadata: Map<String, Value>,
}

impl NotarizeRequest {
    /// JSON body: `{"hash": …, "<tenant_field>": …, "metadata": {…}}`.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("hash".to_string(), Value::String(self.hash.to_string()));
        body.insert(
            self.tenant_field.as_str().to_string(),
            Value::String(self.tenant.to_string()),
        );
        body.insert("metadata".to_string(), Value::Object(self.metadata.clone()));
        Value::Object(body)
    }
}

/// Opaque proof token returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    /// Wraps a receipt token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Full token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for log lines.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Extracts the receipt from a 200 response body.
    pub fn from_response(body: &Value) -> Option<Self> {
        body.get("receipt")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(Receipt::new)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
