use crate::record::InteractionRecord;
use crate::session::SessionTicket;
use chrono::{DateTime, SecondsFormat, Utc};
use notary_canonical::{TenantId, Timestamp};
use notary_client::TenantField;
use serde_json::{Map, Value};

/// Metadata keys owned by the pipeline, besides both tenant field spellings.
pub const RESERVED_KEYS: [&str; 3] = ["session_id", "sequence", "timestamp"];

/// The exact value that is canonicalized and hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// Pipeline metadata followed by caller metadata.
    pub metadata: Map<String, Value>,
    /// Record input.
    pub input: Value,
    /// Record output.
    pub output: Value,
}

impl Payload {
    /// Builds the payload for one record.
    ///
    /// Returns the payload plus the caller metadata keys that were dropped
    /// because they collide with pipeline-owned keys.
    pub fn build(
        record: &InteractionRecord,
        ticket: &SessionTicket,
        now: DateTime<Utc>,
        tenant: &TenantId,
        tenant_field: TenantField,
    ) -> (Self, Vec<String>) {
        let mut metadata = Map::new();
        metadata.insert(
            "session_id".to_string(),
            Value::String(ticket.session_id.to_string()),
        );
        metadata.insert("sequence".to_string(), Value::from(ticket.sequence));
        metadata.insert(
            "timestamp".to_string(),
            Value::String(format_timestamp(now).to_string()),
        );
        metadata.insert(
            tenant_field.as_str().to_string(),
            Value::String(tenant.to_string()),
        );

        let mut dropped = Vec::new();
        for (key, value) in &record.metadata {
            if metadata.contains_key(key) || is_reserved(key) {
                dropped.push(key.clone());
                continue;
            }
            metadata.insert(key.clone(), value.clone());
        }

        let payload = Self {
            metadata,
            input: record.input.clone(),
            output: record.output.clone(),
        };
        (payload, dropped)
    }

    /// `{"metadata": …, "input": …, "output": …}`
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("metadata".to_string(), Value::Object(self.metadata.clone()));
        map.insert("input".to_string(), self.input.clone());
        map.insert("output".to_string(), self.output.clone());
        Value::Object(map)
    }
}

/// RFC 3339 UTC with microseconds and a `Z` suffix.
pub fn format_timestamp(now: DateTime<Utc>) -> Timestamp {
    Timestamp::new(now.to_rfc3339_opts(SecondsFormat::Micros, true))
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
        || key == TenantField::Slug.as_str()
        || key == TenantField::TenantId.as_str()
}
