#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use notary_canonical::TenantId;
use notary_client::{Credential, NotarizationError, NotarizeRequest, NotaryClient, Receipt};
use notary_core::NotaryConfig;
use notary_store::{
    MemoryStorageSink, PutRequest, StorageKey, StorageReader, StorageSink, StoreError,
    StoredObject,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared call log used to check write ordering across both stubs.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Memory sink that counts calls and can be told to fail.
pub struct CountingSink {
    inner: MemoryStorageSink,
    fail: bool,
    calls: AtomicUsize,
    log: CallLog,
}

impl CountingSink {
    pub fn working(log: CallLog) -> Self {
        Self {
            inner: MemoryStorageSink::new("stub"),
            fail: false,
            calls: AtomicUsize::new(0),
            log,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            fail: true,
            ..Self::working(log)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl StorageSink for CountingSink {
    fn put(&self, request: &PutRequest) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push("put");
        if self.fail {
            return Err(StoreError::Unavailable("access denied".to_string()));
        }
        self.inner.put(request)
    }

    fn location(&self) -> String {
        self.inner.location()
    }
}

impl StorageReader for CountingSink {
    fn get(&self, key: &StorageKey) -> Result<Option<StoredObject>, StoreError> {
        self.inner.get(key)
    }

    fn list(&self, prefix: &str) -> Result<Vec<StorageKey>, StoreError> {
        self.inner.list(prefix)
    }
}

/// Notary stub that counts calls, records requests, and either issues a
/// receipt or fails with a 503.
pub struct StubNotary {
    succeed: bool,
    calls: AtomicUsize,
    log: CallLog,
    requests: Mutex<Vec<NotarizeRequest>>,
}

impl StubNotary {
    pub fn accepting(log: CallLog) -> Self {
        Self {
            succeed: true,
            calls: AtomicUsize::new(0),
            log,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn down(log: CallLog) -> Self {
        Self {
            succeed: false,
            ..Self::accepting(log)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<NotarizeRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl NotaryClient for StubNotary {
    fn notarize(&self, request: &NotarizeRequest) -> Result<Receipt, NotarizationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.lock().unwrap().push("notarize");
        self.requests.lock().unwrap().push(request.clone());
        if self.succeed {
            Ok(Receipt::new(format!("rcpt_{n:08}_{}", request.hash)))
        } else {
            Err(NotarizationError::Status {
                status: 503,
                body: "maintenance".to_string(),
            })
        }
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 30, 0).unwrap()
}

pub fn test_config() -> NotaryConfig {
    NotaryConfig::new(
        Credential::new("sk_asn_test_0123456789"),
        TenantId::parse("tnt_test").unwrap(),
        "acme-llm-logs",
    )
}

pub fn live_config() -> NotaryConfig {
    NotaryConfig::new(
        Credential::new("sk_asn_live_0123456789"),
        TenantId::parse("tnt_acme").unwrap(),
        "acme-llm-logs",
    )
}
