mod common;

use common::{call_log, fixed_now, live_config, test_config, CountingSink, StubNotary};
use notary_canonical::{canonicalize, hash_bytes};
use notary_client::{NotarizationError, TenantField};
use notary_canonical::{Canonicalizer, EncodingError, TenantId};
use notary_core::{
    CommitError, CommitResult, DualWriteCoordinator, Environment, FixedClock, InteractionRecord,
    NotaryCore, SessionContext, HASH_TAG,
};
use notary_store::{StorageKey, StorageReader, StoreError};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use uuid::Uuid;

fn ping() -> InteractionRecord {
    InteractionRecord::new(json!({"q": "ping"}), json!({"text": "pong"}))
}

fn deeply_nested(depth: usize) -> Value {
    (0..depth).fold(json!("leaf"), |inner, _| json!({ "n": inner }))
}

#[test]
fn storage_failure_never_calls_notary() {
    let log = call_log();
    let sink = Arc::new(CountingSink::failing(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log.clone()));
    let core = NotaryCore::new(test_config(), sink.clone(), notary.clone()).unwrap();

    let result = core.log_record(&ping());

    match &result {
        CommitResult::TotalFailure { sequence, error } => {
            assert_eq!(*sequence, 1);
            assert!(matches!(error, CommitError::Storage(StoreError::Unavailable(_))));
        }
        other => panic!("expected total failure, got {}", other.status()),
    }
    assert!(!result.is_stored());
    assert_eq!(sink.calls(), 1);
    assert_eq!(notary.calls(), 0);
    assert_eq!(*log.lock().unwrap(), vec!["put"]);
}

#[test]
fn notary_failure_degrades_to_storage_only() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::down(log.clone()));
    let core = NotaryCore::new(test_config(), sink.clone(), notary.clone()).unwrap();

    let result = core.log_record(&ping());

    let CommitResult::StorageOnlySuccess { record, error } = &result else {
        panic!("expected storage-only success, got {}", result.status());
    };
    assert!(matches!(error, NotarizationError::Status { status: 503, .. }));
    assert!(result.is_stored());
    assert!(!result.is_notarized());
    assert!(result.receipt().is_none());

    let stored = sink.get(&record.key).unwrap().expect("object present in sink");
    assert_eq!(hash_bytes(&stored.body), record.hash);
    assert_eq!(stored.tags.get(HASH_TAG).map(String::as_str), Some(record.hash.as_str()));
    assert_eq!(stored.content_type, "application/json");
    assert_eq!(*log.lock().unwrap(), vec!["put", "notarize"]);
}

#[test]
fn full_success_returns_receipt_after_storage() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log.clone()));
    let core = NotaryCore::new(live_config(), sink.clone(), notary.clone()).unwrap();

    let result = core.log_record(&ping());

    let receipt = result.receipt().expect("receipt").clone();
    let record = result.record().unwrap();
    assert!(receipt.as_str().ends_with(record.hash.as_str()));
    assert!(record.key.as_str().starts_with("prod/tnt_acme/"));
    assert_eq!(*log.lock().unwrap(), vec!["put", "notarize"]);

    let request = notary.last_request().unwrap();
    assert_eq!(request.hash, record.hash);
    assert_eq!(request.tenant.as_str(), "tnt_acme");
    assert_eq!(request.tenant_field, TenantField::Slug);
    assert_eq!(request.metadata["sequence"], 1);
    assert_eq!(request.metadata["session_id"], record.session_id.to_string());
    assert_eq!(request.metadata["slug"], "tnt_acme");
}

#[test]
fn encoding_failure_is_total_and_consumes_a_sequence_number() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log.clone()));
    let core = NotaryCore::new(test_config(), sink.clone(), notary.clone()).unwrap();

    let bad = InteractionRecord::new(deeply_nested(300), json!(null));
    let result = core.log_record(&bad);
    match &result {
        CommitResult::TotalFailure { sequence, error } => {
            assert_eq!(*sequence, 1);
            assert!(matches!(error, CommitError::Encoding(_)));
        }
        other => panic!("expected total failure, got {}", other.status()),
    }
    assert_eq!(sink.calls(), 0);
    assert_eq!(notary.calls(), 0);

    let next = core.log_record(&ping());
    assert_eq!(next.sequence(), 2);
    assert!(next.is_notarized());
}

#[test]
fn end_to_end_key_layout_and_hash() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log));
    let core = NotaryCore::new(test_config(), sink.clone(), notary)
        .unwrap()
        .with_clock(FixedClock(fixed_now()));

    let result = core.log_interaction(json!({"q": "ping"}), json!({"text": "pong"}), Map::new());
    assert!(!matches!(result, CommitResult::TotalFailure { .. }));
    let record = result.record().unwrap();

    let expected_payload = json!({
        "metadata": {
            "session_id": core.session().session_id().to_string(),
            "sequence": 1,
            "timestamp": "2025-06-15T12:30:00.000000Z",
            "slug": "tnt_test"
        },
        "input": {"q": "ping"},
        "output": {"text": "pong"}
    });
    let expected_bytes = canonicalize(&expected_payload).unwrap();
    let expected_hash = hash_bytes(expected_bytes.as_bytes());

    assert_eq!(record.hash, expected_hash);
    assert_eq!(
        record.key,
        StorageKey::parse(format!("test/tnt_test/2025/06/15/{expected_hash}.json")).unwrap()
    );
    let stored = sink.get(&record.key).unwrap().unwrap();
    assert_eq!(stored.body, expected_bytes.as_bytes());
    assert_eq!(record.timestamp.as_str(), "2025-06-15T12:30:00.000000Z");
}

#[test]
fn end_to_end_hash_matches_independent_reference() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let session_id = Uuid::parse_str("6f1c2e8d-1a4c-4559-8e3f-2a1d4c5e6f70").unwrap();
    let core = NotaryCore::new(test_config(), sink.clone(), StubNotary::accepting(log))
        .unwrap()
        .with_clock(FixedClock(fixed_now()))
        .with_session(SessionContext::with_session_id(session_id));

    let result = core.log_record(&ping());
    let record = result.record().unwrap();

    // sha256 of the JCS form computed outside this crate.
    let reference = "ad8d5335af4b679be46b8e40b4b16d982bec3527e0a66eb08a8e5a05d65668f3";
    assert_eq!(record.hash.as_str(), reference);
    assert_eq!(
        record.key.as_str(),
        format!("test/tnt_test/2025/06/15/{reference}.json")
    );
    let stored = sink.get(&record.key).unwrap().unwrap();
    assert_eq!(
        stored.body,
        br#"{"input":{"q":"ping"},"metadata":{"sequence":1,"session_id":"6f1c2e8d-1a4c-4559-8e3f-2a1d4c5e6f70","slug":"tnt_test","timestamp":"2025-06-15T12:30:00.000000Z"},"output":{"text":"pong"}}"#
    );
}

#[test]
fn stored_body_keeps_utf8_and_float_text() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let core = NotaryCore::new(test_config(), sink.clone(), StubNotary::accepting(log))
        .unwrap()
        .with_clock(FixedClock(fixed_now()));

    let result = core.log_interaction(
        json!({"q": "café", "temperature": 0.7}),
        json!({"text": "ok"}),
        Map::new(),
    );
    let stored = sink.get(&result.record().unwrap().key).unwrap().unwrap();
    let body = String::from_utf8(stored.body).unwrap();
    assert!(body.contains(r#"{"q":"café","temperature":0.7}"#), "{body}");
}

#[test]
fn custom_depth_bound_rejects_nested_input() {
    let log = call_log();
    let notary = Arc::new(StubNotary::accepting(log.clone()));
    let coordinator = DualWriteCoordinator::new(
        Arc::new(CountingSink::working(log)),
        notary.clone(),
        TenantId::parse("tnt_test").unwrap(),
        TenantField::Slug,
        Environment::Test,
    )
    .with_clock(FixedClock(fixed_now()))
    .with_canonicalizer(Canonicalizer::with_max_depth(2));
    let session = SessionContext::new();

    let flat = coordinator.commit(&ping(), &session);
    assert!(flat.is_notarized());

    let nested = InteractionRecord::new(json!({"a": {"b": 1}}), json!(null));
    match coordinator.commit(&nested, &session) {
        CommitResult::TotalFailure {
            sequence,
            error: CommitError::Encoding(EncodingError::TooDeep { path, max }),
        } => {
            assert_eq!(sequence, 2);
            assert_eq!(path, "input.a.b");
            assert_eq!(max, 2);
        }
        other => panic!("unexpected outcome: {}", other.to_json()),
    }
    assert_eq!(notary.calls(), 1);
}

#[test]
fn resubmission_produces_new_hash_and_key() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log));
    let core = NotaryCore::new(test_config(), sink.clone(), notary)
        .unwrap()
        .with_clock(FixedClock(fixed_now()));

    let first = core.log_record(&ping());
    let second = core.log_record(&ping());

    let (a, b) = (first.record().unwrap(), second.record().unwrap());
    assert_eq!((a.sequence, b.sequence), (1, 2));
    assert_ne!(a.hash, b.hash);
    assert_ne!(a.key, b.key);
    assert_eq!(sink.len(), 2);
}

#[test]
fn debug_flag_surfaces_canonical_bytes() {
    let log = call_log();
    let quiet = NotaryCore::new(
        test_config(),
        CountingSink::working(log.clone()),
        StubNotary::accepting(log.clone()),
    )
    .unwrap();
    assert!(quiet.log_record(&ping()).record().unwrap().canonical.is_none());

    let verbose = NotaryCore::new(
        test_config().with_debug(true),
        CountingSink::working(log.clone()),
        StubNotary::accepting(log),
    )
    .unwrap();
    let result = verbose.log_record(&ping());
    let record = result.record().unwrap();
    let canonical = record.canonical.as_ref().expect("canonical bytes in debug mode");
    assert_eq!(hash_bytes(canonical), record.hash);
    assert!(result.to_json()["canonical"].is_string());
}

#[test]
fn tenant_field_variant_flows_into_payload_and_request() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log));
    let core = NotaryCore::new(
        test_config().with_tenant_field(TenantField::TenantId),
        sink.clone(),
        notary.clone(),
    )
    .unwrap();

    let result = core.log_record(&ping());
    let stored = sink.get(&result.record().unwrap().key).unwrap().unwrap();
    let body: Value = serde_json::from_slice(&stored.body).unwrap();
    assert_eq!(body["metadata"]["tenant_id"], "tnt_test");
    assert!(body["metadata"].get("slug").is_none());
    assert_eq!(notary.last_request().unwrap().tenant_field, TenantField::TenantId);
}

#[test]
fn caller_metadata_is_kept_but_cannot_forge_sequence() {
    let log = call_log();
    let sink = Arc::new(CountingSink::working(log.clone()));
    let notary = Arc::new(StubNotary::accepting(log));
    let core = NotaryCore::new(test_config(), sink.clone(), notary.clone()).unwrap();

    let mut metadata = Map::new();
    metadata.insert("sequence".to_string(), json!(42));
    metadata.insert("agent".to_string(), json!("claims-bot"));
    let result = core.log_interaction(json!("in"), json!("out"), metadata);

    let request = notary.last_request().unwrap();
    assert_eq!(request.metadata["sequence"], 1);
    assert_eq!(request.metadata["agent"], "claims-bot");
    assert_eq!(result.sequence(), 1);
}

#[test]
fn summary_json_distinguishes_outcomes() {
    let log = call_log();
    let core = NotaryCore::new(
        test_config(),
        CountingSink::working(log.clone()),
        StubNotary::down(log),
    )
    .unwrap();
    let summary = core.log_record(&ping()).to_json();
    assert_eq!(summary["status"], "storage_only_success");
    assert_eq!(summary["sequence"], 1);
    assert!(summary["error"].as_str().unwrap().contains("503"));
    assert!(summary["key"].as_str().unwrap().starts_with("test/tnt_test/"));
}
