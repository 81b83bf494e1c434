//! Verify command implementation.
//!
//! Local integrity audit of stored records. Receipts are not checked here;
//! that is the notarization service's job.

use crate::output;
use notary_canonical::{canonicalize, hash_bytes};
use notary_core::HASH_TAG;
use notary_store::{FsOptions, FsStorageSink, StorageReader, StoredObject};
use serde_json::{json, Value};

/// Checks one stored object; returns the list of problems found.
fn audit(object: &StoredObject) -> Vec<String> {
    let mut problems = Vec::new();
    let computed = hash_bytes(&object.body);

    let expected_name = format!("{}.json", computed);
    if object.key.file_name() != expected_name {
        problems.push("hash does not match key".to_string());
    }

    match object.tags.get(HASH_TAG) {
        Some(tag) if tag == computed.as_str() => {}
        Some(_) => problems.push("hash does not match tag".to_string()),
        None => problems.push("hash tag missing".to_string()),
    }

    match serde_json::from_slice::<Value>(&object.body) {
        Ok(value) => match canonicalize(&value) {
            Ok(bytes) if bytes.as_bytes() == object.body.as_slice() => {}
            Ok(_) => problems.push("body is not in canonical form".to_string()),
            Err(e) => problems.push(format!("body cannot be canonicalized: {}", e)),
        },
        Err(e) => problems.push(format!("body is not JSON: {}", e)),
    }

    problems
}

pub fn run(
    storage_root: String,
    bucket: String,
    prefix: String,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let sink = FsStorageSink::open(&storage_root, bucket, FsOptions::default())
        .map_err(|e| format!("Failed to open storage: {}", e))?;

    let mut all_ok = true;
    let mut results = Vec::new();

    for key in sink.list(&prefix)? {
        let Some(object) = sink.get(&key)? else {
            continue;
        };
        let problems = audit(&object);
        all_ok = all_ok && problems.is_empty();
        results.push((key.to_string(), problems));
    }

    if json_output {
        let json_results: Vec<_> = results
            .iter()
            .map(|(key, problems)| {
                json!({
                    "key": key,
                    "verdict": if problems.is_empty() { "Ok" } else { "Mismatch" },
                    "problems": problems,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else {
        output::print_table_header("KEY", "VERDICT");
        for (key, problems) in &results {
            let verdict = if problems.is_empty() {
                "Ok".to_string()
            } else {
                format!("Mismatch ({})", problems.join("; "))
            };
            println!("{}", output::format_table_row(key, &verdict));
        }
    }

    if strict && !all_ok {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notary_store::StorageKey;
    use std::collections::BTreeMap;

    fn object(body: &[u8], tag: Option<String>) -> StoredObject {
        let hash = hash_bytes(body);
        let mut tags = BTreeMap::new();
        if let Some(tag) = tag {
            tags.insert(HASH_TAG.to_string(), tag);
        }
        StoredObject {
            key: StorageKey::parse(format!("test/t/2025/01/01/{}.json", hash)).unwrap(),
            body: body.to_vec(),
            content_type: "application/json".to_string(),
            tags,
        }
    }

    #[test]
    fn intact_object_has_no_problems() {
        let body = br#"{"a":1}"#;
        assert!(audit(&object(body, Some(hash_bytes(body).to_string()))).is_empty());
    }

    #[test]
    fn non_canonical_body_is_flagged() {
        let body = br#"{ "a": 1 }"#;
        let problems = audit(&object(body, Some(hash_bytes(body).to_string())));
        assert_eq!(problems, vec!["body is not in canonical form".to_string()]);
    }

    #[test]
    fn missing_tag_is_flagged() {
        let problems = audit(&object(br#"{"a":1}"#, None));
        assert_eq!(problems, vec!["hash tag missing".to_string()]);
    }
}
