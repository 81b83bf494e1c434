//! List command implementation.

use crate::output;
use notary_core::HASH_TAG;
use notary_store::{FsOptions, FsStorageSink, StorageReader};
use serde_json::json;

pub fn run(
    storage_root: String,
    bucket: String,
    prefix: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let sink = FsStorageSink::open(&storage_root, bucket, FsOptions::default())
        .map_err(|e| format!("Failed to open storage: {}", e))?;

    if !json {
        output::print_table_header("KEY", "BYTES");
    }

    for key in sink.list(&prefix)? {
        let Some(object) = sink.get(&key)? else {
            continue;
        };
        if json {
            let row = json!({
                "key": key.as_str(),
                "bytes": object.body.len(),
                "hash": object.tags.get(HASH_TAG),
            });
            println!("{}", serde_json::to_string(&row)?);
        } else {
            println!(
                "{}",
                output::format_table_row(key.as_str(), &object.body.len().to_string())
            );
        }
    }

    Ok(())
}
