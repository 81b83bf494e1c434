//! Log command implementation.

use notary_core::{CommitResult, InteractionRecord, NotaryConfig, NotaryCore};
use notary_store::{FsOptions, FsStorageSink};

pub fn run(
    record: String,
    storage_root: String,
    debug: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config =
        NotaryConfig::from_env().map_err(|e| format!("Invalid configuration: {}", e))?;
    config.debug = config.debug || debug;

    let json = std::fs::read_to_string(&record)
        .map_err(|e| format!("Failed to read file {}: {}", record, e))?;
    let record: InteractionRecord =
        serde_json::from_str(&json).map_err(|e| format!("Invalid record: {}", e))?;

    let sink = FsStorageSink::open(&storage_root, config.bucket.clone(), FsOptions { sync: true })
        .map_err(|e| format!("Failed to open storage: {}", e))?;
    let core = NotaryCore::from_config(config, sink)?;

    let result = core.log_record(&record);
    println!("{}", serde_json::to_string_pretty(&result.to_json())?);

    if let CommitResult::TotalFailure { error, .. } = result {
        return Err(format!("Nothing was recorded: {}", error).into());
    }
    Ok(())
}
