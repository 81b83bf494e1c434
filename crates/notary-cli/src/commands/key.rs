//! Key command implementation.

use chrono::{NaiveDate, Utc};
use notary_canonical::{ContentHash, TenantId};
use notary_client::Credential;
use notary_core::Environment;

pub fn run(
    credential: String,
    tenant: String,
    hash: String,
    date: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let environment = Environment::classify(&Credential::new(credential));
    let tenant = TenantId::parse(tenant).map_err(|e| format!("Invalid tenant: {}", e))?;
    let hash = ContentHash::parse(hash).map_err(|e| format!("Invalid hash: {}", e))?;
    let date = match date {
        Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date {}: {}", text, e))?,
        None => Utc::now().date_naive(),
    };

    let key = environment.storage_key(&tenant, date, &hash)?;
    println!("{}", key);
    Ok(())
}
