//! Classify command implementation.

use notary_client::Credential;
use notary_core::Environment;
use serde_json::json;

pub fn run(credential: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let credential = Credential::new(credential);
    let environment = Environment::classify(&credential);

    if json_output {
        let summary = json!({
            "kind": credential.kind().as_str(),
            "environment": environment.key_segment(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("kind:        {}", credential.kind());
        println!("environment: {}", environment);
    }
    Ok(())
}
