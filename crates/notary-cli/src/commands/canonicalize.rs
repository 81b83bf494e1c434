//! Canonicalize command implementation.

use crate::input;
use notary_canonical::Canonicalizer;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = input::read_json(input)?;

    let bytes = Canonicalizer::new()
        .canonicalize(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", bytes);
    Ok(())
}
