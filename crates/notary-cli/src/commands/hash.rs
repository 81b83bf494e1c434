//! Hash command implementation.

use crate::input;
use notary_canonical::{canonicalize, hash};

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = input::read_json(input)?;
    let bytes = canonicalize(&value).map_err(|e| format!("Canonicalization failed: {}", e))?;
    println!("{}", hash(&bytes));
    Ok(())
}
