use notary_canonical::{canonicalize, hash};
use serde_json::json;

fn main() {
    let payload = json!({
        "metadata": {
            "session_id": "6f1c2a0e-0000-4000-8000-000000000000",
            "sequence": 1,
            "timestamp": "2025-12-20T00:00:00.000000Z",
            "slug": "tnt_example"
        },
        "input": { "q": "ping" },
        "output": { "text": "pong" }
    });

    match canonicalize(&payload) {
        Ok(bytes) => {
            println!("{}", bytes);
            println!("{}", hash(&bytes));
        }
        Err(err) => {
            eprintln!("canonicalization failed: {}", err);
            std::process::exit(1);
        }
    }
}
