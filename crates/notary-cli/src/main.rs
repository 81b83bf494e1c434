//! Notary CLI - canonical encoding, storage keys, and local integrity audits.

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{canonicalize, classify, hash, key, list, log, verify};

#[derive(Parser)]
#[command(name = "notary")]
#[command(about = "Tamper-evident audit records for agent interactions")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Show the content hash of the canonical bytes for input JSON
    Hash {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Classify a credential as test or production
    Classify {
        /// API key to inspect
        credential: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the storage key for a record hash
    Key {
        /// API key (selects test or prod prefix)
        #[arg(long)]
        credential: String,
        /// Tenant identifier
        #[arg(long)]
        tenant: String,
        /// Content hash (64 lowercase hex characters)
        #[arg(long)]
        hash: String,
        /// UTC date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Canonicalize, store and notarize one interaction record
    Log {
        /// Record JSON file with input, output and optional metadata
        record: String,
        /// Directory holding bucket directories
        #[arg(long)]
        storage_root: String,
        /// Include canonical bytes in the output
        #[arg(long)]
        debug: bool,
    },
    /// List stored record keys
    List {
        /// Directory holding bucket directories
        #[arg(long)]
        storage_root: String,
        /// Bucket name
        #[arg(long)]
        bucket: String,
        /// Only keys starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Recompute hashes of stored records and compare with keys and tags
    Verify {
        /// Directory holding bucket directories
        #[arg(long)]
        storage_root: String,
        /// Bucket name
        #[arg(long)]
        bucket: String,
        /// Only keys starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
        /// Exit with error code if any record fails
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Hash { input } => hash::run(input),
        Commands::Classify { credential, json } => classify::run(credential, json),
        Commands::Key {
            credential,
            tenant,
            hash,
            date,
        } => key::run(credential, tenant, hash, date),
        Commands::Log {
            record,
            storage_root,
            debug,
        } => log::run(record, storage_root, debug),
        Commands::List {
            storage_root,
            bucket,
            prefix,
            json,
        } => list::run(storage_root, bucket, prefix, json),
        Commands::Verify {
            storage_root,
            bucket,
            prefix,
            strict,
            json,
        } => verify::run(storage_root, bucket, prefix, strict, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
