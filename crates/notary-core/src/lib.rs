//! Tamper-evident audit records of agent/LLM interactions.
//!
//! This crate provides:
//! - Payload construction from an interaction plus session bookkeeping
//! - Per-session sequence numbers that are atomic across threads
//! - Test/production routing derived from the credential prefix
//! - The ordered dual-write to customer storage and the notarization service
//!
//! Core invariants:
//! - The hash input is the RFC 8785 canonical form of the payload
//! - Storage completes before notarization begins; a failed write is never notarized
//! - Every record consumes exactly one sequence number, whatever its outcome
//! - No failure escapes as a panic or error; all outcomes are [`CommitResult`] values
//!
#![deny(missing_docs)]

/// Framework callback seam.
pub mod adapter;
/// Clock abstraction.
pub mod clock;
/// Pipeline configuration.
pub mod config;
/// Ordered dual-write.
pub mod coordinator;
/// Test/production routing.
pub mod environment;
/// Error types for core operations.
pub mod errors;
/// Pipeline entry point.
pub mod notary;
/// Payload construction.
pub mod payload;
/// Interaction records.
pub mod record;
/// Commit outcomes.
pub mod result;
/// Session identity and sequencing.
pub mod session;

pub use adapter::{InteractionAdapter, RequestCallbacks};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{NotaryConfig, DEFAULT_TIMEOUT};
pub use coordinator::{DualWriteCoordinator, HASH_TAG};
pub use environment::Environment;
pub use errors::{CommitError, ConfigError};
pub use notary::NotaryCore;
pub use payload::{format_timestamp, Payload, RESERVED_KEYS};
pub use record::InteractionRecord;
pub use result::{CommitResult, CommittedRecord};
pub use session::{SessionContext, SessionTicket};
