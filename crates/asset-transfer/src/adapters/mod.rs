//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports: an in-process ledger substrate and a
//! fixed identity context.

mod identity;
mod memory_ledger;

pub use identity::StaticIdentity;
pub use memory_ledger::{content_hash, InMemoryLedger, LedgerTransaction};
