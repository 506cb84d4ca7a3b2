//! # Confidential Asset Transfer
//!
//! Bilateral asset transfer between organizations that share a public asset
//! registry but keep their valuations private.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Let an owner and a buyer agree on a price without revealing it:
//! - Each organization writes its valuation to its own private partition
//! - Only the substrate's content hash of a valuation is visible to others
//! - Ownership moves only when both hashes are identical
//!
//! ## Protocol
//!
//! | Step | Caller | Effect |
//! |------|--------|--------|
//! | CreateAsset | Owner | Public record, owner = caller |
//! | SetValuation | Owner | Private ask in owner's partition |
//! | AgreeToTransfer | Buyer | Private bid + shared agreement |
//! | TransferAsset | Owner | Compare hashes, rewrite owner, clean up |
//!
//! ## Security
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Anti-relay | Caller org must equal the executing peer's org |
//! | Hash-only visibility | Foreign private partitions cannot be read |
//! | Owner-only mutation | Transfer and attribute updates require ownership |
//! | Atomic invocations | All writes of a failed operation are discarded |
//!
//! ## Module Structure
//!
//! ```text
//! asset-transfer/
//! ├── domain/     # Records, identities, keys, errors, invariants, config
//! ├── ports/      # AssetTransferApi, PartitionedLedger, IdentityContext
//! ├── service/    # Registry, valuations, agreements, coordinator
//! ├── adapters/   # In-memory MVCC ledger, static identity
//! └── ipc/        # JSON request boundary
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ipc;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use adapters::{content_hash, InMemoryLedger, LedgerTransaction, StaticIdentity};
pub use domain::{
    invariant_agreement_has_buyer, invariant_caller_is_owner, invariant_client_org_matches_peer,
    invariant_commitments_match, invariant_positive_value, Asset, AssetLifecycle, AttributeValue,
    Attributes, ClientId, ErrorKind, Hash, LedgerError, OrgId, Partition, TransferAgreement,
    TransferConfig, TransferError, Valuation,
};
pub use ipc::{HandlerStats, RequestEnvelope, RequestHandler, TransferRequest, TransferResponse};
pub use ports::{
    AssetTransferApi, IdentityContext, KeyValueIter, PartitionedLedger, TransactionalLedger,
};
pub use service::{AssetTransferService, TransferContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
