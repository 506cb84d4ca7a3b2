//! # Domain Errors
//!
//! Error types for the confidential transfer protocol.
//!
//! Every failure carries an [`ErrorKind`] so orchestrating code can branch on
//! cause (retry a substrate failure, never retry a value mismatch).

use super::keys::KeyError;
use super::value_objects::AssetLifecycle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commitment hash type (32-byte SHA-256).
pub type Hash = [u8; 32];

/// Distinguishable failure categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Referenced asset, agreement or valuation is absent.
    NotFound,
    /// Create on an existing key.
    AlreadyExists,
    /// Ownership or organization-match violation.
    Unauthorized,
    /// Commitment hashes differ.
    ValueMismatch,
    /// One side has not stated a value yet.
    MissingCommitment,
    /// Transfer attempted with no registered buyer.
    NoAgreement,
    /// The ledger client itself failed.
    SubstrateFailure,
    /// Request or argument failed validation.
    InvalidInput,
    /// A stored record could not be decoded.
    Decode,
    /// The operation is not allowed in the asset's current protocol state.
    InvalidState,
}

/// Transfer protocol error.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Asset not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// No transfer agreement recorded for the asset.
    #[error("Transfer agreement not found for asset {0}")]
    AgreementNotFound(String),

    /// Asset id already taken.
    #[error("Asset already exists: {0}")]
    AssetAlreadyExists(String),

    /// Caller is not the current owner.
    #[error("Caller {caller} is not the owner of asset {asset_id}")]
    NotOwner {
        /// Asset being mutated
        asset_id: String,
        /// Identity that attempted the mutation
        caller: String,
    },

    /// Caller organization differs from the local peer organization.
    #[error("Client organization {client_org} does not match peer organization {peer_org}")]
    OrganizationMismatch {
        /// Organization of the submitting client
        client_org: String,
        /// Organization of the executing peer
        peer_org: String,
    },

    /// Owner and buyer committed to different values.
    #[error("Valuations for asset {asset_id} differ between {owner_org} and {buyer_org}")]
    ValueMismatch {
        /// Asset under transfer
        asset_id: String,
        /// Selling organization
        owner_org: String,
        /// Buying organization
        buyer_org: String,
    },

    /// One organization has not stated a value yet.
    #[error("No valuation committed by {org} for asset {asset_id}")]
    MissingCommitment {
        /// Asset under transfer
        asset_id: String,
        /// Organization whose commitment is absent
        org: String,
    },

    /// No buyer registered for the asset.
    #[error("No buyer has agreed to transfer asset {0}")]
    NoAgreement(String),

    /// Operation would make a transition the protocol state does not allow.
    #[error("Asset {asset_id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// Asset being mutated
        asset_id: String,
        /// Current protocol state
        from: AssetLifecycle,
        /// Requested protocol state
        to: AssetLifecycle,
    },

    /// Invalid argument or request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid ledger key.
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Stored record failed to decode.
    #[error("Failed to decode {record} at key {key:?}: {reason}")]
    Decode {
        /// Record type name
        record: &'static str,
        /// Ledger key of the record
        key: String,
        /// Decoder message
        reason: String,
    },

    /// Ledger client failure, propagated verbatim.
    #[error("Ledger failure: {0}")]
    Substrate(#[from] LedgerError),
}

impl TransferError {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AssetNotFound(_) | Self::AgreementNotFound(_) => ErrorKind::NotFound,
            Self::AssetAlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::NotOwner { .. } | Self::OrganizationMismatch { .. } => ErrorKind::Unauthorized,
            Self::ValueMismatch { .. } => ErrorKind::ValueMismatch,
            Self::MissingCommitment { .. } => ErrorKind::MissingCommitment,
            Self::NoAgreement(_) => ErrorKind::NoAgreement,
            Self::InvalidInput(_) | Self::InvalidKey(_) => ErrorKind::InvalidInput,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidTransition { .. } => ErrorKind::InvalidState,
            Self::Substrate(_) => ErrorKind::SubstrateFailure,
        }
    }

    /// Only substrate failures may succeed when resubmitted unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::SubstrateFailure
    }
}

/// Ledger substrate error.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A key read by the transaction changed before commit.
    #[error("Read conflict on {partition}/{key:?}: read version {read}, committed version {committed}")]
    Conflict {
        /// Partition name
        partition: String,
        /// Conflicting key
        key: String,
        /// Version observed at read time
        read: u64,
        /// Version found at commit time
        committed: u64,
    },

    /// The local peer holds no copy of the partition.
    #[error("Partition {0} is not readable from this peer")]
    AccessDenied(String),

    /// Backend storage failure.
    #[error("Backend error: {0}")]
    Backend(String),
}
