//! # Domain Value Objects
//!
//! Identities, partitions and the per-asset lifecycle.

use super::errors::TransferError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization (trust domain) identifier, e.g. `Org1MSP`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgId(String);

impl OrgId {
    /// Create a non-empty organization id.
    pub fn new(id: impl Into<String>) -> Result<Self, TransferError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TransferError::InvalidInput(
                "organization id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrgId {
    type Error = TransferError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrgId> for String {
    fn from(id: OrgId) -> Self {
        id.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organization-scoped caller identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Create a non-empty client id.
    pub fn new(id: impl Into<String>) -> Result<Self, TransferError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TransferError::InvalidInput(
                "client id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = TransferError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger namespace with its own visibility scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Partition {
    /// Visible to every organization.
    Shared,
    /// Readable and writable only by the named organization.
    Private(OrgId),
}

impl Partition {
    /// Private partition of `org`.
    pub fn private(org: &OrgId) -> Self {
        Self::Private(org.clone())
    }

    /// Owning organization, if private.
    pub fn owner(&self) -> Option<&OrgId> {
        match self {
            Self::Shared => None,
            Self::Private(org) => Some(org),
        }
    }
}

/// Per-asset protocol state.
///
/// ```text
/// Created ──► Proposed ──► Agreed ──► Transferred
///    │            │
///    ▼            ▼
/// Deleted     Withdrawn
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetLifecycle {
    /// Asset exists, no buyer registered.
    #[default]
    Created,
    /// A buyer committed a bid and registered intent.
    Proposed,
    /// Owner committed an ask equal to the buyer's bid.
    Agreed,
    /// Ownership moved to the buyer.
    Transferred,
    /// Asset removed before any agreement.
    Deleted,
    /// Buyer withdrew its agreement.
    Withdrawn,
}

impl AssetLifecycle {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: AssetLifecycle) -> bool {
        match (self, next) {
            (Self::Created, Self::Proposed) => true,
            (Self::Created, Self::Deleted) => true,
            (Self::Proposed, Self::Agreed) => true,
            (Self::Proposed, Self::Withdrawn) => true,
            // Owner restated a different ask
            (Self::Agreed, Self::Proposed) => true,
            (Self::Agreed, Self::Withdrawn) => true,
            (Self::Agreed, Self::Transferred) => true,
            // Reset: asset is for sale again
            (Self::Withdrawn, Self::Proposed) => true,
            (Self::Transferred, Self::Proposed) => true,
            _ => false,
        }
    }
}
