//! # Outbound Ports
//!
//! The two external collaborators of the protocol: the partitioned ledger
//! client and the identity context of the current invocation.
//!
//! Both are injected per invocation. The protocol never reaches a partition
//! or an identity through anything but these traits.

use crate::domain::{keys, ClientId, Hash, KeyError, LedgerError, OrgId, Partition};

/// Lazy `(key, bytes)` sequence produced by a range query.
pub type KeyValueIter<'a> = Box<dyn Iterator<Item = Result<(String, Vec<u8>), LedgerError>> + 'a>;

/// Partitioned ledger client - outbound port.
///
/// One value of this trait represents one unit of work. Writes issued through
/// it are expected to commit atomically, or not at all, once the invocation
/// completes successfully.
pub trait PartitionedLedger: Send + Sync {
    /// Read a value.
    fn get(&self, partition: &Partition, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write (or overwrite) a value.
    fn put(&self, partition: &Partition, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Delete a value. Deleting an absent key is not an error.
    fn delete(&self, partition: &Partition, key: &str) -> Result<(), LedgerError>;

    /// Content hash of a value, without exposing the plaintext.
    fn hash_of(&self, partition: &Partition, key: &str) -> Result<Option<Hash>, LedgerError>;

    /// Simple keys in `[start, end)` in key order. An empty `end` is
    /// unbounded. Composite keys are never returned.
    fn range(&self, partition: &Partition, start: &str, end: &str)
        -> Result<KeyValueIter<'_>, LedgerError>;

    /// Derive a composite key.
    fn composite_key(&self, object_type: &str, parts: &[&str]) -> Result<String, KeyError> {
        keys::composite_key(object_type, parts)
    }
}

/// Identity context of the current invocation - outbound port.
pub trait IdentityContext: Send + Sync {
    /// Identity of the submitting client.
    fn caller_identity(&self) -> ClientId;

    /// Organization of the submitting client.
    fn caller_organization(&self) -> OrgId;

    /// Organization of the peer executing the invocation.
    fn local_organization(&self) -> OrgId;
}

/// Ledger substrate that hands out units of work - outbound port.
///
/// A transaction reads committed state and buffers its writes. `commit`
/// applies every buffered write at once or none of them; dropping a
/// transaction discards it.
pub trait TransactionalLedger: Send + Sync {
    /// Unit of work.
    type Transaction<'a>: PartitionedLedger
    where
        Self: 'a;

    /// Begin a unit of work executed by a peer of `peer_org`.
    fn begin(&self, peer_org: &OrgId) -> Self::Transaction<'_>;

    /// Commit a unit of work, returning the number of writes applied.
    fn commit(&self, tx: Self::Transaction<'_>) -> Result<usize, LedgerError>;
}
