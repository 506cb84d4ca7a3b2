//! In-Memory Ledger Adapter
//!
//! Implements the `PartitionedLedger` and `TransactionalLedger` ports with
//! optimistic concurrency: a transaction records the version of every key it
//! reads and buffers its writes; commit re-validates those versions under the
//! write lock and applies all writes at once.

use crate::domain::{is_composite_key, Hash, LedgerError, OrgId, Partition, TransferConfig};
use crate::ports::outbound::{KeyValueIter, PartitionedLedger, TransactionalLedger};
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// SHA-256 of stored bytes, the commitment surface of the substrate.
pub fn content_hash(bytes: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Committed value with its write version. A tombstone keeps the version of
/// the delete so concurrent readers of the deleted key still conflict.
#[derive(Clone, Debug)]
struct Entry {
    value: Option<Vec<u8>>,
    version: u64,
}

type PartitionData = BTreeMap<String, Entry>;

/// In-memory partitioned ledger.
///
/// Deleted keys stay behind as tombstones until [`prune_tombstones`] runs
/// with no transaction open.
///
/// [`prune_tombstones`]: InMemoryLedger::prune_tombstones
pub struct InMemoryLedger {
    config: TransferConfig,
    /// Committed state: partition name -> key -> entry.
    partitions: RwLock<HashMap<String, PartitionData>>,
    /// Transactions begun and not yet committed or dropped.
    open: AtomicUsize,
}

impl InMemoryLedger {
    /// Create an empty ledger with default partition names.
    pub fn new() -> Self {
        Self::with_config(TransferConfig::default())
    }

    /// Create an empty ledger with custom partition names.
    pub fn with_config(config: TransferConfig) -> Self {
        Self {
            config,
            partitions: RwLock::new(HashMap::new()),
            open: AtomicUsize::new(0),
        }
    }

    /// Drop every tombstone. Skipped while any transaction is open, since an
    /// open read set may still hold a tombstone's version. Returns the number
    /// of entries removed.
    pub fn prune_tombstones(&self) -> usize {
        let mut partitions = self.partitions.write();
        let open = self.open.load(Ordering::Acquire);
        if open != 0 {
            debug!(open, "[ledger] Open transactions, tombstones kept");
            return 0;
        }

        let mut removed = 0;
        for data in partitions.values_mut() {
            let before = data.len();
            data.retain(|_, entry| entry.value.is_some());
            removed += before - data.len();
        }
        partitions.retain(|_, data| !data.is_empty());

        if removed > 0 {
            info!(removed, "[ledger] Tombstones pruned");
        }
        removed
    }

    /// Number of tombstones in a partition.
    pub fn tombstones(&self, partition: &Partition) -> usize {
        let name = self.config.partition_name(partition);
        self.partitions
            .read()
            .get(&name)
            .map(|data| data.values().filter(|e| e.value.is_none()).count())
            .unwrap_or(0)
    }

    /// Committed value of a key, bypassing partition access rules.
    pub fn inspect(&self, partition: &Partition, key: &str) -> Option<Vec<u8>> {
        let name = self.config.partition_name(partition);
        self.partitions
            .read()
            .get(&name)
            .and_then(|data| data.get(key))
            .and_then(|entry| entry.value.clone())
    }

    /// Number of live keys in a partition.
    pub fn live_keys(&self, partition: &Partition) -> usize {
        let name = self.config.partition_name(partition);
        self.partitions
            .read()
            .get(&name)
            .map(|data| data.values().filter(|e| e.value.is_some()).count())
            .unwrap_or(0)
    }

    fn committed(&self, name: &str, key: &str) -> (Option<Vec<u8>>, u64) {
        self.partitions
            .read()
            .get(name)
            .and_then(|data| data.get(key))
            .map(|entry| (entry.value.clone(), entry.version))
            .unwrap_or((None, 0))
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalLedger for InMemoryLedger {
    type Transaction<'a> = LedgerTransaction<'a>;

    fn begin(&self, peer_org: &OrgId) -> LedgerTransaction<'_> {
        self.open.fetch_add(1, Ordering::AcqRel);
        LedgerTransaction {
            ledger: self,
            _open: OpenTransaction(&self.open),
            peer_org: peer_org.clone(),
            reads: Mutex::new(HashMap::new()),
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    fn commit(&self, tx: LedgerTransaction<'_>) -> Result<usize, LedgerError> {
        if !std::ptr::eq(tx.ledger, self) {
            return Err(LedgerError::Backend(
                "transaction was begun on a different ledger".to_string(),
            ));
        }

        let reads = tx.reads.into_inner();
        let writes = tx.writes.into_inner();
        let mut partitions = self.partitions.write();

        for ((partition, key), read) in &reads {
            let committed = partitions
                .get(partition)
                .and_then(|data| data.get(key))
                .map(|entry| entry.version)
                .unwrap_or(0);
            if committed != *read {
                warn!(
                    partition = %partition,
                    key = ?key,
                    read = *read,
                    committed,
                    "[ledger] MVCC conflict, discarding transaction"
                );
                return Err(LedgerError::Conflict {
                    partition: partition.clone(),
                    key: key.clone(),
                    read: *read,
                    committed,
                });
            }
        }

        let applied = writes.len();
        for ((partition, key), value) in writes {
            let data = partitions.entry(partition).or_default();
            let version = data.get(&key).map(|e| e.version).unwrap_or(0) + 1;
            data.insert(key, Entry { value, version });
        }

        debug!(
            reads = reads.len(),
            writes = applied,
            "[ledger] Transaction committed"
        );
        Ok(applied)
    }
}

/// One unit of work against an [`InMemoryLedger`].
///
/// Reads observe committed state only, never this transaction's own buffered
/// writes. Private partitions of organizations other than the executing
/// peer's are write-only: their plaintext cannot be read, only hashed.
pub struct LedgerTransaction<'l> {
    ledger: &'l InMemoryLedger,
    _open: OpenTransaction<'l>,
    peer_org: OrgId,
    /// Read set: (partition, key) -> version observed.
    reads: Mutex<HashMap<(String, String), u64>>,
    /// Write set: (partition, key) -> new value, `None` deletes.
    writes: Mutex<BTreeMap<(String, String), Option<Vec<u8>>>>,
}

/// Counts a transaction as open until it is committed or dropped.
struct OpenTransaction<'l>(&'l AtomicUsize);

impl Drop for OpenTransaction<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl LedgerTransaction<'_> {
    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    /// Organization of the executing peer.
    pub fn peer_org(&self) -> &OrgId {
        &self.peer_org
    }

    fn readable_name(&self, partition: &Partition) -> Result<String, LedgerError> {
        let name = self.ledger.config.partition_name(partition);
        match partition.owner() {
            Some(org) if *org != self.peer_org => Err(LedgerError::AccessDenied(name)),
            _ => Ok(name),
        }
    }

    fn record_read(&self, name: &str, key: &str, version: u64) {
        self.reads
            .lock()
            .entry((name.to_string(), key.to_string()))
            .or_insert(version);
    }

    fn buffer_write(&self, partition: &Partition, key: &str, value: Option<Vec<u8>>) {
        let name = self.ledger.config.partition_name(partition);
        self.writes.lock().insert((name, key.to_string()), value);
    }
}

impl PartitionedLedger for LedgerTransaction<'_> {
    fn get(&self, partition: &Partition, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let name = self.readable_name(partition)?;
        let (value, version) = self.ledger.committed(&name, key);
        self.record_read(&name, key, version);
        Ok(value)
    }

    fn put(&self, partition: &Partition, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.buffer_write(partition, key, Some(value));
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &str) -> Result<(), LedgerError> {
        self.buffer_write(partition, key, None);
        Ok(())
    }

    fn hash_of(&self, partition: &Partition, key: &str) -> Result<Option<Hash>, LedgerError> {
        let name = self.ledger.config.partition_name(partition);
        let (value, version) = self.ledger.committed(&name, key);
        self.record_read(&name, key, version);
        Ok(value.as_deref().map(content_hash))
    }

    fn range(
        &self,
        partition: &Partition,
        start: &str,
        end: &str,
    ) -> Result<KeyValueIter<'_>, LedgerError> {
        let name = self.readable_name(partition)?;
        if !end.is_empty() && start >= end {
            return Ok(Box::new(std::iter::empty()));
        }

        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };
        let lower = Bound::Included(start.to_string());

        let snapshot: Vec<(String, Vec<u8>, u64)> = {
            let partitions = self.ledger.partitions.read();
            partitions
                .get(&name)
                .map(|data| {
                    data.range::<String, _>((lower, upper))
                        .filter(|(key, _)| !is_composite_key(key))
                        .filter_map(|(key, entry)| {
                            entry
                                .value
                                .as_ref()
                                .map(|v| (key.clone(), v.clone(), entry.version))
                        })
                        .collect()
                })
                .unwrap_or_default()
        };

        for (key, _, version) in &snapshot {
            self.record_read(&name, key, *version);
        }
        Ok(Box::new(
            snapshot.into_iter().map(|(key, value, _)| Ok((key, value))),
        ))
    }
}
