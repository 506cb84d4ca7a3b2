//! # Asset Registry
//!
//! Lifecycle of the public `Asset` record in the shared partition.

use super::agreement::AgreementManager;
use super::valuation::ValuationStore;
use super::TransferContext;
use crate::domain::{
    decode_record, encode_record, invariant_caller_is_owner, keys, Asset, AssetLifecycle,
    Attributes, ClientId, Partition, TransferError,
};
use crate::ports::outbound::KeyValueIter;
use tracing::{debug, info};

const RECORD: &str = "Asset";

/// Public asset registry.
#[derive(Clone, Copy)]
pub struct AssetRegistry<'a> {
    ctx: TransferContext<'a>,
}

impl<'a> AssetRegistry<'a> {
    /// Create a registry bound to one invocation.
    pub fn new(ctx: TransferContext<'a>) -> Self {
        Self { ctx }
    }

    /// Create an asset owned by the caller.
    pub fn create_asset(
        &self,
        kind: &str,
        id: &str,
        attributes: Attributes,
    ) -> Result<Asset, TransferError> {
        keys::validate_simple_key(id)?;
        if kind.trim().is_empty() {
            return Err(TransferError::InvalidInput(
                "asset kind must not be empty".to_string(),
            ));
        }
        if self.ctx.ledger().get(&Partition::Shared, id)?.is_some() {
            return Err(TransferError::AssetAlreadyExists(id.to_string()));
        }

        let asset = Asset {
            id: id.to_string(),
            kind: kind.to_string(),
            attributes,
            owner: self.ctx.identity().caller_identity(),
        };
        self.store(&asset)?;

        info!(asset_id = %id, kind = %kind, owner = %asset.owner, "[transfer] Asset created");
        Ok(asset)
    }

    /// Read an asset. Absent is `Ok(None)`.
    pub fn read_asset(&self, id: &str) -> Result<Option<Asset>, TransferError> {
        self.ctx
            .ledger()
            .get(&Partition::Shared, id)?
            .map(|bytes| decode_record(RECORD, id, &bytes))
            .transpose()
    }

    /// Read an asset that must exist.
    pub fn require_asset(&self, id: &str) -> Result<Asset, TransferError> {
        self.read_asset(id)?
            .ok_or_else(|| TransferError::AssetNotFound(id.to_string()))
    }

    /// Delete an asset and the caller organization's valuation of it.
    ///
    /// Only an asset with no registered buyer can be deleted.
    pub fn delete_asset(&self, id: &str) -> Result<(), TransferError> {
        self.require_asset(id)?;
        let org = self.ctx.verify_client_org_matches_peer()?;

        let state = match AgreementManager::new(self.ctx).read_agreement(id)? {
            Some(agreement) if agreement.buyer().is_some() => AssetLifecycle::Proposed,
            _ => AssetLifecycle::Created,
        };
        if !state.can_transition_to(AssetLifecycle::Deleted) {
            return Err(TransferError::InvalidTransition {
                asset_id: id.to_string(),
                from: state,
                to: AssetLifecycle::Deleted,
            });
        }

        self.ctx.ledger().delete(&Partition::Shared, id)?;
        ValuationStore::new(self.ctx).delete_valuation(&org, id)?;

        info!(asset_id = %id, org = %org, "[transfer] Asset deleted");
        Ok(())
    }

    /// Replace the public attributes of an asset the caller owns.
    pub fn update_attributes(
        &self,
        id: &str,
        attributes: Attributes,
    ) -> Result<Asset, TransferError> {
        let mut asset = self.require_asset(id)?;
        invariant_caller_is_owner(&asset, &self.ctx.identity().caller_identity())?;

        asset.attributes = attributes;
        self.store(&asset)?;

        debug!(asset_id = %id, "[transfer] Asset attributes updated");
        Ok(asset)
    }

    /// Rewrite the owner of `asset`. Authorization is the caller's job.
    pub(crate) fn rewrite_owner(
        &self,
        mut asset: Asset,
        new_owner: ClientId,
    ) -> Result<Asset, TransferError> {
        asset.owner = new_owner;
        self.store(&asset)?;
        Ok(asset)
    }

    /// Lazily decoded assets with ids in `[start, end)`. Each call starts a
    /// fresh enumeration.
    pub fn assets_by_range(&self, start: &str, end: &str) -> Result<AssetIter<'a>, TransferError> {
        let inner = self.ctx.ledger().range(&Partition::Shared, start, end)?;
        Ok(AssetIter { inner })
    }

    /// Assets with ids in `[start, end)`. Any undecodable record fails the
    /// whole enumeration.
    pub fn list_assets_by_range(&self, start: &str, end: &str) -> Result<Vec<Asset>, TransferError> {
        self.collect_limited(self.assets_by_range(start, end)?, |_| true)
    }

    /// Assets currently owned by `owner`.
    pub fn query_assets_by_owner(&self, owner: &ClientId) -> Result<Vec<Asset>, TransferError> {
        self.collect_limited(self.assets_by_range("", "")?, |asset| asset.owner == *owner)
    }

    fn collect_limited(
        &self,
        assets: AssetIter<'a>,
        keep: impl Fn(&Asset) -> bool,
    ) -> Result<Vec<Asset>, TransferError> {
        let limit = self.ctx.config().max_range_results;
        let mut out = Vec::new();
        for asset in assets {
            let asset = asset?;
            if !keep(&asset) {
                continue;
            }
            if limit != 0 && out.len() == limit {
                return Err(TransferError::InvalidInput(format!(
                    "query matches more than {limit} assets"
                )));
            }
            out.push(asset);
        }
        Ok(out)
    }

    fn store(&self, asset: &Asset) -> Result<(), TransferError> {
        self.ctx
            .ledger()
            .put(&Partition::Shared, &asset.id, encode_record(asset)?)?;
        Ok(())
    }
}

/// Lazy asset enumeration over a range query.
pub struct AssetIter<'a> {
    inner: KeyValueIter<'a>,
}

impl Iterator for AssetIter<'_> {
    type Item = Result<Asset, TransferError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| {
            let (key, bytes) = entry?;
            decode_record(RECORD, &key, &bytes)
        })
    }
}
