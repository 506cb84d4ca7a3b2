//! # Transfer Coordinator
//!
//! Cross-component verification and the ownership change.
//!
//! ## Transfer checks (in order)
//!
//! | # | Check | Failure |
//! |---|-------|---------|
//! | 1 | Asset exists | `NotFound` |
//! | 2 | Caller is the owner | `Unauthorized` |
//! | 3 | Caller org = peer org | `Unauthorized` |
//! | 4 | Owner and buyer commitments equal | `ValueMismatch` / `MissingCommitment` |
//! | 5 | Agreement with a buyer exists | `NoAgreement` |
//!
//! Later checks assume the earlier ones hold. Nothing is written until all
//! five pass; the three writes that follow go into the same unit of work.

use super::agreement::AgreementManager;
use super::registry::AssetRegistry;
use super::valuation::ValuationStore;
use super::TransferContext;
use crate::domain::{
    invariant_agreement_has_buyer, invariant_caller_is_owner, Asset, AssetLifecycle, OrgId,
    TransferError,
};
use tracing::{info, instrument, warn};

/// Orchestrates agreement and transfer across the components.
#[derive(Clone, Copy)]
pub struct TransferCoordinator<'a> {
    ctx: TransferContext<'a>,
    registry: AssetRegistry<'a>,
    valuations: ValuationStore<'a>,
    agreements: AgreementManager<'a>,
}

impl<'a> TransferCoordinator<'a> {
    /// Create a coordinator bound to one invocation.
    pub fn new(ctx: TransferContext<'a>) -> Self {
        Self {
            ctx,
            registry: AssetRegistry::new(ctx),
            valuations: ValuationStore::new(ctx),
            agreements: AgreementManager::new(ctx),
        }
    }

    /// Buyer side: commit a private bid and register intent to buy.
    #[instrument(skip(self), fields(caller = %self.ctx.identity().caller_identity()))]
    pub fn agree_to_transfer(&self, asset_id: &str, value: u64) -> Result<(), TransferError> {
        let buyer_org = self.ctx.verify_client_org_matches_peer()?;
        self.registry.require_asset(asset_id)?;

        self.valuations.set_valuation(&buyer_org, asset_id, value)?;
        self.agreements
            .propose_agreement(asset_id, &self.ctx.identity().caller_identity())?;

        info!(asset_id = %asset_id, buyer_org = %buyer_org, "[transfer] Buyer agreed to transfer");
        Ok(())
    }

    /// Owner side: move the asset to the agreed buyer.
    #[instrument(skip(self), fields(caller = %self.ctx.identity().caller_identity()))]
    pub fn transfer_asset(&self, asset_id: &str, buyer_org: &OrgId) -> Result<Asset, TransferError> {
        let asset = self.registry.require_asset(asset_id)?;
        invariant_caller_is_owner(&asset, &self.ctx.identity().caller_identity())?;
        let owner_org = self.ctx.verify_client_org_matches_peer()?;

        if !self
            .valuations
            .compare_valuations(&owner_org, buyer_org, asset_id)?
        {
            warn!(asset_id = %asset_id, buyer_org = %buyer_org, "[transfer] Valuation commitments differ");
            return Err(TransferError::ValueMismatch {
                asset_id: asset_id.to_string(),
                owner_org: owner_org.to_string(),
                buyer_org: buyer_org.to_string(),
            });
        }

        let agreement = self.agreements.read_agreement(asset_id)?;
        let buyer = invariant_agreement_has_buyer(asset_id, agreement.as_ref())?;

        let previous_owner = asset.owner.clone();
        let asset = self.registry.rewrite_owner(asset, buyer)?;
        self.valuations.delete_valuation(&owner_org, asset_id)?;
        self.agreements.delete_agreement(asset_id)?;

        info!(
            asset_id = %asset_id,
            from = %previous_owner,
            to = %asset.owner,
            "[transfer] Asset transferred"
        );
        Ok(asset)
    }

    /// Protocol state of an asset as seen between `owner_org` and
    /// `buyer_org`. `None` if the asset does not exist.
    pub fn lifecycle(
        &self,
        asset_id: &str,
        owner_org: &OrgId,
        buyer_org: &OrgId,
    ) -> Result<Option<AssetLifecycle>, TransferError> {
        if self.registry.read_asset(asset_id)?.is_none() {
            return Ok(None);
        }
        let agreement = self.agreements.read_agreement(asset_id)?;
        if agreement.and_then(|a| a.buyer()).is_none() {
            return Ok(Some(AssetLifecycle::Created));
        }

        let owner_hash = self.valuations.valuation_hash(owner_org, asset_id)?;
        let buyer_hash = self.valuations.valuation_hash(buyer_org, asset_id)?;
        let state = match (owner_hash, buyer_hash) {
            (Some(owner), Some(buyer)) if owner == buyer => AssetLifecycle::Agreed,
            _ => AssetLifecycle::Proposed,
        };
        Ok(Some(state))
    }
}
