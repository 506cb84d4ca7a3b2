//! # Transfer Service
//!
//! The protocol components and the service that exposes them through
//! [`AssetTransferApi`].
//!
//! ## Components
//!
//! ```text
//! TransferCoordinator ──► AssetRegistry ───┐
//!        │                                 │
//!        ├──────────► ValuationStore ◄─────┤
//!        │                                 │
//!        └──────────► AgreementManager ────┘
//!                            │
//!              PartitionedLedger + IdentityContext
//! ```
//!
//! Every component is a cheap, copyable view over one [`TransferContext`]:
//! the ledger unit of work, the caller identity and the configuration of a
//! single invocation.

pub mod agreement;
pub mod coordinator;
pub mod registry;
pub mod valuation;

pub use agreement::AgreementManager;
pub use coordinator::TransferCoordinator;
pub use registry::{AssetIter, AssetRegistry};
pub use valuation::ValuationStore;

use crate::domain::{
    invariant_client_org_matches_peer, Asset, AssetLifecycle, Attributes, ClientId, Hash, OrgId,
    TransferAgreement, TransferConfig, TransferError, Valuation,
};
use crate::ports::inbound::AssetTransferApi;
use crate::ports::outbound::{IdentityContext, PartitionedLedger};

/// Collaborators of one invocation.
#[derive(Clone, Copy)]
pub struct TransferContext<'a> {
    ledger: &'a dyn PartitionedLedger,
    identity: &'a dyn IdentityContext,
    config: &'a TransferConfig,
}

impl<'a> TransferContext<'a> {
    /// Bind the collaborators of one invocation.
    pub fn new(
        ledger: &'a dyn PartitionedLedger,
        identity: &'a dyn IdentityContext,
        config: &'a TransferConfig,
    ) -> Self {
        Self {
            ledger,
            identity,
            config,
        }
    }

    /// Ledger unit of work.
    pub fn ledger(&self) -> &'a dyn PartitionedLedger {
        self.ledger
    }

    /// Caller identity.
    pub fn identity(&self) -> &'a dyn IdentityContext {
        self.identity
    }

    /// Protocol configuration.
    pub fn config(&self) -> &'a TransferConfig {
        self.config
    }

    /// Anti-relay check. Returns the caller's organization.
    pub fn verify_client_org_matches_peer(&self) -> Result<OrgId, TransferError> {
        let client_org = self.identity.caller_organization();
        invariant_client_org_matches_peer(&client_org, &self.identity.local_organization())?;
        Ok(client_org)
    }
}

/// Confidential asset transfer service for one invocation.
#[derive(Clone, Copy)]
pub struct AssetTransferService<'a> {
    ctx: TransferContext<'a>,
}

impl<'a> AssetTransferService<'a> {
    /// Create the service for one invocation.
    pub fn new(ctx: TransferContext<'a>) -> Self {
        Self { ctx }
    }

    /// Public asset registry.
    pub fn registry(&self) -> AssetRegistry<'a> {
        AssetRegistry::new(self.ctx)
    }

    /// Private valuation store.
    pub fn valuations(&self) -> ValuationStore<'a> {
        ValuationStore::new(self.ctx)
    }

    /// Agreement manager.
    pub fn agreements(&self) -> AgreementManager<'a> {
        AgreementManager::new(self.ctx)
    }

    /// Transfer coordinator.
    pub fn coordinator(&self) -> TransferCoordinator<'a> {
        TransferCoordinator::new(self.ctx)
    }
}

impl AssetTransferApi for AssetTransferService<'_> {
    fn create_asset(
        &self,
        kind: &str,
        id: &str,
        attributes: Attributes,
    ) -> Result<Asset, TransferError> {
        self.registry().create_asset(kind, id, attributes)
    }

    fn read_asset(&self, id: &str) -> Result<Option<Asset>, TransferError> {
        self.registry().read_asset(id)
    }

    fn delete_asset(&self, id: &str) -> Result<(), TransferError> {
        self.registry().delete_asset(id)
    }

    fn update_asset_attributes(
        &self,
        id: &str,
        attributes: Attributes,
    ) -> Result<Asset, TransferError> {
        self.registry().update_attributes(id, attributes)
    }

    fn list_assets_by_range(&self, start: &str, end: &str) -> Result<Vec<Asset>, TransferError> {
        self.registry().list_assets_by_range(start, end)
    }

    fn query_assets_by_owner(&self, owner: &ClientId) -> Result<Vec<Asset>, TransferError> {
        self.registry().query_assets_by_owner(owner)
    }

    fn set_valuation(&self, asset_id: &str, value: u64) -> Result<(), TransferError> {
        let org = self.ctx.verify_client_org_matches_peer()?;
        self.registry().require_asset(asset_id)?;
        self.valuations().set_valuation(&org, asset_id, value)
    }

    fn read_valuation(&self, asset_id: &str) -> Result<Option<Valuation>, TransferError> {
        self.valuations().read_own_valuation(asset_id)
    }

    fn valuation_hash(&self, org: &OrgId, asset_id: &str) -> Result<Option<Hash>, TransferError> {
        self.valuations().valuation_hash(org, asset_id)
    }

    fn agree_to_transfer(&self, asset_id: &str, value: u64) -> Result<(), TransferError> {
        self.coordinator().agree_to_transfer(asset_id, value)
    }

    fn read_agreement(&self, asset_id: &str) -> Result<Option<TransferAgreement>, TransferError> {
        self.agreements().read_agreement(asset_id)
    }

    fn withdraw_agreement(&self, asset_id: &str) -> Result<(), TransferError> {
        self.agreements().withdraw_agreement(asset_id)
    }

    fn transfer_asset(&self, asset_id: &str, buyer_org: &OrgId) -> Result<Asset, TransferError> {
        self.coordinator().transfer_asset(asset_id, buyer_org)
    }

    fn lifecycle(
        &self,
        asset_id: &str,
        owner_org: &OrgId,
        buyer_org: &OrgId,
    ) -> Result<Option<AssetLifecycle>, TransferError> {
        self.coordinator().lifecycle(asset_id, owner_org, buyer_org)
    }
}
