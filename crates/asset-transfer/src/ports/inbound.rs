//! # Inbound Ports
//!
//! API trait defining what the transfer protocol can do for a caller.
//!
//! Every method runs against the ledger and identity bound to the
//! implementation for one invocation; the caller's identity is never passed
//! as an argument.

use crate::domain::{
    Asset, AssetLifecycle, Attributes, ClientId, Hash, OrgId, TransferAgreement, TransferError,
    Valuation,
};

/// Confidential asset transfer API - inbound port.
pub trait AssetTransferApi {
    // === Asset Registry ===

    /// Create an asset owned by the caller.
    fn create_asset(
        &self,
        kind: &str,
        id: &str,
        attributes: Attributes,
    ) -> Result<Asset, TransferError>;

    /// Read a public asset record. Absent is `Ok(None)`.
    fn read_asset(&self, id: &str) -> Result<Option<Asset>, TransferError>;

    /// Delete an asset and the caller organization's valuation of it.
    fn delete_asset(&self, id: &str) -> Result<(), TransferError>;

    /// Replace the public attributes of an asset the caller owns.
    fn update_asset_attributes(
        &self,
        id: &str,
        attributes: Attributes,
    ) -> Result<Asset, TransferError>;

    /// Assets with ids in `[start, end)`, in key order.
    fn list_assets_by_range(&self, start: &str, end: &str) -> Result<Vec<Asset>, TransferError>;

    /// Assets currently owned by `owner`.
    fn query_assets_by_owner(&self, owner: &ClientId) -> Result<Vec<Asset>, TransferError>;

    // === Valuation Store ===

    /// State the caller organization's private value for an asset.
    fn set_valuation(&self, asset_id: &str, value: u64) -> Result<(), TransferError>;

    /// Read the caller organization's own valuation.
    fn read_valuation(&self, asset_id: &str) -> Result<Option<Valuation>, TransferError>;

    /// Commitment hash of `org`'s valuation.
    fn valuation_hash(&self, org: &OrgId, asset_id: &str) -> Result<Option<Hash>, TransferError>;

    // === Agreement Manager ===

    /// Buyer commits a bid and registers intent to buy.
    fn agree_to_transfer(&self, asset_id: &str, value: u64) -> Result<(), TransferError>;

    /// Read the registered agreement.
    fn read_agreement(&self, asset_id: &str) -> Result<Option<TransferAgreement>, TransferError>;

    /// Buyer cancels its agreement.
    fn withdraw_agreement(&self, asset_id: &str) -> Result<(), TransferError>;

    // === Transfer Coordinator ===

    /// Owner transfers the asset to the agreed buyer.
    fn transfer_asset(&self, asset_id: &str, buyer_org: &OrgId) -> Result<Asset, TransferError>;

    /// Protocol state of an asset between two organizations.
    fn lifecycle(
        &self,
        asset_id: &str,
        owner_org: &OrgId,
        buyer_org: &OrgId,
    ) -> Result<Option<AssetLifecycle>, TransferError>;
}
