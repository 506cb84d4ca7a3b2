//! # Agreement Manager
//!
//! Lifecycle of `TransferAgreement` records, stored in the shared partition
//! under the composite key `(agreement_object_type, [asset_id])`.
//!
//! Proposing does not check for an existing agreement: the last buyer to
//! propose replaces any earlier one. Callers that need a single buyer must
//! serialize proposals themselves.

use super::registry::AssetRegistry;
use super::valuation::ValuationStore;
use super::TransferContext;
use crate::domain::{
    decode_record, encode_record, ClientId, Partition, TransferAgreement, TransferError,
};
use tracing::{info, warn};

const RECORD: &str = "TransferAgreement";

/// Transfer agreement manager.
#[derive(Clone, Copy)]
pub struct AgreementManager<'a> {
    ctx: TransferContext<'a>,
}

impl<'a> AgreementManager<'a> {
    /// Create a manager bound to one invocation.
    pub fn new(ctx: TransferContext<'a>) -> Self {
        Self { ctx }
    }

    /// Ledger key of the agreement for `asset_id`.
    pub fn agreement_key(&self, asset_id: &str) -> Result<String, TransferError> {
        Ok(self
            .ctx
            .ledger()
            .composite_key(&self.ctx.config().agreement_object_type, &[asset_id])?)
    }

    /// Register `buyer` as the prospective buyer of an existing asset.
    pub fn propose_agreement(&self, asset_id: &str, buyer: &ClientId) -> Result<(), TransferError> {
        AssetRegistry::new(self.ctx).require_asset(asset_id)?;
        let key = self.agreement_key(asset_id)?;

        if let Some(previous) = self.read_at(&key)? {
            if previous.buyer_id != buyer.as_str() {
                warn!(
                    asset_id = %asset_id,
                    previous_buyer = %previous.buyer_id,
                    buyer = %buyer,
                    "[transfer] Replacing existing transfer agreement"
                );
            }
        }

        let record = encode_record(&TransferAgreement::new(asset_id, buyer))?;
        self.ctx.ledger().put(&Partition::Shared, &key, record)?;
        info!(asset_id = %asset_id, buyer = %buyer, "[transfer] Transfer agreement proposed");
        Ok(())
    }

    /// Read the agreement for `asset_id`. Absent is `Ok(None)`.
    pub fn read_agreement(&self, asset_id: &str) -> Result<Option<TransferAgreement>, TransferError> {
        let key = self.agreement_key(asset_id)?;
        self.read_at(&key)
    }

    /// Cancel the agreement: removes the caller organization's valuation and
    /// the shared agreement record.
    pub fn withdraw_agreement(&self, asset_id: &str) -> Result<(), TransferError> {
        let org = self.ctx.verify_client_org_matches_peer()?;
        if self.read_agreement(asset_id)?.is_none() {
            return Err(TransferError::AgreementNotFound(asset_id.to_string()));
        }

        ValuationStore::new(self.ctx).delete_valuation(&org, asset_id)?;
        self.delete_agreement(asset_id)?;

        info!(asset_id = %asset_id, org = %org, "[transfer] Transfer agreement withdrawn");
        Ok(())
    }

    /// Remove the agreement record.
    pub(crate) fn delete_agreement(&self, asset_id: &str) -> Result<(), TransferError> {
        let key = self.agreement_key(asset_id)?;
        self.ctx.ledger().delete(&Partition::Shared, &key)?;
        Ok(())
    }

    fn read_at(&self, key: &str) -> Result<Option<TransferAgreement>, TransferError> {
        self.ctx
            .ledger()
            .get(&Partition::Shared, key)?
            .map(|bytes| decode_record(RECORD, key, &bytes))
            .transpose()
    }
}
