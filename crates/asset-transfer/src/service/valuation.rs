//! # Valuation Store
//!
//! Organization-private valuations and the commitment comparison primitive.
//!
//! A valuation is stored in its organization's private partition under the
//! asset id. Plaintext never leaves that partition; other organizations only
//! ever see the substrate's content hash of the record.

use super::TransferContext;
use crate::domain::{
    decode_record, encode_record, invariant_commitments_match, invariant_positive_value, Hash,
    OrgId, Partition, TransferError, Valuation,
};
use tracing::debug;

const RECORD: &str = "Valuation";

/// Private valuation store.
#[derive(Clone, Copy)]
pub struct ValuationStore<'a> {
    ctx: TransferContext<'a>,
}

impl<'a> ValuationStore<'a> {
    /// Create a store bound to one invocation.
    pub fn new(ctx: TransferContext<'a>) -> Self {
        Self { ctx }
    }

    /// Write `org`'s valuation of `asset_id`, replacing any previous one.
    pub fn set_valuation(&self, org: &OrgId, asset_id: &str, value: u64) -> Result<(), TransferError> {
        invariant_positive_value(value)?;
        let record = encode_record(&Valuation::new(asset_id, value))?;
        self.ctx
            .ledger()
            .put(&Partition::private(org), asset_id, record)?;
        debug!(asset_id = %asset_id, org = %org, "[transfer] Valuation recorded");
        Ok(())
    }

    /// Read `org`'s valuation. Only possible where the substrate holds that
    /// organization's partition.
    pub fn read_valuation(&self, org: &OrgId, asset_id: &str) -> Result<Option<Valuation>, TransferError> {
        self.ctx
            .ledger()
            .get(&Partition::private(org), asset_id)?
            .map(|bytes| decode_record(RECORD, asset_id, &bytes))
            .transpose()
    }

    /// Read the caller organization's own valuation, through a peer of that
    /// organization.
    pub fn read_own_valuation(&self, asset_id: &str) -> Result<Option<Valuation>, TransferError> {
        let org = self.ctx.verify_client_org_matches_peer()?;
        self.read_valuation(&org, asset_id)
    }

    /// Commitment hash of `org`'s valuation.
    pub fn valuation_hash(&self, org: &OrgId, asset_id: &str) -> Result<Option<Hash>, TransferError> {
        Ok(self
            .ctx
            .ledger()
            .hash_of(&Partition::private(org), asset_id)?)
    }

    /// Whether both organizations committed to the identical valuation.
    ///
    /// Fails with `MissingCommitment` if either side has not stated a value.
    pub fn compare_valuations(
        &self,
        owner_org: &OrgId,
        buyer_org: &OrgId,
        asset_id: &str,
    ) -> Result<bool, TransferError> {
        let owner_hash = self.require_hash(owner_org, asset_id)?;
        let buyer_hash = self.require_hash(buyer_org, asset_id)?;
        let matches = invariant_commitments_match(&owner_hash, &buyer_hash);

        debug!(
            asset_id = %asset_id,
            owner_org = %owner_org,
            buyer_org = %buyer_org,
            owner_hash = %hex::encode(owner_hash),
            buyer_hash = %hex::encode(buyer_hash),
            matches,
            "[transfer] Compared valuation commitments"
        );
        Ok(matches)
    }

    /// Delete `org`'s valuation. Absent is not an error.
    pub fn delete_valuation(&self, org: &OrgId, asset_id: &str) -> Result<(), TransferError> {
        self.ctx
            .ledger()
            .delete(&Partition::private(org), asset_id)?;
        Ok(())
    }

    fn require_hash(&self, org: &OrgId, asset_id: &str) -> Result<Hash, TransferError> {
        self.valuation_hash(org, asset_id)?
            .ok_or_else(|| TransferError::MissingCommitment {
                asset_id: asset_id.to_string(),
                org: org.to_string(),
            })
    }
}
