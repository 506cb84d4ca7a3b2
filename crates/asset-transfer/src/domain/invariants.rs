//! # Domain Invariants
//!
//! Business rules checked before any ledger mutation.

use super::entities::{Asset, TransferAgreement};
use super::errors::{Hash, TransferError};
use super::value_objects::{ClientId, OrgId};

/// Invariant: stated values are strictly positive.
pub fn invariant_positive_value(value: u64) -> Result<(), TransferError> {
    if value == 0 {
        return Err(TransferError::InvalidInput(
            "valuation must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Invariant: anti-relay.
///
/// The submitting client must belong to the organization of the peer that
/// executes the operation.
pub fn invariant_client_org_matches_peer(
    client_org: &OrgId,
    peer_org: &OrgId,
) -> Result<(), TransferError> {
    if client_org != peer_org {
        return Err(TransferError::OrganizationMismatch {
            client_org: client_org.to_string(),
            peer_org: peer_org.to_string(),
        });
    }
    Ok(())
}

/// Invariant: only the current owner mutates an asset.
pub fn invariant_caller_is_owner(asset: &Asset, caller: &ClientId) -> Result<(), TransferError> {
    if asset.owner != *caller {
        return Err(TransferError::NotOwner {
            asset_id: asset.id.clone(),
            caller: caller.to_string(),
        });
    }
    Ok(())
}

/// Invariant: both commitments are bit-for-bit equal.
pub fn invariant_commitments_match(owner_hash: &Hash, buyer_hash: &Hash) -> bool {
    owner_hash == buyer_hash
}

/// Invariant: a transfer needs a registered, non-empty buyer.
pub fn invariant_agreement_has_buyer(
    asset_id: &str,
    agreement: Option<&TransferAgreement>,
) -> Result<ClientId, TransferError> {
    agreement
        .and_then(TransferAgreement::buyer)
        .ok_or_else(|| TransferError::NoAgreement(asset_id.to_string()))
}
