//! # Request Handler
//!
//! Runs one decoded request as one ledger transaction.
//!
//! ## Process
//!
//! 1. Decode the envelope (`InvalidInput` on malformed bytes)
//! 2. Begin a transaction executed by the identity's local organization
//! 3. Dispatch to [`AssetTransferService`]
//! 4. Commit on success, drop the transaction on failure
//!
//! A commit conflict turns a successful dispatch into a failed response;
//! none of its writes are applied.

use super::payloads::{
    RequestEnvelope, ResponseBody, ResponseError, TransferRequest, TransferResponse,
};
use crate::domain::{LedgerError, TransferConfig, TransferError};
use crate::ports::inbound::AssetTransferApi;
use crate::ports::outbound::{IdentityContext, TransactionalLedger};
use crate::service::{AssetTransferService, TransferContext};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// Request handler statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HandlerStats {
    /// Requests received, decodable or not.
    pub requests: u64,
    /// Requests whose writes were committed.
    pub committed: u64,
    /// Requests rejected by decoding or by the protocol.
    pub rejected: u64,
    /// Requests that passed the protocol but lost a commit race.
    pub conflicts: u64,
}

/// Request boundary over a transactional ledger.
pub struct RequestHandler<L: TransactionalLedger> {
    ledger: Arc<L>,
    config: TransferConfig,
    stats: RwLock<HandlerStats>,
}

impl<L: TransactionalLedger> RequestHandler<L> {
    /// Create a handler with default configuration.
    pub fn new(ledger: Arc<L>) -> Self {
        Self::with_config(ledger, TransferConfig::default())
    }

    /// Create a handler with custom configuration.
    pub fn with_config(ledger: Arc<L>, config: TransferConfig) -> Self {
        Self {
            ledger,
            config,
            stats: RwLock::new(HandlerStats::default()),
        }
    }

    /// Current statistics.
    pub fn stats(&self) -> HandlerStats {
        self.stats.read().clone()
    }

    /// Decode and run a JSON-encoded [`RequestEnvelope`].
    pub fn handle(&self, identity: &dyn IdentityContext, bytes: &[u8]) -> TransferResponse {
        match serde_json::from_slice::<RequestEnvelope>(bytes) {
            Ok(envelope) => self.handle_envelope(identity, envelope),
            Err(e) => {
                {
                    let mut stats = self.stats.write();
                    stats.requests += 1;
                    stats.rejected += 1;
                }
                warn!(error = %e, "[transfer] Malformed request rejected");
                let err = TransferError::InvalidInput(format!("malformed request: {e}"));
                TransferResponse {
                    correlation_id: None,
                    result: Err(ResponseError::from(&err)),
                }
            }
        }
    }

    /// Run a decoded request.
    pub fn handle_envelope(
        &self,
        identity: &dyn IdentityContext,
        envelope: RequestEnvelope,
    ) -> TransferResponse {
        let RequestEnvelope {
            correlation_id,
            request,
        } = envelope;
        let span = info_span!(
            "transfer_request",
            correlation_id = %correlation_id,
            operation = request.operation(),
        );
        let _guard = span.enter();
        self.stats.write().requests += 1;

        let result = self.execute(identity, request);
        if let Err(e) = &result {
            let mut stats = self.stats.write();
            stats.rejected += 1;
            if matches!(e, TransferError::Substrate(LedgerError::Conflict { .. })) {
                stats.conflicts += 1;
            }
            info!(kind = ?e.kind(), error = %e, "[transfer] Request rejected");
        }

        TransferResponse {
            correlation_id: Some(correlation_id),
            result: result.map_err(|e| ResponseError::from(&e)),
        }
    }

    fn execute(
        &self,
        identity: &dyn IdentityContext,
        request: TransferRequest,
    ) -> Result<ResponseBody, TransferError> {
        let tx = self.ledger.begin(&identity.local_organization());
        let body = {
            let service = AssetTransferService::new(TransferContext::new(&tx, identity, &self.config));
            dispatch(&service, request)?
        };

        let writes = self.ledger.commit(tx)?;
        self.stats.write().committed += 1;
        debug!(writes, "[transfer] Request committed");
        Ok(body)
    }
}

fn dispatch(
    service: &dyn AssetTransferApi,
    request: TransferRequest,
) -> Result<ResponseBody, TransferError> {
    use TransferRequest::*;

    let body = match request {
        CreateAsset(p) => {
            ResponseBody::Asset(Some(service.create_asset(&p.kind, &p.asset_id, p.attributes)?))
        }
        ReadAsset(p) => ResponseBody::Asset(service.read_asset(&p.asset_id)?),
        DeleteAsset(p) => {
            service.delete_asset(&p.asset_id)?;
            ResponseBody::Empty
        }
        UpdateAssetAttributes(p) => ResponseBody::Asset(Some(
            service.update_asset_attributes(&p.asset_id, p.attributes)?,
        )),
        ListAssetsByRange(p) => ResponseBody::Assets(service.list_assets_by_range(&p.start, &p.end)?),
        QueryAssetsByOwner(p) => ResponseBody::Assets(service.query_assets_by_owner(&p.owner)?),
        SetValuation(p) => {
            service.set_valuation(&p.asset_id, p.value)?;
            ResponseBody::Empty
        }
        ReadValuation(p) => ResponseBody::Valuation(service.read_valuation(&p.asset_id)?),
        GetValuationHash(p) => ResponseBody::Hash(
            service
                .valuation_hash(&p.org, &p.asset_id)?
                .map(hex::encode),
        ),
        AgreeToTransfer(p) => {
            service.agree_to_transfer(&p.asset_id, p.value)?;
            ResponseBody::Empty
        }
        ReadAgreement(p) => ResponseBody::Agreement(service.read_agreement(&p.asset_id)?),
        WithdrawAgreement(p) => {
            service.withdraw_agreement(&p.asset_id)?;
            ResponseBody::Empty
        }
        TransferAsset(p) => {
            ResponseBody::Asset(Some(service.transfer_asset(&p.asset_id, &p.buyer_org)?))
        }
        ReadLifecycle(p) => {
            ResponseBody::Lifecycle(service.lifecycle(&p.asset_id, &p.owner_org, &p.buyer_org)?)
        }
    };
    Ok(body)
}
