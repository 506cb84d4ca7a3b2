//! # Request/Response Payloads
//!
//! Wire format of the request boundary. Requests are adjacently tagged:
//!
//! ```json
//! {
//!   "correlationId": "6f1c...",
//!   "request": { "operation": "SetValuation", "args": { "assetId": "shelf-1", "value": 500 } }
//! }
//! ```
//!
//! Argument structs reject unknown fields so a misspelled argument fails the
//! request instead of silently defaulting.

use crate::domain::{
    Asset, AssetLifecycle, Attributes, ClientId, ErrorKind, OrgId, TransferAgreement,
    TransferError, Valuation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request with the id used to correlate its response and log lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequestEnvelope {
    /// Caller-chosen request id, echoed in the response.
    pub correlation_id: Uuid,
    /// The operation to run.
    pub request: TransferRequest,
}

impl RequestEnvelope {
    /// Wrap `request` under a fresh correlation id.
    pub fn new(request: TransferRequest) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            request,
        }
    }
}

/// One public protocol operation with its arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "args")]
pub enum TransferRequest {
    /// Create an asset owned by the caller.
    CreateAsset(CreateAssetPayload),
    /// Read the public asset record.
    ReadAsset(AssetIdPayload),
    /// Delete an asset with no registered buyer.
    DeleteAsset(AssetIdPayload),
    /// Replace the public attributes of an owned asset.
    UpdateAssetAttributes(UpdateAttributesPayload),
    /// Assets with ids in a half-open range.
    ListAssetsByRange(RangePayload),
    /// Assets held by one owner.
    QueryAssetsByOwner(OwnerPayload),
    /// State the caller organization's price.
    SetValuation(ValuePayload),
    /// Read the caller organization's price.
    ReadValuation(AssetIdPayload),
    /// Commitment hash of any organization's price.
    GetValuationHash(ValuationHashPayload),
    /// Commit a bid and register as buyer.
    AgreeToTransfer(ValuePayload),
    /// Read the transfer agreement.
    ReadAgreement(AssetIdPayload),
    /// Cancel the transfer agreement.
    WithdrawAgreement(AssetIdPayload),
    /// Hand the asset to the registered buyer.
    TransferAsset(TransferAssetPayload),
    /// Protocol state between two organizations.
    ReadLifecycle(LifecyclePayload),
}

impl TransferRequest {
    /// Operation name, as it appears on the wire.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::CreateAsset(_) => "CreateAsset",
            Self::ReadAsset(_) => "ReadAsset",
            Self::DeleteAsset(_) => "DeleteAsset",
            Self::UpdateAssetAttributes(_) => "UpdateAssetAttributes",
            Self::ListAssetsByRange(_) => "ListAssetsByRange",
            Self::QueryAssetsByOwner(_) => "QueryAssetsByOwner",
            Self::SetValuation(_) => "SetValuation",
            Self::ReadValuation(_) => "ReadValuation",
            Self::GetValuationHash(_) => "GetValuationHash",
            Self::AgreeToTransfer(_) => "AgreeToTransfer",
            Self::ReadAgreement(_) => "ReadAgreement",
            Self::WithdrawAgreement(_) => "WithdrawAgreement",
            Self::TransferAsset(_) => "TransferAsset",
            Self::ReadLifecycle(_) => "ReadLifecycle",
        }
    }
}

/// Arguments of `CreateAsset`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAssetPayload {
    /// New asset id.
    pub asset_id: String,
    /// Classification tag.
    pub kind: String,
    /// Public attributes; empty if omitted.
    #[serde(default)]
    pub attributes: Attributes,
}

/// Arguments of operations addressed by asset id alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetIdPayload {
    /// Target asset.
    pub asset_id: String,
}

impl AssetIdPayload {
    /// Address `asset_id`.
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
        }
    }
}

/// Arguments of `UpdateAssetAttributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAttributesPayload {
    /// Target asset.
    pub asset_id: String,
    /// Replacement attributes.
    pub attributes: Attributes,
}

/// Arguments of `ListAssetsByRange`. Empty bounds are open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RangePayload {
    /// Inclusive lower bound.
    #[serde(default)]
    pub start: String,
    /// Exclusive upper bound.
    #[serde(default)]
    pub end: String,
}

/// Arguments of `QueryAssetsByOwner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OwnerPayload {
    /// Owner identity to match.
    pub owner: ClientId,
}

/// Arguments of `SetValuation` and `AgreeToTransfer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValuePayload {
    /// Asset being valued.
    pub asset_id: String,
    /// Stated value, must be positive.
    pub value: u64,
}

/// Arguments of `GetValuationHash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValuationHashPayload {
    /// Organization whose partition is hashed.
    pub org: OrgId,
    /// Asset being valued.
    pub asset_id: String,
}

/// Arguments of `TransferAsset`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransferAssetPayload {
    /// Asset under transfer.
    pub asset_id: String,
    /// Organization holding the buyer's bid.
    pub buyer_org: OrgId,
}

/// Arguments of `ReadLifecycle`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LifecyclePayload {
    /// Target asset.
    pub asset_id: String,
    /// Selling organization.
    pub owner_org: OrgId,
    /// Buying organization.
    pub buyer_org: OrgId,
}

/// Outcome of one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    /// Id of the request; absent if the envelope itself failed to decode.
    pub correlation_id: Option<Uuid>,
    /// Typed body on success, error kind and message on failure.
    pub result: Result<ResponseBody, ResponseError>,
}

impl TransferResponse {
    /// Whether the request succeeded (and its writes were committed).
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Error kind of a failed request.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.result.as_ref().err().map(|e| e.kind)
    }
}

/// Success body, tagged by its shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ResponseBody {
    /// Mutation with nothing to return.
    Empty,
    /// One asset, absent if not found.
    Asset(Option<Asset>),
    /// Enumerated assets in key order.
    Assets(Vec<Asset>),
    /// The caller organization's valuation.
    Valuation(Option<Valuation>),
    /// Lowercase hex of the commitment hash.
    Hash(Option<String>),
    /// The transfer agreement.
    Agreement(Option<TransferAgreement>),
    /// Protocol state, absent if the asset does not exist.
    Lifecycle(Option<AssetLifecycle>),
}

/// Failure body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable cause.
    pub message: String,
}

impl From<&TransferError> for ResponseError {
    fn from(err: &TransferError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
