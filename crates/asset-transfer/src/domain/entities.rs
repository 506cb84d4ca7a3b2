//! # Domain Entities
//!
//! Persisted records of the transfer protocol.
//!
//! All records are JSON with a fixed field order. Encoding is deterministic,
//! which is what makes the substrate's content hash usable as a commitment:
//! two organizations stating the same value for the same asset produce
//! byte-identical valuation records.

use super::errors::TransferError;
use super::value_objects::ClientId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Public attribute value (string or number only).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Integral number.
    Integer(i64),
    /// Integral number above `i64::MAX`.
    Unsigned(u64),
    /// Fractional number.
    Decimal(f64),
    /// Free text.
    Text(String),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

/// Ordered attribute map, e.g. `{ "color": "blue", "size": 5 }`.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Public asset record, stored in the shared partition under its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Asset {
    /// Unique asset id (ledger key).
    pub id: String,
    /// Classification tag, e.g. `Bookshelf`.
    pub kind: String,
    /// Public attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Current owner identity.
    pub owner: ClientId,
}

/// Organization-private valuation record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Valuation {
    /// Asset being valued.
    pub asset_id: String,
    /// Stated value, always > 0.
    pub value: u64,
}

impl Valuation {
    /// Create a valuation record.
    pub fn new(asset_id: impl Into<String>, value: u64) -> Self {
        Self {
            asset_id: asset_id.into(),
            value,
        }
    }
}

/// Buyer intent, stored in the shared partition under a composite key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransferAgreement {
    /// Asset the buyer wants.
    pub asset_id: String,
    /// Buyer identity. Kept raw: an empty buyer is a protocol state
    /// (no agreement), not a decode failure.
    pub buyer_id: String,
}

impl TransferAgreement {
    /// Create an agreement for `buyer`.
    pub fn new(asset_id: impl Into<String>, buyer: &ClientId) -> Self {
        Self {
            asset_id: asset_id.into(),
            buyer_id: buyer.as_str().to_string(),
        }
    }

    /// Registered buyer, if any.
    pub fn buyer(&self) -> Option<ClientId> {
        ClientId::new(self.buyer_id.clone()).ok()
    }
}

/// Serialize a record for storage.
pub fn encode_record<T: Serialize>(record: &T) -> Result<Vec<u8>, TransferError> {
    serde_json::to_vec(record)
        .map_err(|e| TransferError::InvalidInput(format!("record not serializable: {e}")))
}

/// Decode a stored record, naming the record type and key on failure.
pub fn decode_record<T: DeserializeOwned>(
    record: &'static str,
    key: &str,
    bytes: &[u8],
) -> Result<T, TransferError> {
    serde_json::from_slice(bytes).map_err(|e| TransferError::Decode {
        record,
        key: key.to_string(),
        reason: e.to_string(),
    })
}
