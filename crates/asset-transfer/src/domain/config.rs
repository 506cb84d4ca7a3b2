//! # Transfer Configuration
//!
//! Partition naming and limits for the transfer protocol.

use super::value_objects::Partition;
use serde::{Deserialize, Serialize};
use std::env;

/// Default shared partition name.
pub const DEFAULT_SHARED_PARTITION: &str = "assetCollection";

/// Default suffix appended to an organization id to name its private partition.
pub const DEFAULT_PRIVATE_SUFFIX: &str = "PrivateCollection";

/// Default object type of transfer agreement composite keys.
pub const DEFAULT_AGREEMENT_OBJECT_TYPE: &str = "transferAgreement";

/// Transfer protocol configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Name of the partition every organization can see.
    pub shared_partition: String,
    /// Suffix of each organization's private partition name.
    pub private_partition_suffix: String,
    /// Object type used to derive agreement keys.
    pub agreement_object_type: String,
    /// Maximum assets a single range or owner query may return (0 = unlimited).
    pub max_range_results: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            shared_partition: DEFAULT_SHARED_PARTITION.to_string(),
            private_partition_suffix: DEFAULT_PRIVATE_SUFFIX.to_string(),
            agreement_object_type: DEFAULT_AGREEMENT_OBJECT_TYPE.to_string(),
            max_range_results: 0,
        }
    }
}

impl TransferConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CT_SHARED_PARTITION`: shared partition name (default: assetCollection)
    /// - `CT_PRIVATE_SUFFIX`: private partition suffix (default: PrivateCollection)
    /// - `CT_AGREEMENT_TYPE`: agreement key object type (default: transferAgreement)
    /// - `CT_MAX_RANGE_RESULTS`: query result cap, 0 for none (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            shared_partition: env::var("CT_SHARED_PARTITION")
                .unwrap_or(defaults.shared_partition),
            private_partition_suffix: env::var("CT_PRIVATE_SUFFIX")
                .unwrap_or(defaults.private_partition_suffix),
            agreement_object_type: env::var("CT_AGREEMENT_TYPE")
                .unwrap_or(defaults.agreement_object_type),
            max_range_results: env::var("CT_MAX_RANGE_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_range_results),
        }
    }

    /// Ledger-level name of `partition`.
    pub fn partition_name(&self, partition: &Partition) -> String {
        match partition {
            Partition::Shared => self.shared_partition.clone(),
            Partition::Private(org) => format!("{}{}", org, self.private_partition_suffix),
        }
    }
}
