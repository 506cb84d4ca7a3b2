//! # Test Fixtures
//!
//! Parties of the scenarios and a runner that executes one invocation as one
//! committed transaction, the way a peer would.

use asset_transfer::{
    AssetTransferService, AttributeValue, Attributes, InMemoryLedger, OrgId, StaticIdentity,
    TransactionalLedger, TransferConfig, TransferContext, TransferError,
};
use ledger_telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};
use std::sync::{Arc, OnceLock};

pub const ORG1: &str = "Org1MSP";
pub const ORG2: &str = "Org2MSP";
pub const ORG3: &str = "Org3MSP";

static TELEMETRY: OnceLock<Option<TelemetryGuard>> = OnceLock::new();

/// Install the log subscriber once per test binary, configured from the
/// environment.
pub fn init_logging() {
    TELEMETRY.get_or_init(|| init_telemetry(TelemetryConfig::from_env()).ok());
}

pub fn org(id: &str) -> OrgId {
    OrgId::new(id).unwrap()
}

/// Owner on Org1.
pub fn alice() -> StaticIdentity {
    StaticIdentity::local("x509::CN=alice,OU=client::CN=ca.org1", ORG1).unwrap()
}

/// Buyer on Org2.
pub fn bob() -> StaticIdentity {
    StaticIdentity::local("x509::CN=bob,OU=client::CN=ca.org2", ORG2).unwrap()
}

/// Second buyer on Org3.
pub fn carol() -> StaticIdentity {
    StaticIdentity::local("x509::CN=carol,OU=client::CN=ca.org3", ORG3).unwrap()
}

pub fn bamboo() -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("material".into(), AttributeValue::from("Bamboo"));
    attributes
}

/// A shared ledger seen by every organization's peer, with partition
/// naming taken from the environment.
pub struct Network {
    pub ledger: Arc<InMemoryLedger>,
    pub config: TransferConfig,
}

impl Network {
    pub fn new() -> Self {
        init_logging();
        Self {
            ledger: Arc::new(InMemoryLedger::new()),
            config: TransferConfig::from_env(),
        }
    }

    /// Run `f` as `identity` on a peer of the identity's local organization.
    /// Commits on `Ok`, discards on `Err`.
    pub fn run<T>(
        &self,
        identity: &StaticIdentity,
        f: impl FnOnce(&AssetTransferService<'_>) -> Result<T, TransferError>,
    ) -> Result<T, TransferError> {
        use asset_transfer::IdentityContext;

        let tx = self.ledger.begin(&identity.local_organization());
        let out = {
            let service =
                AssetTransferService::new(TransferContext::new(&tx, identity, &self.config));
            f(&service)?
        };
        self.ledger.commit(tx)?;
        Ok(out)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
