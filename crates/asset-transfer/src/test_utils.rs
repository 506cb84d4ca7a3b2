//! Shared fixtures for unit tests.

use crate::adapters::InMemoryLedger;
use crate::domain::{
    AttributeValue, Attributes, ClientId, OrgId, Partition, TransferConfig, TransferError,
};
use crate::ports::inbound::AssetTransferApi;
use crate::ports::outbound::{IdentityContext, PartitionedLedger, TransactionalLedger};
use crate::service::{AssetTransferService, TransferContext};

/// A caller submitting through a peer.
#[derive(Clone, Debug)]
pub struct Party {
    pub caller: ClientId,
    pub org: OrgId,
    pub peer: OrgId,
}

impl Party {
    fn new(caller: &str, org: &str) -> Self {
        let org = OrgId::new(org).unwrap();
        Self {
            caller: ClientId::new(caller).unwrap(),
            peer: org.clone(),
            org,
        }
    }

    /// Same caller, submitting through a peer of `peer`.
    pub fn through_peer(&self, peer: &str) -> Party {
        Party {
            peer: OrgId::new(peer).unwrap(),
            ..self.clone()
        }
    }
}

impl IdentityContext for Party {
    fn caller_identity(&self) -> ClientId {
        self.caller.clone()
    }

    fn caller_organization(&self) -> OrgId {
        self.org.clone()
    }

    fn local_organization(&self) -> OrgId {
        self.peer.clone()
    }
}

pub fn alice() -> Party {
    Party::new("x509::alice", "Org1MSP")
}

pub fn bob() -> Party {
    Party::new("x509::bob", "Org2MSP")
}

pub fn carol() -> Party {
    Party::new("x509::carol", "Org3MSP")
}

pub fn bookshelf_attributes() -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("material".into(), AttributeValue::from("Bamboo"));
    attributes
}

/// In-memory ledger that runs each closure as one committed invocation.
pub struct Harness {
    pub ledger: InMemoryLedger,
    config: TransferConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(TransferConfig::default())
    }

    pub fn with_config(config: TransferConfig) -> Self {
        Self {
            ledger: InMemoryLedger::with_config(config.clone()),
            config,
        }
    }

    /// Run `f` as `party` through the party's peer. Commits on `Ok`, discards
    /// on `Err`.
    pub fn run<T>(
        &self,
        party: &Party,
        f: impl FnOnce(&AssetTransferService<'_>) -> Result<T, TransferError>,
    ) -> Result<T, TransferError> {
        let tx = self.ledger.begin(&party.peer);
        let out = {
            let svc = AssetTransferService::new(TransferContext::new(&tx, party, &self.config));
            f(&svc)?
        };
        self.ledger.commit(tx)?;
        Ok(out)
    }

    /// Create a Bookshelf owned by `party`.
    pub fn create(&self, party: &Party, id: &str) {
        self.run(party, |svc| {
            svc.create_asset("Bookshelf", id, bookshelf_attributes())
        })
        .unwrap();
    }

    /// Store bytes that decode as no record type.
    pub fn corrupt(&self, partition: &Partition, key: &str) {
        let tx = self.ledger.begin(&alice().org);
        tx.put(partition, key, b"{not json".to_vec()).unwrap();
        self.ledger.commit(tx).unwrap();
    }
}
