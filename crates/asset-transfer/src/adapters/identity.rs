//! Static Identity Adapter
//!
//! Implements `IdentityContext` from fixed values, for hosts that resolve
//! the caller before invoking the protocol and for tests.

use crate::domain::{ClientId, OrgId, TransferError};
use crate::ports::outbound::IdentityContext;

/// Fixed caller identity and peer organization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticIdentity {
    caller: ClientId,
    caller_org: OrgId,
    peer_org: OrgId,
}

impl StaticIdentity {
    /// Create an identity context.
    pub fn new(caller: ClientId, caller_org: OrgId, peer_org: OrgId) -> Self {
        Self {
            caller,
            caller_org,
            peer_org,
        }
    }

    /// Caller submitting through a peer of its own organization.
    pub fn local(caller: &str, org: &str) -> Result<Self, TransferError> {
        let org = OrgId::new(org)?;
        Ok(Self::new(ClientId::new(caller)?, org.clone(), org))
    }

    /// Caller submitting through a peer of another organization.
    pub fn relayed(caller: &str, caller_org: &str, peer_org: &str) -> Result<Self, TransferError> {
        Ok(Self::new(
            ClientId::new(caller)?,
            OrgId::new(caller_org)?,
            OrgId::new(peer_org)?,
        ))
    }
}

impl IdentityContext for StaticIdentity {
    fn caller_identity(&self) -> ClientId {
        self.caller.clone()
    }

    fn caller_organization(&self) -> OrgId {
        self.caller_org.clone()
    }

    fn local_organization(&self) -> OrgId {
        self.peer_org.clone()
    }
}
