//! # Request Boundary
//!
//! JSON request/response handling for hosts that submit operations as
//! messages rather than calling [`crate::ports::inbound::AssetTransferApi`]
//! directly.
//!
//! Each request runs as one transaction: it commits on success and leaves
//! no writes behind on failure.

pub mod handler;
pub mod payloads;

pub use handler::*;
pub use payloads::*;
