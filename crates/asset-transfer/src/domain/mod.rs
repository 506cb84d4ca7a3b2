//! # Domain Module
//!
//! Records, identities, keys and rules of the transfer protocol.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod keys;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use keys::{composite_key, is_composite_key, split_composite_key, KeyError};
pub use value_objects::*;
