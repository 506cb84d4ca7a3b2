//! Cross-component tests of the transfer protocol over the in-memory ledger.

pub mod fixtures;

mod concurrency;
mod range_queries;
mod request_boundary;
