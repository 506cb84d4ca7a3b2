//! # Confidential Asset Transfer Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs          # Parties, shared ledger, invocation runner
//!     ├── scenarios.rs         # End-to-end protocol runs between organizations
//!     ├── range_queries.rs     # Registry enumeration
//!     ├── concurrency.rs       # Commit races on the MVCC ledger
//!     └── request_boundary.rs  # JSON requests through RequestHandler
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p transfer-tests
//!
//! # By category
//! cargo test -p transfer-tests integration::concurrency::
//!
//! # With protocol logs
//! CT_LOG_LEVEL=asset_transfer=debug cargo test -p transfer-tests -- --nocapture
//! ```

pub mod integration;
