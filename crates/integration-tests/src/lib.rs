//! # Integration Tests Crate
//!
//! Cross-crate tests that exercise the whole pipeline: parse a genesis
//! config, commit it against a fresh `MemoryStore`, marshal the resulting
//! block into its RPC shape, and check the output against known networks
//! and fork combinations.
//!
//! ## Structure
//!
//! ```text
//! integration-tests/
//! └── src/
//!     ├── lib.rs      # This file
//!     └── pipeline.rs # Config -> commit -> RPC JSON flows
//! ```

pub mod pipeline;
