#![doc(test(attr(deny(warnings))))]

//! SplitLedger computes who owes what inside groups that share expenses.
//!
//! The heavy lifting lives in the workspace crates re-exported here; this
//! crate adds the unified error type, tracing setup and the CLI.

pub mod cli;
pub mod errors;
pub mod utils;

pub use split_config as config;
pub use split_core as balance;
pub use split_domain as domain;
pub use split_storage_json as storage;

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    if utils::init_tracing() {
        tracing::debug!("SplitLedger tracing initialized.");
    }
}
