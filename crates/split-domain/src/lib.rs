//! split-domain
//!
//! Pure domain models (Group, Member, Expense, Split, Payment).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod expense;
pub mod group;
pub mod member;
pub mod payment;

pub use common::*;
pub use expense::*;
pub use group::*;
pub use member::*;
pub use payment::*;
