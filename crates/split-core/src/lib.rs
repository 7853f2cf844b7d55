//! split-core
//!
//! Balance calculation, integrity validation and group services.
//! Depends on split-domain. No CLI, no terminal I/O, no direct file access.

pub mod balance_service;
pub mod error;
pub mod format;
pub mod group_service;
pub mod integrity;
pub mod settlement_service;
pub mod storage;
pub mod view;

pub use balance_service::*;
pub use error::{CoreError, IntegrityError};
pub use format::*;
pub use group_service::*;
pub use settlement_service::*;
pub use storage::{group_warnings, GroupStorage, MemoryGroupStorage};
pub use view::*;
