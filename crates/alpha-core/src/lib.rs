//! alpha-core
//!
//! Business logic and services for the points tracker.
//! Depends on alpha-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod account_service;
pub mod error;
pub mod history_service;
pub mod projection;
pub mod storage;
pub mod summary_service;

pub use account_service::*;
pub use error::CoreError;
pub use history_service::*;
pub use projection::*;
pub use storage::*;
pub use summary_service::*;
