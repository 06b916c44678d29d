//! alpha-domain
//!
//! Pure domain models (Roster, Account, DailyEntry, Target, summaries).
//! No I/O, no CLI, no storage. Only data types and core invariants.

pub mod account;
pub mod common;
pub mod entry;
pub mod roster;
pub mod summary;
pub mod target;

pub use account::*;
pub use common::*;
pub use entry::*;
pub use roster::*;
pub use summary::*;
pub use target::*;
