#![doc(test(attr(deny(warnings))))]

//! Alpha Points tracks gamified point balances per account and projects how
//! many days of accrual remain until a target balance, given the rolling
//! expiry window. This crate wires the projection engine, storage, and
//! configuration together behind an interactive CLI.

pub mod cli;
pub mod core;
pub mod errors;
pub mod utils;

pub use errors::{CliError, PointsError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Alpha Points tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
