//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod gas;
pub(crate) mod logger;
pub(crate) mod retry;
pub(crate) mod wallet_store;

pub use gas::{GasConfig, StandardGasLimits};
pub use logger::setup_logger;
pub use wallet_store::{WalletRecord, WalletStore};
