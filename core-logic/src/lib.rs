//! # Core Logic - Shared Utilities for the Testnet Seeder
//!
//! This crate provides the ambient pieces shared by every chain crate in the
//! workspace: configuration helpers, typed errors, logging, retries and the
//! generated-wallet record store.
//!
//! ## Modules
//!
//! - [`config`] - Chain configuration and environment resolution
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Task and wallet-loader trait definitions
//! - [`utils`] - Utility modules (logger, retry, gas configuration, wallet store)

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{require_env, resolve_rpc_url, ChainConfig};
pub use error::{ConfigError, NetworkError, WalletError};
pub use traits::{Task, TaskResult, WalletLoader};

pub use utils::{setup_logger, GasConfig, StandardGasLimits, WalletRecord, WalletStore};

pub use utils::gas::{gwei_to_wei, GasConfigToml};
pub use utils::retry::{is_transient_error, with_retry, RetryConfig};
