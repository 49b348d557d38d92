//! Error taxonomy for the seeding pipeline.

use crate::math::MathError;
use alloy_primitives::{Address, B256, U256};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// The acting wallet cannot cover the quoted gas cost
    #[error("Insufficient gas in wallet for {action}: balance {balance} wei, required {required} wei")]
    InsufficientGas {
        action: String,
        balance: U256,
        required: U256,
    },

    #[error("No EIP-1559 fee quote available for {action}")]
    GasQuoteUnavailable { action: String },

    #[error("Deployment of {contract} returned no contract address (tx {tx_hash})")]
    MissingContractAddress { contract: String, tx_hash: B256 },

    #[error("Transaction reverted during {action}: {tx_hash}")]
    TransactionReverted { action: String, tx_hash: B256 },

    #[error("No pool for {token0}/{token1} at fee {fee}")]
    PoolNotFound {
        token0: Address,
        token1: Address,
        fee: u32,
    },

    #[error("Artifact error for {contract}: {reason}")]
    Artifact { contract: String, reason: String },

    #[error(transparent)]
    Math(#[from] MathError),
}

impl SeedError {
    pub fn artifact(contract: &str, reason: impl Into<String>) -> Self {
        SeedError::Artifact {
            contract: contract.to_string(),
            reason: reason.into(),
        }
    }
}
