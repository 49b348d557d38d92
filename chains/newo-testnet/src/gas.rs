//! EIP-1559 fee quotes.
//!
//! A quote is fetched right before each transaction that needs an
//! affordability check. When the node cannot produce a fee-market estimate the
//! quote is [`GasQuote::Unavailable`] and callers decide whether to skip or fail.

use crate::error::SeedError;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::U256;
use core_logic::GasConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasQuote {
    Eip1559 {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
    Unavailable,
}

impl GasQuote {
    pub async fn fetch(provider: &(dyn Provider + Send + Sync), config: &GasConfig) -> Self {
        match provider.estimate_eip1559_fees().await {
            Ok(estimate) => Self::from_estimate(
                estimate.max_fee_per_gas,
                estimate.max_priority_fee_per_gas,
                config,
            ),
            Err(e) => {
                debug!("Fee estimate unavailable: {}", e);
                Self::Unavailable
            }
        }
    }

    /// Caps the node's estimate at the configured fee and tip limits; the tip never exceeds the max fee.
    pub fn from_estimate(
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
        config: &GasConfig,
    ) -> Self {
        let max_fee_per_gas = max_fee_per_gas.min(config.max_fee_wei());
        let max_priority_fee_per_gas = max_priority_fee_per_gas
            .min(config.priority_fee_wei())
            .min(max_fee_per_gas);
        Self::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Eip1559 { .. })
    }

    /// Worst-case cost of `gas_limit` units at this quote
    pub fn cost(&self, gas_limit: u64) -> Option<U256> {
        match self {
            Self::Eip1559 {
                max_fee_per_gas, ..
            } => Some(U256::from(*max_fee_per_gas) * U256::from(gas_limit)),
            Self::Unavailable => None,
        }
    }

    /// Returns the cost when `balance` covers it.
    pub fn ensure_affordable(
        &self,
        balance: U256,
        gas_limit: u64,
        action: &str,
    ) -> Result<U256, SeedError> {
        let required = self
            .cost(gas_limit)
            .ok_or_else(|| SeedError::GasQuoteUnavailable {
                action: action.to_string(),
            })?;

        if balance < required {
            return Err(SeedError::InsufficientGas {
                action: action.to_string(),
                balance,
                required,
            });
        }
        Ok(required)
    }

    pub fn apply(&self, tx: TransactionRequest) -> TransactionRequest {
        match self {
            Self::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => tx
                .max_fee_per_gas(*max_fee_per_gas)
                .max_priority_fee_per_gas(*max_priority_fee_per_gas),
            Self::Unavailable => tx,
        }
    }
}
