//! # Core Logic - Gas Configuration
//!
//! Generic gas configuration shared by the chain crates. This module provides
//! configuration only; chain-specific code turns it into fee quotes.

use serde::Deserialize;

/// Fixed gas limits for transactions that are sent without estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardGasLimits {
    pub deploy: u64,
    pub native_seed: u64,
    pub mint_position: u64,
}

impl Default for StandardGasLimits {
    fn default() -> Self {
        Self {
            deploy: 6_000_000,
            native_seed: 1_000_000,
            mint_position: 1_000_000,
        }
    }
}

/// Configuration for gas management
#[derive(Debug, Clone)]
pub struct GasConfig {
    pub max_gwei: f64,
    pub priority_gwei: f64,
    pub limits: StandardGasLimits,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            max_gwei: 150.0,
            priority_gwei: 1.5,
            limits: StandardGasLimits::default(),
        }
    }
}

impl GasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_fee(mut self, max_gwei: f64) -> Self {
        self.max_gwei = max_gwei;
        self
    }

    pub fn with_priority_fee(mut self, priority_gwei: f64) -> Self {
        self.priority_gwei = priority_gwei;
        self
    }

    /// Fee cap in wei
    pub fn max_fee_wei(&self) -> u128 {
        gwei_to_wei(self.max_gwei) as u128
    }

    /// Tip cap in wei
    pub fn priority_fee_wei(&self) -> u128 {
        gwei_to_wei(self.priority_gwei) as u128
    }

    pub fn limit_deploy(&self) -> u64 {
        self.limits.deploy
    }

    pub fn limit_native_seed(&self) -> u64 {
        self.limits.native_seed
    }

    pub fn limit_mint_position(&self) -> u64 {
        self.limits.mint_position
    }
}

/// Convert gwei to wei as u64
pub fn gwei_to_wei(gwei: f64) -> u64 {
    (gwei * 1e9).round() as u64
}

/// Deserialize helper for GasConfig from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GasConfigToml {
    pub max_gwei: Option<f64>,
    pub priority_gwei: Option<f64>,
    pub limit_deploy: Option<u64>,
    pub limit_native_seed: Option<u64>,
    pub limit_mint_position: Option<u64>,
}

impl From<GasConfigToml> for GasConfig {
    fn from(toml: GasConfigToml) -> Self {
        let defaults = GasConfig::default();
        Self {
            max_gwei: toml.max_gwei.unwrap_or(defaults.max_gwei),
            priority_gwei: toml.priority_gwei.unwrap_or(defaults.priority_gwei),
            limits: StandardGasLimits {
                deploy: toml.limit_deploy.unwrap_or(defaults.limits.deploy),
                native_seed: toml
                    .limit_native_seed
                    .unwrap_or(defaults.limits.native_seed),
                mint_position: toml
                    .limit_mint_position
                    .unwrap_or(defaults.limits.mint_position),
            },
        }
    }
}
