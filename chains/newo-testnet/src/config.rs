//! Configuration loader for the NEWO testnet tools.
//!
//! Static settings live in `config/config.toml`; secrets come from the
//! environment (`.env` is loaded by each binary through `dotenv`).

use crate::deploy::TokenSet;
use alloy_primitives::utils::{parse_ether, parse_units};
use alloy_primitives::{Address, U256, address};
use anyhow::{Context, Result};
use core_logic::{
    ChainConfig, ConfigError, GasConfig, GasConfigToml, require_env, resolve_rpc_url,
};
use serde::Deserialize;
use std::fs;
use zeroize::Zeroizing;

/// Environment variable holding the deployer's private key
pub const DEPLOYER_KEY_ENV: &str = "PRIVATE_KEY";

/// NEWO always uses 18 decimals
pub const NEWO_DECIMALS: u8 = 18;

#[derive(Debug, Clone, Deserialize)]
pub struct SeederConfig {
    /// RPC endpoint, may contain the `{API_KEY}` placeholder
    pub rpc_url: String,
    /// Environment variable substituted into `rpc_url`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    pub chain_id: u64,
    /// Hardhat `artifacts/` directory holding compiled contracts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,
    #[serde(default = "default_wallets_csv")]
    pub wallets_csv: String,
    /// Wallets generated and seeded per run
    pub amount_wallets: usize,
    /// How many of those wallets also lock NEWO in VeNewO
    #[serde(default)]
    pub amount_venewo_wallets: usize,
    /// Native currency sent to each wallet, in ether
    pub amount_eth_seed: String,
    /// USDC swapped into NEWO per wallet, in whole tokens
    pub swap_amount_in: String,
    /// Pause between per-wallet steps
    #[serde(default = "default_call_delay_ms")]
    pub call_delay_ms: u64,
    /// USDC per NEWO used when a new pool has to be initialized
    #[serde(default = "default_initial_price")]
    pub initial_price: String,
    #[serde(default = "default_pool_fee")]
    pub pool_fee: u32,
    #[serde(default = "default_usdc_decimals")]
    pub usdc_decimals: u8,
    #[serde(default)]
    pub gas: GasConfigToml,
    #[serde(default)]
    pub addresses: AddressBook,
}

/// Periphery contracts plus the optional token and pool addresses of an earlier run
#[derive(Debug, Clone, Deserialize)]
pub struct AddressBook {
    #[serde(default = "default_position_manager")]
    pub position_manager: Address,
    #[serde(default = "default_swap_router")]
    pub swap_router: Address,
    #[serde(default = "default_factory")]
    pub factory: Address,
    #[serde(default = "default_quoter")]
    pub quoter: Address,
    pub newo: Option<Address>,
    pub usdc: Option<Address>,
    pub venewo: Option<Address>,
    pub pool: Option<Address>,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self {
            position_manager: default_position_manager(),
            swap_router: default_swap_router(),
            factory: default_factory(),
            quoter: default_quoter(),
            newo: None,
            usdc: None,
            venewo: None,
            pool: None,
        }
    }
}

impl AddressBook {
    /// Token addresses of an earlier deployment; all three must be configured.
    pub fn token_set(&self) -> Result<TokenSet, ConfigError> {
        let require = |value: Option<Address>, field: &str| {
            value.ok_or_else(|| ConfigError::MissingField {
                field: format!("addresses.{}", field),
            })
        };
        Ok(TokenSet {
            newo: require(self.newo, "newo")?,
            usdc: require(self.usdc, "usdc")?,
            venewo: require(self.venewo, "venewo")?,
        })
    }
}

fn default_api_key_env() -> String {
    "ALCHEMY_GORLI_KEY".to_string()
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

fn default_wallets_csv() -> String {
    "testnetLpWallets.csv".to_string()
}

fn default_call_delay_ms() -> u64 {
    1000
}

fn default_initial_price() -> String {
    "0.1".to_string()
}

fn default_pool_fee() -> u32 {
    3000
}

fn default_usdc_decimals() -> u8 {
    18
}

fn default_position_manager() -> Address {
    address!("C36442b4a4522E871399CD717aBDD847Ab11FE88")
}

fn default_swap_router() -> Address {
    address!("E592427A0AEce92De3Edee1F18E0157C05861564")
}

fn default_factory() -> Address {
    address!("1F98431c8aD98523631AE4a59f267346ea31F984")
}

fn default_quoter() -> Address {
    address!("b27308f9F90D607463bb33eA1BeBb41C27CE5AB6")
}

impl SeederConfig {
    /// Load configuration from a TOML file
    pub fn from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::IoError {
                path: path.to_string(),
                msg: e.to_string(),
            },
        })?;
        Self::from_toml(&content).context(format!("Invalid config in {}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the decimal amounts up front so a typo fails before any transaction is sent
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.eth_seed_wei()?;
        self.swap_amount_wei()?;
        self.initial_usdc_per_newo()?;
        if self.amount_wallets == 0 {
            return Err(ConfigError::InvalidValue {
                field: "amount_wallets".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn eth_seed_wei(&self) -> Result<U256, ConfigError> {
        parse_ether(&self.amount_eth_seed).map_err(|e| invalid("amount_eth_seed", e))
    }

    pub fn swap_amount_wei(&self) -> Result<U256, ConfigError> {
        self.usdc_units(&self.swap_amount_in, "swap_amount_in")
    }

    /// Raw USDC amount worth one whole NEWO at the configured initial price
    pub fn initial_usdc_per_newo(&self) -> Result<U256, ConfigError> {
        self.usdc_units(&self.initial_price, "initial_price")
    }

    pub fn usdc_units(&self, amount: &str, field: &str) -> Result<U256, ConfigError> {
        parse_units(amount, self.usdc_decimals)
            .map(|units| units.get_absolute())
            .map_err(|e| invalid(field, e))
    }

    pub fn gas_config(&self) -> GasConfig {
        GasConfig::from(self.gas.clone())
    }

    /// RPC endpoint with the API key filled in from the environment
    pub fn chain(&self) -> Result<ChainConfig, ConfigError> {
        let api_key = std::env::var(&self.api_key_env).ok();
        let rpc_endpoint =
            resolve_rpc_url(&self.rpc_url, api_key.as_deref()).map_err(|e| match e {
                ConfigError::MissingField { .. } => ConfigError::MissingField {
                    field: self.api_key_env.clone(),
                },
                other => other,
            })?;

        Ok(ChainConfig {
            name: format!("chain-{}", self.chain_id),
            rpc_endpoint,
            chain_id: self.chain_id,
        })
    }

    pub fn deployer_key(&self) -> Result<Zeroizing<String>, ConfigError> {
        require_env(DEPLOYER_KEY_ENV).map(Zeroizing::new)
    }
}

fn invalid(field: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
