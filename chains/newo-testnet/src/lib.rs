//! NEWO Testnet - deployment, pool seeding and fund recovery for the NEWO/USDC
//! Uniswap V3 pool on an EVM test network
//!
//! Built on Alloy 1.4.3. The crate is a library plus three binaries:
//!
//! - `newo-deploy`: NEWO, USDC, VeNewO, the proxied MerkleRootDistributorV2
//!   and MultiCallWithFailure from Hardhat artifacts
//! - `newo-seed`: creates or locates the pool, then generates, records, funds
//!   and exercises throwaway wallets one at a time
//! - `newo-recover`: sweeps every recorded wallet back to the deployer
//!
//! # Architecture
//!
//! - **[`SeederClient`]**: provider + signer for one wallet, with transport retries
//! - **[`GasQuote`]**: EIP-1559 fee quote with an explicit unavailable state
//! - **[`math`]**: Uniswap V3 tick and liquidity math on 256/512-bit integers
//! - **[`pool`]**: pool snapshots and creation
//! - **Task System**: per-wallet actions implementing [`tasks::SeedTask`]
//!
//! # Configuration
//!
//! Settings are read from `config/config.toml`, secrets (`PRIVATE_KEY`, the
//! RPC API key) from the environment or `.env`.

pub mod artifacts;
pub mod client;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod error;
pub mod gas;
pub mod math;
pub mod pool;
pub mod tasks;
pub mod wallet_gen;

pub use client::SeederClient;
pub use config::SeederConfig;
pub use error::SeedError;
pub use gas::GasQuote;
pub use pool::PoolData;
