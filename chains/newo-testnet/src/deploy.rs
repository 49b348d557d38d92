//! Contract deployment from Hardhat artifacts.

use crate::artifacts::Artifact;
use crate::client::SeederClient;
use crate::contracts::{IERC20, IMerkleRootDistributorV2};
use crate::error::SeedError;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_sol_types::{SolCall, SolValue};
use anyhow::Result;
use core_logic::GasConfig;
use std::path::Path;
use tracing::{debug, info};

pub const NEWO_NAME: &str = "Newo";
pub const NEWO_SYMBOL: &str = "Newo";
/// Whole tokens minted to the deployer
pub const NEWO_INITIAL_SUPPLY: u64 = 800_000_000;

/// VeNewO constructor parameters after the owner and staking token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VeNewoParams {
    pub grace_period: u64,
    pub min_lock_time: u64,
    pub max_lock_time: u64,
    pub penalty_perc: u64,
    pub max_penalty: u64,
    pub min_penalty: u64,
    pub epoch: u64,
}

impl Default for VeNewoParams {
    fn default() -> Self {
        Self {
            grace_period: 604_800,
            min_lock_time: 7_776_000,
            max_lock_time: 94_608_000,
            penalty_perc: 1,
            max_penalty: 10,
            min_penalty: 0,
            epoch: 864_000,
        }
    }
}

impl VeNewoParams {
    pub fn constructor_args(&self, owner: Address, staking_token: Address) -> Vec<u8> {
        (
            owner,
            staking_token,
            U256::from(self.grace_period),
            U256::from(self.min_lock_time),
            U256::from(self.max_lock_time),
            U256::from(self.penalty_perc),
            U256::from(self.max_penalty),
            U256::from(self.min_penalty),
            U256::from(self.epoch),
        )
            .abi_encode_params()
    }
}

pub fn newo_constructor_args() -> Vec<u8> {
    (
        NEWO_NAME.to_string(),
        NEWO_SYMBOL.to_string(),
        U256::from(NEWO_INITIAL_SUPPLY),
    )
        .abi_encode_params()
}

/// `ERC1967Proxy(logic, initialize())`
pub fn proxy_constructor_args(implementation: Address) -> Vec<u8> {
    let init = IMerkleRootDistributorV2::initializeCall {}.abi_encode();
    (implementation, Bytes::from(init)).abi_encode_params()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet {
    pub newo: Address,
    pub usdc: Address,
    pub venewo: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContracts {
    pub tokens: TokenSet,
    pub distributor_implementation: Address,
    pub distributor: Address,
    pub multicall: Address,
}

/// Sends a CREATE transaction with `bytecode ++ constructor_args`.
///
/// The gas limit is estimated; when estimation fails the configured deploy
/// limit is used and the node gets the final word.
pub async fn deploy(
    client: &SeederClient,
    gas: &GasConfig,
    artifact: &Artifact,
    constructor_args: &[u8],
) -> Result<Address> {
    let mut code = artifact.bytecode.to_vec();
    code.extend_from_slice(constructor_args);

    let mut tx = TransactionRequest::default()
        .from(client.address())
        .input(Bytes::from(code).into());
    tx.to = Some(TxKind::Create);

    let gas_limit = match client.estimate_gas(&tx).await {
        Ok(limit) => limit,
        Err(e) => {
            debug!("Estimating {} deployment failed, using fixed limit: {:#}", artifact.name, e);
            gas.limit_deploy()
        }
    };

    let action = format!("deploy {}", artifact.name);
    let receipt = client.send(tx.gas_limit(gas_limit), &action).await?;

    let address = receipt
        .contract_address
        .ok_or_else(|| SeedError::MissingContractAddress {
            contract: artifact.name.clone(),
            tx_hash: receipt.transaction_hash,
        })?;
    debug!("{} deployed at {} (tx {:?})", artifact.name, address, receipt.transaction_hash);
    Ok(address)
}

/// Loads `name` and deploys it
pub async fn deploy_named(
    client: &SeederClient,
    gas: &GasConfig,
    artifacts_dir: &Path,
    name: &str,
    constructor_args: &[u8],
) -> Result<Address> {
    let artifact = Artifact::load(artifacts_dir, name)?;
    deploy(client, gas, &artifact, constructor_args).await
}

/// NEWO, USDC and VeNewO, in that order
pub async fn deploy_tokens(
    client: &SeederClient,
    gas: &GasConfig,
    artifacts_dir: &Path,
) -> Result<TokenSet> {
    let newo = deploy_named(client, gas, artifacts_dir, "NEWO", &newo_constructor_args()).await?;
    info!("NEWO address: {}", newo);

    let usdc = deploy_named(client, gas, artifacts_dir, "USDC", &[]).await?;
    info!("USDC address: {}", usdc);

    let venewo_args = VeNewoParams::default().constructor_args(client.address(), newo);
    let venewo = deploy_named(client, gas, artifacts_dir, "VeNewO", &venewo_args).await?;
    info!("veNEWO address: {}", venewo);

    Ok(TokenSet { newo, usdc, venewo })
}

/// Tokens plus the proxied MerkleRootDistributorV2 and MultiCallWithFailure
pub async fn deploy_all(
    client: &SeederClient,
    gas: &GasConfig,
    artifacts_dir: &Path,
) -> Result<DeployedContracts> {
    let tokens = deploy_tokens(client, gas, artifacts_dir).await?;

    let distributor_artifact = Artifact::load(artifacts_dir, "MerkleRootDistributorV2")?;
    if !distributor_artifact.has_function("initialize") {
        return Err(SeedError::artifact(
            "MerkleRootDistributorV2",
            "ABI has no initialize() for the proxy to call",
        )
        .into());
    }
    let distributor_implementation = deploy(client, gas, &distributor_artifact, &[]).await?;
    debug!("MerkleRootDistributorV2 implementation: {}", distributor_implementation);

    let distributor = deploy_named(
        client,
        gas,
        artifacts_dir,
        "ERC1967Proxy",
        &proxy_constructor_args(distributor_implementation),
    )
    .await?;
    info!("MerkleDistributorV2 address: {}", distributor);

    let multicall = deploy_named(client, gas, artifacts_dir, "MultiCallWithFailure", &[]).await?;
    info!("MultiCallWithFailure address: {}", multicall);

    Ok(DeployedContracts {
        tokens,
        distributor_implementation,
        distributor,
        multicall,
    })
}

/// Token balance of `account`
pub async fn token_balance(client: &SeederClient, token: Address, account: Address) -> Result<U256> {
    client
        .call(token, &IERC20::balanceOfCall { account })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn word(data: &[u8], index: usize) -> U256 {
        U256::from_be_slice(&data[index * 32..(index + 1) * 32])
    }

    #[test]
    fn test_newo_supply_argument() {
        let args = newo_constructor_args();
        // three head words, then length + one data word per string
        assert_eq!(args.len(), 7 * 32);
        assert_eq!(word(&args, 2), U256::from(800_000_000u64));
        assert_eq!(word(&args, 3), U256::from(4u8));
        assert_eq!(&args[4 * 32..4 * 32 + 4], b"Newo");
    }

    #[test]
    fn test_venewo_params() {
        let owner = address!("1111111111111111111111111111111111111111");
        let newo = address!("92FedF27cFD1c72052d7Ca105A7F5522E4D7403D");
        let args = VeNewoParams::default().constructor_args(owner, newo);

        assert_eq!(args.len(), 9 * 32);
        assert_eq!(&args[12..32], owner.as_slice());
        assert_eq!(&args[44..64], newo.as_slice());
        let expected = [604_800u64, 7_776_000, 94_608_000, 1, 10, 0, 864_000];
        for (i, value) in expected.iter().enumerate() {
            assert_eq!(word(&args, i + 2), U256::from(*value), "word {}", i + 2);
        }
    }

    #[test]
    fn test_proxy_args_carry_initializer() {
        let implementation = address!("3e0B3A5e3659CeAEEB8d6Dd190E7CBc0fCD749c4");
        let args = proxy_constructor_args(implementation);

        assert_eq!(&args[12..32], implementation.as_slice());
        assert_eq!(word(&args, 1), U256::from(64u8));
        assert_eq!(word(&args, 2), U256::from(4u8));
        assert_eq!(&args[96..100], &[0x81, 0x29, 0xfc, 0x1c]);
        assert_eq!(args.len(), 4 * 32);
    }
}
