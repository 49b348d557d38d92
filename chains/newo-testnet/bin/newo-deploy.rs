use alloy_primitives::utils::{format_ether, format_units};
use anyhow::{Context, Result};
use clap::Parser;
use core_logic::setup_logger;
use dotenv::dotenv;
use newo_testnet::SeederClient;
use newo_testnet::config::{NEWO_DECIMALS, SeederConfig};
use newo_testnet::deploy::{deploy_all, token_balance};
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deploy NEWO, USDC, VeNewO, MerkleRootDistributorV2 and MultiCallWithFailure"
)]
struct Args {
    /// Path to config.toml
    #[arg(short, long, default_value = "config/config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let _log_guard = setup_logger("newo-deploy");

    let config = SeederConfig::from_path(&args.config).context("Failed to load config")?;
    let chain = config.chain()?;
    let deployer = SeederClient::connect(&chain, &config.deployer_key()?).await?;

    info!(
        "Starting deployer ETH Balance: {}",
        format_ether(deployer.balance().await?)
    );

    let deployed = deploy_all(
        &deployer,
        &config.gas_config(),
        Path::new(&config.artifacts_dir),
    )
    .await?;

    let supply = token_balance(&deployer, deployed.tokens.newo, deployer.address()).await?;
    info!(
        "Deployer holds {} NEWO",
        format_units(supply, NEWO_DECIMALS)?
    );

    info!("Paste into config.toml to reuse this deployment:");
    info!("[addresses]");
    info!("newo = \"{}\"", deployed.tokens.newo);
    info!("usdc = \"{}\"", deployed.tokens.usdc);
    info!("venewo = \"{}\"", deployed.tokens.venewo);

    info!(
        "Ending deployer ETH Balance: {}",
        format_ether(deployer.balance().await?)
    );

    Ok(())
}
