use alloy_primitives::utils::format_ether;
use anyhow::{Context, Result};
use clap::Parser;
use core_logic::{WalletLoader, WalletStore, setup_logger};
use dotenv::dotenv;
use newo_testnet::SeederClient;
use newo_testnet::config::SeederConfig;
use newo_testnet::tasks::t05_sweep_wallet::SweepWalletTask;
use newo_testnet::tasks::{TaskContext, run_logged};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recover all native funds from the generated wallets back to the deployer"
)]
struct Args {
    /// Path to config.toml
    #[arg(short, long, default_value = "config/config.toml")]
    config: String,

    /// Wallet CSV to replay (overrides wallets_csv)
    #[arg(long)]
    csv: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let _log_guard = setup_logger("newo-recover");

    let config = SeederConfig::from_path(&args.config).context("Failed to load config")?;
    let chain = config.chain()?;
    let csv_path = args.csv.unwrap_or_else(|| config.wallets_csv.clone());

    info!("Recovering all ETH from each created testnet wallet...");
    let wallets = WalletStore::new(&csv_path).load_wallets().await?;
    info!("Parsed {} private keys from CSV...", wallets.len());

    let deployer = SeederClient::connect(&chain, &config.deployer_key()?).await?;
    let config = Arc::new(config);
    let sweep = SweepWalletTask::new(deployer.address());

    info!(
        "Balance of deployer before recovery: {}",
        format_ether(deployer.balance().await?)
    );

    let (mut swept, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    for (i, wallet) in wallets.iter().enumerate() {
        info!("Sending ETH from pkey {} ...", wallet.key_prefix());

        if let Err(e) = wallet.validate_key() {
            error!("Error: {}", e);
            failed += 1;
            continue;
        }

        let client = match SeederClient::connect(&chain, &wallet.private_key).await {
            Ok(client) => client,
            Err(e) => {
                error!("Error: {:#}", e);
                failed += 1;
                continue;
            }
        };

        let ctx = TaskContext::new(client, config.clone());
        match run_logged(&sweep, &ctx, i).await {
            Ok(result) if result.success => swept += 1,
            Ok(_) => skipped += 1,
            Err(_) => failed += 1,
        }
    }

    info!(
        "Recovery done: {} swept, {} skipped, {} failed",
        swept, skipped, failed
    );
    info!(
        "Balance of deployer after recovery: {}",
        format_ether(deployer.balance().await?)
    );

    Ok(())
}
