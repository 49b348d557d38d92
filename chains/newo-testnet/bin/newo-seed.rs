use alloy_primitives::utils::format_ether;
use anyhow::{Context, Result};
use clap::Parser;
use core_logic::{WalletStore, setup_logger};
use dotenv::dotenv;
use newo_testnet::SeederClient;
use newo_testnet::config::SeederConfig;
use newo_testnet::deploy::deploy_tokens;
use newo_testnet::pool::{create_pool, get_pool_data, initial_sqrt_price, sort_tokens};
use newo_testnet::tasks::t01_fund_wallet::FundWalletTask;
use newo_testnet::tasks::t02_provide_liquidity::ProvideLiquidityTask;
use newo_testnet::tasks::t03_swap::{SwapDirection, SwapTask};
use newo_testnet::tasks::t04_lock_venewo::LockVeNewoTask;
use newo_testnet::tasks::{Market, TaskContext, run_logged};
use newo_testnet::wallet_gen::generate_wallet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const RULE: &str = "------------------------------------------------------------------";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Seed the NEWO/USDC Uniswap V3 pool with generated liquidity providers and swaps"
)]
struct Args {
    /// Path to config.toml
    #[arg(short, long, default_value = "config/config.toml")]
    config: String,

    /// Number of wallets to generate (overrides amount_wallets)
    #[arg(short, long)]
    wallets: Option<usize>,

    /// Reuse the token addresses from [addresses] instead of deploying new ones
    #[arg(long, default_value = "false")]
    skip_deploy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let _log_guard = setup_logger("newo-seed");

    let mut config = SeederConfig::from_path(&args.config).context("Failed to load config")?;
    if let Some(wallets) = args.wallets {
        config.amount_wallets = wallets;
        config.validate()?;
    }
    let chain = config.chain()?;
    let deployer = SeederClient::connect(&chain, &config.deployer_key()?).await?;
    let config = Arc::new(config);
    let gas = config.gas_config();

    info!("{}", RULE);
    info!("Seeding UniV3 pool on chain {}", chain.chain_id);
    info!("{}", RULE);
    info!(
        "Starting deployer ETH Balance: {}",
        format_ether(deployer.balance().await?)
    );

    let tokens = if args.skip_deploy {
        config.addresses.token_set()?
    } else {
        deploy_tokens(&deployer, &gas, Path::new(&config.artifacts_dir)).await?
    };

    let pool = match config.addresses.pool {
        Some(pool) if args.skip_deploy => pool,
        _ => {
            let (token0, _) = sort_tokens(tokens.newo, tokens.usdc);
            let sqrt_price =
                initial_sqrt_price(token0, tokens.newo, config.initial_usdc_per_newo()?)?;
            let pool = create_pool(
                &deployer,
                config.addresses.position_manager,
                config.addresses.factory,
                tokens.newo,
                tokens.usdc,
                config.pool_fee,
                sqrt_price,
            )
            .await?;
            info!("NEWO/USDC Pool created at: {}", pool);
            pool
        }
    };

    let mut market = Market {
        tokens,
        pool,
        data: get_pool_data(&deployer, pool).await?,
    };
    info!(
        "Pool tick {} (spacing {}, fee {}), liquidity {}, {:.6} USDC per NEWO",
        market.data.tick,
        market.data.tick_spacing,
        market.data.fee,
        market.data.liquidity,
        market.usdc_per_newo(config.usdc_decimals)
    );

    let store = WalletStore::new(&config.wallets_csv);
    let delay = Duration::from_millis(config.call_delay_ms);

    for i in 0..config.amount_wallets {
        let (signer, record) = generate_wallet()?;
        info!("New Wallet {} created: {}", i + 1, record.address);

        info!("Handling new wallet CSV...");
        if store.append(&record)? {
            info!("CSV created with each new wallet info...");
        } else {
            info!("New wallet added to CSV...");
        }

        info!("Seeding new wallet...");
        let deployer_ctx = TaskContext::new(deployer.clone(), config.clone()).with_market(market);
        run_logged(&FundWalletTask::new(signer.address()), &deployer_ctx, i).await?;
        tokio::time::sleep(delay).await;

        let client = SeederClient::connect_with_signer(&chain, signer).await?;
        let mut ctx = TaskContext::new(client, config.clone()).with_market(market);

        run_logged(&ProvideLiquidityTask::new(), &ctx, i).await?;
        tokio::time::sleep(delay).await;

        run_logged(&SwapTask::new(SwapDirection::UsdcToNewo), &ctx, i).await?;
        tokio::time::sleep(delay).await;

        market.data = get_pool_data(&ctx.client, pool).await?;
        ctx.refresh_pool(market.data);
        info!(
            "Pool refreshed: tick {}, {:.6} USDC per NEWO",
            market.data.tick,
            market.usdc_per_newo(config.usdc_decimals)
        );

        run_logged(&SwapTask::new(SwapDirection::NewoToUsdc), &ctx, i).await?;

        if i < config.amount_venewo_wallets {
            tokio::time::sleep(delay).await;
            run_logged(&LockVeNewoTask::new(), &ctx, i).await?;
        }
        info!("{}", RULE);
    }

    info!(
        "Ending deployer ETH Balance: {}",
        format_ether(deployer.balance().await?)
    );
    info!("{}", RULE);
    info!("Seed script finished :D");

    Ok(())
}
