//! Seeder Client - Alloy-based provider wrapper for one signing wallet
//!
//! Every wallet the tools act as (the deployer, each generated wallet, each
//! wallet being swept) gets its own [`SeederClient`]: an HTTP provider with a
//! retry/backoff layer and a local signer filling and signing transactions.
//!
//! # Retry Logic
//!
//! Failed requests are retried with exponential backoff:
//! - Max retries: 5
//! - Initial backoff: 100ms
//! - Max backoff: 2000ms

use crate::error::SeedError;
use alloy::providers::Provider;
use alloy::rpc::client::ClientBuilder;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::Http;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use anyhow::{Context, Result};
use core_logic::{ChainConfig, NetworkError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub struct SeederClient {
    /// Alloy provider with the signer's wallet filler attached
    pub provider: Arc<dyn Provider + Send + Sync>,
    pub signer: PrivateKeySigner,
    pub chain_id: u64,
}

impl SeederClient {
    /// Connects with a hex private key
    pub async fn connect(chain: &ChainConfig, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .context("Failed to parse private key")?;
        Self::connect_with_signer(chain, signer).await
    }

    /// Connects with an existing signer and verifies the endpoint serves `chain.chain_id`.
    pub async fn connect_with_signer(chain: &ChainConfig, signer: PrivateKeySigner) -> Result<Self> {
        let reqwest_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build reqwest client")?;

        let url = chain
            .rpc_endpoint
            .parse::<Url>()
            .context("Invalid RPC URL")?;
        // the path may carry the API key, so only the host is ever reported
        let host = url.host_str().unwrap_or("rpc").to_string();
        let http_transport = Http::with_client(reqwest_client, url);

        let client = ClientBuilder::default()
            .layer(alloy::transports::layers::RetryBackoffLayer::new(
                5, 100, 2000,
            ))
            .transport(http_transport, false);

        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(
            alloy::providers::ProviderBuilder::new()
                .wallet(signer.clone())
                .connect_client(client),
        );

        let client = Self {
            provider,
            signer,
            chain_id: chain.chain_id,
        };
        client.verify_chain(&host).await?;

        Ok(client)
    }

    async fn verify_chain(&self, host: &str) -> Result<()> {
        let remote = self
            .provider
            .get_chain_id()
            .await
            .context("Provider connection failed")?;
        if remote != self.chain_id {
            return Err(NetworkError::ChainMismatch {
                endpoint: host.to_string(),
                expected: self.chain_id,
                actual: remote,
            }
            .into());
        }
        tracing::debug!("Provider ready - chain ID verified: {}", remote);
        Ok(())
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    #[inline]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[inline]
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        &*self.provider
    }

    /// Native balance of this wallet
    pub async fn balance(&self) -> Result<U256> {
        self.balance_of(self.address()).await
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        self.provider
            .get_balance(account)
            .await
            .context(format!("Failed to read balance of {}", account))
    }

    /// Read-only contract call
    pub async fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return> {
        let tx = TransactionRequest::default()
            .to(to)
            .input(call.abi_encode().into());
        let data = self
            .provider
            .call(tx)
            .await
            .context(format!("eth_call {} failed", C::SIGNATURE))?;
        C::abi_decode_returns(&data).context(format!("Failed to decode {}", C::SIGNATURE))
    }

    /// Transaction request for `call` sent from this wallet
    pub fn call_request<C: SolCall>(&self, to: Address, call: &C) -> TransactionRequest {
        TransactionRequest::default()
            .from(self.address())
            .to(to)
            .input(call.abi_encode().into())
    }

    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        self.provider
            .estimate_gas(tx.clone())
            .await
            .context("Gas estimation failed")
    }

    /// Sends `tx` and waits for inclusion; a reverted receipt is an error.
    pub async fn send(&self, tx: TransactionRequest, action: &str) -> Result<TransactionReceipt> {
        let tx = tx.from(self.address());
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context(format!("Failed to send {}", action))?;
        let tx_hash = *pending.tx_hash();
        tracing::debug!("{} submitted: {:?}", action, tx_hash);

        let receipt = pending
            .get_receipt()
            .await
            .context(format!("Failed to fetch receipt for {}", action))?;

        if !receipt.inner.status() {
            return Err(SeedError::TransactionReverted {
                action: action.to_string(),
                tx_hash,
            }
            .into());
        }
        Ok(receipt)
    }

    pub async fn send_call<C: SolCall>(
        &self,
        to: Address,
        call: &C,
        action: &str,
    ) -> Result<TransactionReceipt> {
        self.send(self.call_request(to, call), action).await
    }
}

impl std::fmt::Debug for SeederClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeederClient")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
