use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub success: bool,
    pub message: String,
    pub tx_hash: Option<String>,
}

impl TaskResult {
    pub fn ok(message: impl Into<String>, tx_hash: Option<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            tx_hash,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            tx_hash: None,
        }
    }
}

#[async_trait]
pub trait Task<Ctx: Sync>: Send + Sync {
    /// Returns the name of the task
    fn name(&self) -> &'static str;

    /// Executes the task
    async fn run(&self, ctx: &Ctx) -> Result<TaskResult>;
}

#[async_trait]
pub trait WalletLoader: Send + Sync {
    type Wallet;

    /// Load wallets from a source (credential file, etc.)
    async fn load_wallets(&self) -> Result<Vec<Self::Wallet>>;
}
