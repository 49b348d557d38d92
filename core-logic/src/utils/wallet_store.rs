//! Flat CSV store for generated wallets.
//!
//! Layout is `Address,Mnemonic,PrivateKey` with one header line. Records are
//! only ever appended; the recovery binary replays the whole file.

use crate::error::WalletError;
use crate::traits::WalletLoader;
use async_trait::async_trait;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const HEADER: [&str; 3] = ["Address", "Mnemonic", "PrivateKey"];

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct WalletRecord {
    pub address: String,
    pub mnemonic: String,
    pub private_key: String,
}

impl WalletRecord {
    pub fn new(
        address: impl Into<String>,
        mnemonic: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            mnemonic: mnemonic.into(),
            private_key: private_key.into(),
        }
    }

    /// Checks the key column holds 32 hex-encoded bytes, with or without `0x`.
    pub fn validate_key(&self) -> Result<(), WalletError> {
        let hex = self
            .private_key
            .strip_prefix("0x")
            .unwrap_or(&self.private_key);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidKeyFormat);
        }
        if hex.len() != 64 {
            return Err(WalletError::InvalidKeyLength { length: hex.len() });
        }
        Ok(())
    }

    /// First characters of the key, safe to print in narration
    pub fn key_prefix(&self) -> &str {
        let end = self
            .private_key
            .char_indices()
            .nth(6)
            .map_or(self.private_key.len(), |(i, _)| i);
        &self.private_key[..end]
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("address", &self.address)
            .field("mnemonic", &"***REDACTED***")
            .field("private_key", &"***REDACTED***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct WalletStore {
    path: PathBuf,
}

impl WalletStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, msg: impl fmt::Display) -> WalletError {
        WalletError::Io {
            path: self.path.display().to_string(),
            msg: msg.to_string(),
        }
    }

    /// Appends one record, writing the header first when the file is new or empty.
    ///
    /// Returns `true` when the file was created by this call.
    pub fn append(&self, record: &WalletRecord) -> Result<bool, WalletError> {
        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(HEADER)
                .map_err(|e| self.io_error(e))?;
        }
        writer
            .write_record([
                record.address.as_str(),
                record.mnemonic.as_str(),
                record.private_key.as_str(),
            ])
            .map_err(|e| self.io_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;

        Ok(needs_header)
    }

    /// Reads every record in file order, skipping the header line.
    pub fn read_all(&self) -> Result<Vec<WalletRecord>, WalletError> {
        if !self.path.exists() {
            return Err(WalletError::StoreNotFound {
                path: self.path.display().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| self.io_error(e))?;
            if row.len() < 3 {
                return Err(WalletError::MalformedRecord {
                    line: row.position().map(|p| p.line()).unwrap_or_default(),
                    columns: row.len(),
                });
            }
            records.push(WalletRecord::new(&row[0], &row[1], &row[2]));
        }

        Ok(records)
    }

    /// The private key column only, in file order.
    pub fn private_keys(&self) -> Result<Vec<String>, WalletError> {
        Ok(self
            .read_all()?
            .iter()
            .map(|r| r.private_key.clone())
            .collect())
    }
}

#[async_trait]
impl WalletLoader for WalletStore {
    type Wallet = WalletRecord;

    async fn load_wallets(&self) -> anyhow::Result<Vec<WalletRecord>> {
        Ok(self.read_all()?)
    }
}
