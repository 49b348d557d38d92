//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid RPC URL format: '{url}'")]
    InvalidRpcUrl { url: String },

    #[error("Missing required configuration field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    IoError { path: String, msg: String },
}

/// Errors from the generated-wallet record store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet store not found at '{path}'")]
    StoreNotFound { path: String },

    #[error("Malformed wallet record on line {line}: expected 3 columns, got {columns}")]
    MalformedRecord { line: u64, columns: usize },

    #[error("Invalid private key format: expected hex string")]
    InvalidKeyFormat,

    #[error("Invalid private key length: expected 64 hex chars, got {length}")]
    InvalidKeyLength { length: usize },

    #[error("I/O error on wallet store '{path}': {msg}")]
    Io { path: String, msg: String },
}

/// Network and RPC-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Endpoint {endpoint} serves chain {actual}, expected {expected}")]
    ChainMismatch {
        endpoint: String,
        expected: u64,
        actual: u64,
    },
}
