//! Throwaway wallet generation.

use alloy::signers::local::coins_bip39::{English, Mnemonic};
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use anyhow::{Context, Result};
use core_logic::WalletRecord;

pub const WORD_COUNT: usize = 12;

/// Random 12-word English mnemonic and the signer at `m/44'/60'/0'/0/0`.
pub fn generate_wallet() -> Result<(PrivateKeySigner, WalletRecord)> {
    let mnemonic = Mnemonic::<English>::new_with_count(&mut rand::thread_rng(), WORD_COUNT)
        .context("Failed to generate mnemonic")?;
    let phrase = zeroize::Zeroizing::new(mnemonic.to_phrase());
    signer_from_phrase(&phrase)
}

/// Derives the first account of `phrase` along with its CSV record
pub fn signer_from_phrase(phrase: &str) -> Result<(PrivateKeySigner, WalletRecord)> {
    let signer = MnemonicBuilder::<English>::default()
        .phrase(phrase)
        .build()
        .context("Failed to derive wallet from mnemonic")?;

    let record = WalletRecord::new(
        signer.address().to_checksum(None),
        phrase,
        signer.to_bytes().to_string(),
    );
    Ok((signer, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const TEST_PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_known_phrase_derivation() {
        let (signer, record) = signer_from_phrase(TEST_PHRASE).unwrap();
        let expected = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

        assert_eq!(signer.address(), expected);
        assert_eq!(record.address, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(
            record.private_key,
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
        );
        assert_eq!(record.key_prefix(), "0xac09");
    }

    #[test]
    fn test_generated_wallet_rederives() {
        let (signer, record) = generate_wallet().unwrap();
        assert_eq!(record.mnemonic.split_whitespace().count(), WORD_COUNT);

        let (again, _) = signer_from_phrase(&record.mnemonic).unwrap();
        assert_eq!(again.address(), signer.address());

        let from_key: PrivateKeySigner = record.private_key.parse().unwrap();
        assert_eq!(from_key.address(), signer.address());
    }

    #[test]
    fn test_wallets_are_distinct() {
        let (a, _) = generate_wallet().unwrap();
        let (b, _) = generate_wallet().unwrap();
        assert_ne!(a.address(), b.address());
    }
}
