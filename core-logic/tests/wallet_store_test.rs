use core_logic::{WalletError, WalletLoader, WalletRecord, WalletStore};
use std::fs;

fn record(n: u8) -> WalletRecord {
    WalletRecord::new(
        format!("0x{:040X}", n),
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        format!("0x{:064x}", n),
    )
}

#[tokio::test]
async fn test_loader_replays_appended_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = WalletStore::new(dir.path().join("wallets.csv"));

    store.append(&record(1)).unwrap();
    store.append(&record(2)).unwrap();

    let wallets = store.load_wallets().await.unwrap();
    assert_eq!(wallets.len(), 2);
    assert_eq!(wallets[0].address, format!("0x{:040X}", 1));
    assert_eq!(wallets[1].private_key, format!("0x{:064x}", 2));
}

#[test]
fn test_reads_file_written_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallets.csv");
    fs::write(
        &path,
        "Address,Mnemonic,PrivateKey\n0xAAA,word word,0x01\n0xBBB,word word,0x02\n",
    )
    .unwrap();

    let keys = WalletStore::new(&path).private_keys().unwrap();
    assert_eq!(keys, vec!["0x01".to_string(), "0x02".to_string()]);
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallets.csv");
    fs::write(&path, "Address,Mnemonic,PrivateKey\n").unwrap();

    assert!(WalletStore::new(&path).read_all().unwrap().is_empty());
}

#[test]
fn test_append_after_empty_file_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallets.csv");
    fs::write(&path, "").unwrap();

    let store = WalletStore::new(&path);
    assert!(store.append(&record(3)).unwrap());
    assert_eq!(store.read_all().unwrap(), vec![record(3)]);
}

#[tokio::test]
async fn test_loader_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = WalletStore::new(dir.path().join("missing.csv"));

    let err = store.load_wallets().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WalletError>(),
        Some(WalletError::StoreNotFound { .. })
    ));
}
