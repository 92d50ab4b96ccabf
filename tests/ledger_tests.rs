// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::{Ledger, LedgerError};
use pocketledger::models::{Amount, NewTransaction, TransactionPatch, TxType};
use pocketledger::store::{MemoryStore, SqliteStore, Store, keys};
use rust_decimal::Decimal;

fn setup() -> Ledger<SqliteStore> {
    Ledger::load(SqliteStore::open_in_memory().unwrap()).unwrap()
}

fn amt(v: i64) -> Amount {
    Amount::new(Decimal::from(v)).unwrap()
}

fn on_wallet(v: i64, kind: TxType, wallet: &str) -> NewTransaction {
    NewTransaction {
        wallet_id: Some(wallet.to_string()),
        ..NewTransaction::new(amt(v), kind, "1")
    }
}

fn balance<S: pocketledger::store::Store>(ledger: &Ledger<S>, id: &str) -> Decimal {
    ledger
        .wallets()
        .unwrap()
        .into_iter()
        .find(|w| w.id == id)
        .unwrap()
        .balance
}

#[test]
fn cash_wallet_scenario() {
    let mut ledger = setup();
    let first = ledger
        .add_transaction(on_wallet(50, TxType::Expense, "1"))
        .unwrap();
    assert_eq!(balance(&ledger, "1"), Decimal::from(-50));

    ledger
        .add_transaction(on_wallet(100, TxType::Income, "1"))
        .unwrap();
    assert_eq!(balance(&ledger, "1"), Decimal::from(50));

    ledger.delete_transaction(&first.id).unwrap();
    assert_eq!(balance(&ledger, "1"), Decimal::from(100));
    assert_eq!(balance(&ledger, "2"), Decimal::ZERO);
}

#[test]
fn newest_transaction_comes_first_with_defaults() {
    let mut ledger = setup();
    let a = ledger
        .add_transaction(NewTransaction::new(amt(5), TxType::Expense, "2"))
        .unwrap();
    let b = ledger
        .add_transaction(on_wallet(7, TxType::Expense, "2"))
        .unwrap();

    assert_eq!(a.wallet_id, "unknown");
    assert_eq!(a.note, "");
    assert_eq!(a.date, chrono::Utc::now().date_naive());
    assert_ne!(a.id, b.id);

    let ids: Vec<_> = ledger
        .transactions()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, [b.id, a.id]);
    assert_eq!(balance(&ledger, "unknown"), Decimal::from(-5));
}

#[test]
fn balances_track_signed_sums() {
    let mut ledger = setup();
    let mut ids = Vec::new();
    for (v, kind, wallet) in [
        (10, TxType::Income, "1"),
        (3, TxType::Expense, "2"),
        (8, TxType::Expense, "1"),
        (40, TxType::Income, "2"),
        (1, TxType::Expense, "unknown"),
    ] {
        ids.push(ledger.add_transaction(on_wallet(v, kind, wallet)).unwrap().id);
    }
    ledger.delete_transaction(&ids[1]).unwrap();

    let state = ledger.state().unwrap();
    for w in &state.wallets {
        assert_eq!(w.balance, state.signed_sum(&w.id).unwrap(), "wallet {}", w.id);
    }
    assert_eq!(balance(&ledger, "1"), Decimal::from(2));
    assert_eq!(balance(&ledger, "2"), Decimal::from(40));
}

#[test]
fn add_then_delete_restores_everything() {
    let mut ledger = setup();
    ledger
        .add_transaction(on_wallet(12, TxType::Income, "2"))
        .unwrap();
    let before = ledger.state().unwrap();

    let tx = ledger
        .add_transaction(NewTransaction {
            amount: Amount::parse("19.99").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 12, 31),
            note: Some("gift".into()),
            ..on_wallet(0, TxType::Expense, "2")
        })
        .unwrap();
    assert_eq!(balance(&ledger, "2"), Decimal::new(-799, 2));

    let removed = ledger.delete_transaction(&tx.id).unwrap();
    assert_eq!(removed, Some(tx));
    assert_eq!(ledger.state().unwrap(), before);
}

#[test]
fn deleting_twice_is_a_noop() {
    let mut ledger = setup();
    let tx = ledger
        .add_transaction(on_wallet(30, TxType::Expense, "1"))
        .unwrap();
    assert!(ledger.delete_transaction(&tx.id).unwrap().is_some());
    assert!(ledger.delete_transaction(&tx.id).unwrap().is_none());
    assert_eq!(balance(&ledger, "1"), Decimal::ZERO);
    assert!(ledger.delete_transaction("never-existed").unwrap().is_none());
}

#[test]
fn transaction_on_missing_wallet_is_rerouted() {
    let mut ledger = setup();
    let tx = ledger
        .add_transaction(on_wallet(9, TxType::Income, "ghost"))
        .unwrap();
    let stored = ledger.transaction(&tx.id).unwrap().unwrap();
    assert_eq!(stored.wallet_id, "unknown");
    assert_eq!(balance(&ledger, "unknown"), Decimal::from(9));
}

// Editing a transaction does not move money between wallets. This pins the
// current behaviour; balances are only exact for add/delete.
#[test]
fn update_does_not_adjust_balances() {
    let mut ledger = setup();
    let tx = ledger
        .add_transaction(on_wallet(50, TxType::Expense, "1"))
        .unwrap();

    let patch = TransactionPatch {
        amount: Some(amt(80)),
        r#type: Some(TxType::Income),
        wallet_id: Some("2".into()),
        note: Some("fixed".into()),
        ..Default::default()
    };
    let updated = ledger.update_transaction(&tx.id, &patch).unwrap().unwrap();
    assert_eq!(updated.amount, amt(80));
    assert_eq!(updated.wallet_id, "2");
    assert_eq!(updated.note, "fixed");

    assert_eq!(balance(&ledger, "1"), Decimal::from(-50));
    assert_eq!(balance(&ledger, "2"), Decimal::ZERO);

    let drift = pocketledger::migration::audit(&ledger.state().unwrap());
    assert_eq!(
        drift.iter().filter(|f| f.issue == "balance_drift").count(),
        2
    );
}

#[test]
fn update_of_unknown_id_changes_nothing() {
    let mut ledger = setup();
    let before = ledger.state().unwrap();
    let patch = TransactionPatch {
        note: Some("x".into()),
        ..Default::default()
    };
    assert!(ledger.update_transaction("nope", &patch).unwrap().is_none());
    assert_eq!(ledger.state().unwrap(), before);
}

#[test]
fn memory_store_behaves_like_sqlite() {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    let tx = ledger
        .add_transaction(on_wallet(25, TxType::Income, "2"))
        .unwrap();
    assert_eq!(balance(&ledger, "2"), Decimal::from(25));
    ledger.delete_transaction(&tx.id).unwrap();
    assert_eq!(balance(&ledger, "2"), Decimal::ZERO);
}

#[test]
fn state_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    let mut ledger = Ledger::load(SqliteStore::open(&path).unwrap()).unwrap();
    ledger
        .add_transaction(on_wallet(42, TxType::Expense, "2"))
        .unwrap();
    drop(ledger);

    let reopened = Ledger::load(SqliteStore::open(&path).unwrap()).unwrap();
    assert_eq!(balance(&reopened, "2"), Decimal::from(-42));
    assert_eq!(reopened.transactions().unwrap().len(), 1);
}

#[test]
fn oversized_amounts_are_rejected_before_any_write() {
    assert!(matches!(
        Amount::parse("79228162514264337593543950335"),
        Err(LedgerError::InvalidAmount(_))
    ));

    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .set(
            keys::WALLETS,
            r#"[
                {"id":"unknown","name":"Unknown","type":"unknown","balance":"0","isPersistent":true},
                {"id":"1","name":"Cash","type":"cash","balance":"79228162514264337593543950335"},
                {"id":"2","name":"Debit Card","type":"debit","balance":"0"}
            ]"#
            .to_string(),
        )
        .unwrap();
    let mut ledger = Ledger::load(store).unwrap();
    let before = ledger.state().unwrap();

    let err = ledger
        .add_transaction(on_wallet(1, TxType::Income, "1"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overflow(ref w) if w == "1"));
    assert_eq!(ledger.state().unwrap(), before);

    // Debits still work on the same wallet.
    ledger
        .add_transaction(on_wallet(1, TxType::Expense, "1"))
        .unwrap();
}

/// Accepts a fixed number of writes, then refuses the rest.
struct FlakyStore {
    inner: MemoryStore,
    writes_left: usize,
}

impl Store for FlakyStore {
    fn get(&self, key: &str) -> pocketledger::LedgerResult<Option<String>> {
        self.inner.get(key)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> pocketledger::LedgerResult<()> {
        if self.writes_left == 0 {
            return Err(rusqlite::Error::InvalidQuery.into());
        }
        self.writes_left -= 1;
        self.inner.set_many(entries)
    }
}

#[test]
fn committed_add_survives_a_failed_reconcile() {
    let store = FlakyStore {
        inner: MemoryStore::new(),
        writes_left: 1,
    };
    let mut ledger = Ledger::load(store).unwrap();
    let tx = ledger
        .add_transaction(on_wallet(9, TxType::Expense, "ghost"))
        .unwrap();
    assert_eq!(ledger.transaction(&tx.id).unwrap().unwrap().wallet_id, "ghost");

    let mut store = ledger.into_store();
    store.writes_left = usize::MAX;
    let ledger = Ledger::load(store).unwrap();
    assert_eq!(
        ledger.transaction(&tx.id).unwrap().unwrap().wallet_id,
        "unknown"
    );
    assert_eq!(balance(&ledger, "unknown"), Decimal::from(-9));
}
