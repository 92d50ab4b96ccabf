// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::migration::Repair;
use pocketledger::store::{SqliteStore, Store, keys};
use pocketledger::{Ledger, cli, commands::doctor};

const WALLETS: &str = r#"[{"id":"1","name":"Cash","type":"cash","balance":"5"}]"#;
const TRANSACTIONS: &str = r#"[
    {"id":"t1","amount":"5","type":"income","categoryId":"5","walletId":"1","date":"2025-01-02"},
    {"id":"t2","amount":"7","type":"expense","categoryId":"1","walletId":"gone","date":"2025-01-03"}
]"#;

fn setup() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .set_many(&[
            (keys::WALLETS, WALLETS.to_string()),
            (keys::TRANSACTIONS, TRANSACTIONS.to_string()),
        ])
        .unwrap();
    store
}

fn raw(store: &SqliteStore, key: &str) -> Option<String> {
    store.get(key).unwrap()
}

#[test]
fn doctor_reports_problems_and_writes_nothing() {
    let ledger = Ledger::unreconciled(setup());

    let issues: Vec<_> = doctor::findings(&ledger)
        .unwrap()
        .into_iter()
        .map(|f| (f.issue, f.detail))
        .collect();
    assert!(issues.contains(&("missing_unknown_wallet", "unknown".to_string())));
    assert!(issues.contains(&("orphan_transaction", "t2 -> gone".to_string())));
    assert!(!issues.iter().any(|(issue, _)| *issue == "balance_drift"));

    let matches = cli::build_cli().get_matches_from(["pocketledger", "doctor", "--json"]);
    let Some(("doctor", sub)) = matches.subcommand() else {
        panic!("doctor subcommand not parsed");
    };
    doctor::handle(&ledger, sub).unwrap();

    let store = ledger.into_store();
    assert_eq!(raw(&store, keys::WALLETS).as_deref(), Some(WALLETS));
    assert_eq!(raw(&store, keys::TRANSACTIONS).as_deref(), Some(TRANSACTIONS));
    assert_eq!(raw(&store, keys::CATEGORIES), None);
}

#[test]
fn migrate_reports_load_repairs_and_clears_findings() {
    let (mut ledger, on_load) = Ledger::open(setup()).unwrap();
    let repairs = doctor::migrate(&mut ledger, on_load).unwrap();
    assert_eq!(repairs[0], Repair::CreatedUnknownWallet);
    assert_eq!(repairs[1], Repair::AssignedOrphans { count: 1 });
    assert!(matches!(repairs[2], Repair::RebalancedUnknown { .. }));
    assert!(doctor::findings(&ledger).unwrap().is_empty());

    let again = doctor::migrate(&mut ledger, Default::default()).unwrap();
    assert!(again.is_empty());
}
