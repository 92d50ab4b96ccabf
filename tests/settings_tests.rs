// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::models::{CategoryPatch, DecimalFormat, Theme};
use pocketledger::store::{SqliteStore, Store, keys};
use pocketledger::utils::format_currency;
use pocketledger::{Ledger, LedgerError, cli, commands};
use rust_decimal::Decimal;

fn setup() -> Ledger<SqliteStore> {
    Ledger::load(SqliteStore::open_in_memory().unwrap()).unwrap()
}

#[test]
fn defaults_match_seed_documents() {
    let ledger = setup();
    let s = ledger.settings().unwrap();
    assert_eq!(s.currency, "$");
    assert_eq!(s.monthly_budget, Decimal::from(2000));
    assert_eq!(s.decimal_format, DecimalFormat::default());
    assert_eq!(s.theme, Theme::Light);
    let names: Vec<_> = ledger
        .categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(
        names,
        ["Food", "Transport", "Entertainment", "Utilities", "Other"]
    );
}

#[test]
fn initialize_writes_only_missing_documents() {
    let mut ledger = setup();
    ledger.set_currency("€").unwrap();
    let written = ledger.initialize_documents().unwrap();
    assert!(!written.contains(&keys::CURRENCY));
    assert!(written.contains(&keys::WALLETS));
    assert_eq!(ledger.currency().unwrap(), "€");
    assert!(ledger.initialize_documents().unwrap().is_empty());
}

#[test]
fn settings_round_trip_through_store() {
    let mut ledger = setup();
    ledger.set_monthly_budget(Decimal::new(150050, 2)).unwrap();
    ledger
        .set_decimal_format(&DecimalFormat {
            decimal_places: 1,
            decimal_separator: ",".into(),
            thousands_separator: ".".into(),
            show_decimals: true,
        })
        .unwrap();
    ledger.set_theme(Theme::Dark).unwrap();

    let s = ledger.settings().unwrap();
    assert_eq!(s.theme, Theme::Dark);
    assert_eq!(
        format_currency(s.monthly_budget, &s.currency, &s.decimal_format),
        "$1.500,5"
    );
}

#[test]
fn legacy_numeric_budget_and_partial_format_load() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set(keys::MONTHLY_BUDGET, "2500".into()).unwrap();
    store
        .set(keys::DECIMAL_FORMAT, r#"{"showDecimals":false}"#.into())
        .unwrap();
    let ledger = Ledger::load(store).unwrap();
    assert_eq!(ledger.monthly_budget().unwrap(), Decimal::from(2500));
    let f = ledger.decimal_format().unwrap();
    assert!(!f.show_decimals);
    assert_eq!(f.thousands_separator, ",");
}

#[test]
fn category_edits_and_reorder() {
    let mut ledger = setup();
    let c = ledger
        .add_category("Health", "#00AA00", Decimal::from(80), Some("mdi:medical-bag"))
        .unwrap();
    let updated = ledger
        .update_category(
            &c.id,
            &CategoryPatch {
                limit: Some(Decimal::from(120)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.limit, Decimal::from(120));
    assert_eq!(updated.color, "#00AA00");

    let order = ledger.reorder_categories(5, 0).unwrap();
    assert_eq!(order[0].name, "Health");
    assert_eq!(order[1].name, "Food");

    let unchanged = ledger.reorder_categories(0, 99).unwrap();
    assert_eq!(unchanged, order);

    assert!(ledger.delete_category("1").unwrap().is_some());
    assert!(ledger.delete_category("1").unwrap().is_none());
    assert!(matches!(
        ledger.update_category("1", &CategoryPatch::default()),
        Err(LedgerError::CategoryNotFound(_))
    ));
}

#[test]
fn theme_command_switches_both_ways() {
    let mut ledger = setup();
    for (arg, expected) in [("dark", Theme::Dark), ("light", Theme::Light)] {
        let matches = cli::build_cli().get_matches_from(["pocketledger", "settings", "theme", arg]);
        let Some(("settings", sub)) = matches.subcommand() else {
            panic!("settings subcommand not parsed");
        };
        commands::settings::handle(&mut ledger, sub).unwrap();
        assert_eq!(ledger.theme().unwrap(), expected);
    }
    assert!(
        cli::build_cli()
            .try_get_matches_from(["pocketledger", "settings", "theme", "blue"])
            .is_err()
    );
}
