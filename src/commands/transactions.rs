// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{range_from_args, required, resolve_category, resolve_wallet};
use crate::Ledger;
use crate::analytics::{TransactionFilter, category_name};
use crate::models::{NewTransaction, TransactionPatch, TxType};
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            match ledger.delete_transaction(id)? {
                Some(tx) => println!("Removed {} {} ({})", tx.r#type.as_str(), tx.amount, tx.id),
                None => println!("No transaction '{}'", id),
            }
        }
        _ => {}
    }
    Ok(())
}

fn add<S: Store>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(required(sub, "amount")?)?;
    let kind: TxType = required(sub, "type")?.parse()?;
    let categories = ledger.categories()?;
    let category = resolve_category(&categories, required(sub, "category")?)?;
    let wallets = ledger.wallets()?;
    let wallet_id = match sub.get_one::<String>("wallet") {
        Some(w) => Some(resolve_wallet(&wallets, w)?.id.clone()),
        None => None,
    };
    let date = sub
        .get_one::<String>("date")
        .map(|d| parse_date(d))
        .transpose()?;

    let tx = ledger.add_transaction(NewTransaction {
        wallet_id,
        date,
        note: sub.get_one::<String>("note").cloned(),
        ..NewTransaction::new(amount, kind, category.id.clone())
    })?;
    let wallet_name = wallets
        .iter()
        .find(|w| w.id == tx.wallet_id)
        .map(|w| w.name.as_str())
        .unwrap_or(tx.wallet_id.as_str());
    println!(
        "Recorded {} {} on {} in '{}' (wallet: {}, id: {})",
        tx.r#type.as_str(),
        tx.amount,
        tx.date,
        category.name,
        wallet_name,
        tx.id
    );
    Ok(())
}

fn edit<S: Store>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let categories = ledger.categories()?;
    let wallets = ledger.wallets()?;
    let patch = TransactionPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        r#type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxType>())
            .transpose()?,
        category_id: sub
            .get_one::<String>("category")
            .map(|c| resolve_category(&categories, c).map(|c| c.id.clone()))
            .transpose()?,
        wallet_id: sub
            .get_one::<String>("wallet")
            .map(|w| resolve_wallet(&wallets, w).map(|w| w.id.clone()))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|d| parse_date(d))
            .transpose()?,
        note: sub.get_one::<String>("note").cloned(),
    };
    if patch.is_empty() {
        bail!("Nothing to change; pass at least one field");
    }
    match ledger.update_transaction(id, &patch)? {
        Some(tx) => {
            println!("Updated {}", tx.id);
            if patch.amount.is_some() || patch.r#type.is_some() || patch.wallet_id.is_some() {
                println!("Note: wallet balances were not adjusted; run `doctor` to see drift");
            }
        }
        None => println!("No transaction '{}'", id),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub wallet: String,
    pub amount: String,
    pub note: String,
}

/// Rows for `tx list`, most recent first, after filtering.
pub fn query_rows<S: Store>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let categories = ledger.categories()?;
    let wallets = ledger.wallets()?;
    let transactions = ledger.transactions()?;
    let settings = ledger.settings()?;

    let mut wallet_ids = Vec::new();
    if let Some(keys) = sub.get_many::<String>("wallet") {
        for k in keys {
            wallet_ids.push(resolve_wallet(&wallets, k)?.id.clone());
        }
    }
    let filter = TransactionFilter {
        search: sub.get_one::<String>("search").cloned(),
        r#type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxType>())
            .transpose()?,
        wallets: wallet_ids,
        range: range_from_args(sub)?,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let rows = filter
        .apply(&transactions, &categories)
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.r#type.as_str().to_string(),
            category: category_name(&categories, &t.category_id)
                .unwrap_or("Unknown")
                .to_string(),
            wallet: wallets
                .iter()
                .find(|w| w.id == t.wallet_id)
                .map(|w| w.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            amount: format_currency(
                t.signed_amount(),
                &settings.currency,
                &settings.decimal_format,
            ),
            note: t.note.clone(),
        })
        .collect();
    Ok(rows)
}

fn list<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.wallet.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Wallet", "Amount", "Note", "Id"],
                rows,
            )
        );
    }
    Ok(())
}
