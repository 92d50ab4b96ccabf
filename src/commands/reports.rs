// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{range_from_args, resolve_wallet};
use crate::Ledger;
use crate::analytics::{
    DateRange, TransactionFilter, expense_by_category, month_summary, spending_by_date,
    total_balance,
};
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use serde_json::json;

pub fn handle<S: Store>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(ledger, sub)?,
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn dashboard<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => {
            let today = chrono::Utc::now().date_naive();
            (today.year(), today.month())
        }
    };
    let settings = ledger.settings()?;
    let wallets = ledger.wallets()?;
    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;

    let total = total_balance(&wallets);
    let summary = month_summary(&transactions, settings.monthly_budget, year, month);
    let filter = TransactionFilter {
        range: DateRange::Month { year, month },
        ..Default::default()
    };
    let by_cat = expense_by_category(filter.apply(&transactions, &categories), &categories);

    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &json!({
            "month": format!("{:04}-{:02}", year, month),
            "totalBalance": total,
            "summary": summary,
            "expenseByCategory": by_cat,
        }),
    )? {
        return Ok(());
    }

    let money = |d| format_currency(d, &settings.currency, &settings.decimal_format);
    let rows = vec![
        vec!["Total balance".to_string(), money(total)],
        vec!["Income".to_string(), money(summary.income)],
        vec!["Expense".to_string(), money(summary.expense)],
        vec!["Monthly budget".to_string(), money(settings.monthly_budget)],
        vec!["Remaining".to_string(), money(summary.remaining_budget)],
        vec![
            "Budget used".to_string(),
            format!("{}%", summary.budget_progress.round_dp(1)),
        ],
    ];
    let title = format!("{:04}-{:02}", year, month);
    println!("{}", pretty_table(&[title.as_str(), "Amount"], rows));

    if !by_cat.is_empty() {
        let rows: Vec<Vec<String>> = by_cat
            .iter()
            .map(|c| vec![c.name.clone(), money(c.amount), money(c.limit)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Limit"], rows));
    }
    Ok(())
}

fn filter_from_args<S: Store>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<TransactionFilter> {
    let wallets = ledger.wallets()?;
    let mut ids = Vec::new();
    if let Some(keys) = sub.get_many::<String>("wallet") {
        for k in keys {
            ids.push(resolve_wallet(&wallets, k)?.id.clone());
        }
    }
    Ok(TransactionFilter {
        wallets: ids,
        range: range_from_args(sub)?,
        ..Default::default()
    })
}

fn by_category<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let settings = ledger.settings()?;
    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;
    let filter = filter_from_args(ledger, sub)?;
    let data = expense_by_category(filter.apply(&transactions, &categories), &categories);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.color.clone(),
                    format_currency(c.amount, &settings.currency, &settings.decimal_format),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Color", "Spent"], rows));
    }
    Ok(())
}

fn trend<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let settings = ledger.settings()?;
    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;
    let filter = filter_from_args(ledger, sub)?;
    let series = spending_by_date(filter.apply(&transactions, &categories));
    let data: Vec<_> = series
        .iter()
        .map(|(date, amount)| json!({ "date": date.to_string(), "amount": amount }))
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = series
            .iter()
            .map(|(date, amount)| {
                vec![
                    date.to_string(),
                    format_currency(*amount, &settings.currency, &settings.decimal_format),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Spent"], rows));
    }
    Ok(())
}
