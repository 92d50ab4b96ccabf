// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::Ledger;
use crate::models::Theme;
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rust_decimal::Decimal;

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ledger, sub)?,
        Some(("currency", sub)) => {
            let symbol = required(sub, "symbol")?.trim();
            if symbol.is_empty() {
                bail!("Currency symbol cannot be empty");
            }
            ledger.set_currency(symbol)?;
            println!("Currency symbol set to '{}'", symbol);
        }
        Some(("budget", sub)) => {
            let budget = parse_decimal(required(sub, "amount")?)?;
            if budget < Decimal::ZERO {
                bail!("Monthly budget cannot be negative");
            }
            ledger.set_monthly_budget(budget)?;
            let s = ledger.settings()?;
            println!(
                "Monthly budget set to {}",
                format_currency(budget, &s.currency, &s.decimal_format)
            );
        }
        Some(("format", sub)) => {
            let mut fmt = ledger.decimal_format()?;
            if let Some(p) = sub.get_one::<u32>("places") {
                // rust_decimal keeps at most 28 fractional digits
                if *p > 28 {
                    bail!("Decimal places must be between 0 and 28");
                }
                fmt.decimal_places = *p;
            }
            if let Some(sep) = sub.get_one::<String>("decimal-sep") {
                fmt.decimal_separator = sep.clone();
            }
            if let Some(sep) = sub.get_one::<String>("thousands-sep") {
                fmt.thousands_separator = sep.clone();
            }
            if let Some(show) = sub.get_one::<bool>("show-decimals") {
                fmt.show_decimals = *show;
            }
            ledger.set_decimal_format(&fmt)?;
            let s = ledger.settings()?;
            println!(
                "Sample: {}",
                format_currency(Decimal::new(123456789, 2), &s.currency, &fmt)
            );
        }
        Some(("theme", sub)) => {
            let theme: Theme = required(sub, "theme")?.parse()?;
            ledger.set_theme(theme)?;
            println!("Theme set to {}", theme);
        }
        _ => {}
    }
    Ok(())
}

fn show<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let s = ledger.settings()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let f = &s.decimal_format;
    let rows = vec![
        vec!["currency".to_string(), s.currency.clone()],
        vec![
            "monthlyBudget".to_string(),
            format_currency(s.monthly_budget, &s.currency, f),
        ],
        vec!["decimalPlaces".to_string(), f.decimal_places.to_string()],
        vec!["decimalSeparator".to_string(), f.decimal_separator.clone()],
        vec!["thousandsSeparator".to_string(), f.thousands_separator.clone()],
        vec!["showDecimals".to_string(), f.show_decimals.to_string()],
        vec!["theme".to_string(), s.theme.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
