// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod doctor;
pub mod reports;
pub mod settings;
pub mod transactions;
pub mod wallets;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::analytics::DateRange;
use crate::models::{Category, Wallet};
use crate::utils::{parse_date, parse_month};

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing argument '{}'", name))
}

/// Match a wallet by id, then by case-insensitive name.
pub fn resolve_wallet<'a>(wallets: &'a [Wallet], key: &str) -> Result<&'a Wallet> {
    let key = key.trim();
    wallets
        .iter()
        .find(|w| w.id == key)
        .or_else(|| wallets.iter().find(|w| w.name.eq_ignore_ascii_case(key)))
        .with_context(|| format!("Wallet '{}' not found", key))
}

/// Match a category by id, then by case-insensitive name.
pub fn resolve_category<'a>(categories: &'a [Category], key: &str) -> Result<&'a Category> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
        .with_context(|| format!("Category '{}' not found", key))
}

/// `--month` / `--from --to` into a range; neither means everything.
pub(crate) fn range_from_args(sub: &clap::ArgMatches) -> Result<DateRange> {
    if let Some(m) = sub.get_one::<String>("month") {
        let (year, month) = parse_month(m)?;
        return Ok(DateRange::Month { year, month });
    }
    match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        (Some(from), Some(to)) => {
            let (start, end): (NaiveDate, NaiveDate) = (parse_date(from)?, parse_date(to)?);
            if start > end {
                bail!("--from {} is after --to {}", start, end);
            }
            Ok(DateRange::Between(start, end))
        }
        _ => Ok(DateRange::All),
    }
}
