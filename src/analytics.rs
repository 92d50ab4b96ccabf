// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregations behind the dashboard, transaction list and
//! analytics views. Everything here is a pure function of the collections.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Transaction, TxType, Wallet};

/// Sums in this module saturate instead of overflowing; they only feed
/// display.
pub fn total_balance(wallets: &[Wallet]) -> Decimal {
    wallets
        .iter()
        .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.balance))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Month { year: i32, month: u32 },
    /// Both ends inclusive.
    Between(NaiveDate, NaiveDate),
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateRange::All => true,
            DateRange::Month { year, month } => date.year() == year && date.month() == month,
            DateRange::Between(start, end) => date >= start && date <= end,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive match on the note or the category name.
    pub search: Option<String>,
    pub r#type: Option<TxType>,
    /// Empty means every wallet.
    pub wallets: Vec<String>,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction, categories: &[Category]) -> bool {
        if let Some(t) = self.r#type {
            if tx.r#type != t {
                return false;
            }
        }
        if !self.wallets.is_empty() && !self.wallets.iter().any(|w| *w == tx.wallet_id) {
            return false;
        }
        if !self.range.contains(tx.date) {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(term) if !term.is_empty() => {
                let category = category_name(categories, &tx.category_id).unwrap_or_default();
                tx.note.to_lowercase().contains(&term)
                    || category.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, txs: &'a [Transaction], categories: &[Category]) -> Vec<&'a Transaction> {
        txs.iter().filter(|t| self.matches(t, categories)).collect()
    }
}

pub fn category_name<'a>(categories: &'a [Category], id: &str) -> Option<&'a str> {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub remaining_budget: Decimal,
    /// Percent of the budget spent, capped at 100.
    pub budget_progress: Decimal,
}

pub fn month_summary(
    txs: &[Transaction],
    monthly_budget: Decimal,
    year: i32,
    month: u32,
) -> MonthSummary {
    let range = DateRange::Month { year, month };
    let (mut income, mut expense) = (Decimal::ZERO, Decimal::ZERO);
    for t in txs.iter().filter(|t| range.contains(t.date)) {
        match t.r#type {
            TxType::Income => income = income.saturating_add(t.amount.value()),
            TxType::Expense => expense = expense.saturating_add(t.amount.value()),
        }
    }
    let hundred = Decimal::ONE_HUNDRED;
    let budget_progress = if monthly_budget > Decimal::ZERO {
        expense
            .checked_div(monthly_budget)
            .and_then(|ratio| ratio.checked_mul(hundred))
            .map_or(hundred, |p| p.min(hundred))
    } else if expense > Decimal::ZERO {
        hundred
    } else {
        Decimal::ZERO
    };
    MonthSummary {
        income,
        expense,
        remaining_budget: monthly_budget.saturating_sub(expense),
        budget_progress,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub limit: Decimal,
    pub amount: Decimal,
}

/// Expense total per category in category order; empty categories are
/// dropped.
pub fn expense_by_category<'a, I>(txs: I, categories: &[Category]) -> Vec<CategorySpend>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in txs.into_iter().filter(|t| t.r#type == TxType::Expense) {
        let sum = sums.entry(t.category_id.as_str()).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.amount.value());
    }
    categories
        .iter()
        .filter_map(|c| {
            let amount = sums.get(c.id.as_str()).copied().unwrap_or_default();
            (amount > Decimal::ZERO).then(|| CategorySpend {
                category_id: c.id.clone(),
                name: c.name.clone(),
                color: c.color.clone(),
                limit: c.limit,
                amount,
            })
        })
        .collect()
}

/// Expense total per day, oldest first.
pub fn spending_by_date<'a, I>(txs: I) -> Vec<(NaiveDate, Decimal)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for t in txs.into_iter().filter(|t| t.r#type == TxType::Expense) {
        let sum = by_day.entry(t.date).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.amount.value());
    }
    by_day.into_iter().collect()
}

/// Group by day, keeping the order in which each day first appears.
pub fn group_by_date<'a, I>(txs: I) -> Vec<(NaiveDate, Vec<&'a Transaction>)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: Vec<(NaiveDate, Vec<&'a Transaction>)> = Vec::new();
    for t in txs {
        match groups.iter_mut().find(|(d, _)| *d == t.date) {
            Some((_, items)) => items.push(t),
            None => groups.push((t.date, vec![t])),
        }
    }
    groups
}
