// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::models::{DecimalFormat, Theme};
use crate::store::{self, Store, keys};

/// Display preferences, read as one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub monthly_budget: Decimal,
    pub decimal_format: DecimalFormat,
    pub theme: Theme,
}

impl<S: Store> Ledger<S> {
    /// Persist the seed value of every document that has never been
    /// written. Returns the keys that were filled in.
    pub fn initialize_documents(&mut self) -> LedgerResult<Vec<&'static str>> {
        let seeds = [
            store::encode(keys::WALLETS, &store::seed_wallets())?,
            store::encode(keys::CATEGORIES, &store::seed_categories())?,
            store::encode(keys::TRANSACTIONS, &store::seed_transactions())?,
            store::encode(keys::CURRENCY, &store::seed_currency())?,
            store::encode(keys::MONTHLY_BUDGET, &store::seed_monthly_budget())?,
            store::encode(keys::DECIMAL_FORMAT, &store::seed_decimal_format())?,
            store::encode(keys::THEME, &store::seed_theme())?,
        ];
        let mut missing = Vec::new();
        for (key, value) in seeds {
            if self.store().get(key)?.is_none() {
                missing.push((key, value));
            }
        }
        self.store_mut().set_many(&missing)?;
        self.settle();
        Ok(missing.into_iter().map(|(k, _)| k).collect())
    }

    pub fn settings(&self) -> LedgerResult<Settings> {
        Ok(Settings {
            currency: self.currency()?,
            monthly_budget: self.monthly_budget()?,
            decimal_format: self.decimal_format()?,
            theme: self.theme()?,
        })
    }

    pub fn currency(&self) -> LedgerResult<String> {
        store::load(self.store(), keys::CURRENCY, store::seed_currency)
    }

    pub fn set_currency(&mut self, symbol: &str) -> LedgerResult<()> {
        let entry = store::encode(keys::CURRENCY, symbol)?;
        self.store_mut().set_many(&[entry])
    }

    pub fn monthly_budget(&self) -> LedgerResult<Decimal> {
        store::load(self.store(), keys::MONTHLY_BUDGET, store::seed_monthly_budget)
    }

    pub fn set_monthly_budget(&mut self, budget: Decimal) -> LedgerResult<()> {
        let entry = store::encode(keys::MONTHLY_BUDGET, &budget)?;
        self.store_mut().set_many(&[entry])
    }

    pub fn decimal_format(&self) -> LedgerResult<DecimalFormat> {
        store::load(self.store(), keys::DECIMAL_FORMAT, store::seed_decimal_format)
    }

    pub fn set_decimal_format(&mut self, format: &DecimalFormat) -> LedgerResult<()> {
        let entry = store::encode(keys::DECIMAL_FORMAT, format)?;
        self.store_mut().set_many(&[entry])
    }

    pub fn theme(&self) -> LedgerResult<Theme> {
        store::load(self.store(), keys::THEME, store::seed_theme)
    }

    pub fn set_theme(&mut self, theme: Theme) -> LedgerResult<()> {
        let entry = store::encode(keys::THEME, &theme)?;
        self.store_mut().set_many(&[entry])
    }
}
