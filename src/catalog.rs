// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wallet and category edits that never touch balances.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Category, CategoryPatch, Wallet, WalletPatch};
use crate::store::{self, Store, keys};

fn required_name(name: &str, what: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidName(format!("{} name is empty", what)));
    }
    Ok(trimmed.to_string())
}

impl<S: Store> Ledger<S> {
    pub fn add_wallet(&mut self, name: &str, icon: Option<&str>) -> LedgerResult<Wallet> {
        let name = required_name(name, "wallet")?;
        let mut wallets = self.wallets()?;
        let wallet = Wallet {
            id: Uuid::new_v4().to_string(),
            name,
            r#type: "custom".to_string(),
            balance: Decimal::ZERO,
            icon: Some(icon.unwrap_or("mdi:wallet-outline").to_string()),
            is_persistent: false,
        };
        wallets.push(wallet.clone());
        self.store_mut()
            .set_many(&[store::encode(keys::WALLETS, &wallets)?])?;
        debug!(id = %wallet.id, name = %wallet.name, "wallet added");
        self.settle();
        Ok(wallet)
    }

    /// Rename or re-icon a wallet. Balance and persistence are not editable.
    pub fn update_wallet(&mut self, id: &str, patch: &WalletPatch) -> LedgerResult<Wallet> {
        let mut wallets = self.wallets()?;
        let wallet = wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::WalletNotFound(id.to_string()))?;
        if let Some(name) = &patch.name {
            wallet.name = required_name(name, "wallet")?;
        }
        if let Some(icon) = &patch.icon {
            wallet.icon = Some(icon.clone());
        }
        let updated = wallet.clone();
        self.store_mut()
            .set_many(&[store::encode(keys::WALLETS, &wallets)?])?;
        Ok(updated)
    }

    pub fn add_category(
        &mut self,
        name: &str,
        color: &str,
        limit: Decimal,
        icon: Option<&str>,
    ) -> LedgerResult<Category> {
        let name = required_name(name, "category")?;
        let mut categories = self.categories()?;
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name,
            color: color.to_string(),
            limit,
            icon: icon.map(str::to_string),
        };
        categories.push(category.clone());
        self.save_categories(&categories)?;
        Ok(category)
    }

    pub fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> LedgerResult<Category> {
        let mut categories = self.categories()?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| LedgerError::CategoryNotFound(id.to_string()))?;
        if let Some(name) = &patch.name {
            category.name = required_name(name, "category")?;
        }
        if let Some(color) = &patch.color {
            category.color = color.clone();
        }
        if let Some(limit) = patch.limit {
            category.limit = limit;
        }
        if let Some(icon) = &patch.icon {
            category.icon = Some(icon.clone());
        }
        let updated = category.clone();
        self.save_categories(&categories)?;
        Ok(updated)
    }

    /// Transactions keep their `categoryId`; reports show them as
    /// uncategorized.
    pub fn delete_category(&mut self, id: &str) -> LedgerResult<Option<Category>> {
        let mut categories = self.categories()?;
        let Some(pos) = categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let removed = categories.remove(pos);
        self.save_categories(&categories)?;
        Ok(Some(removed))
    }

    /// Move the category at `from` to index `to`. Out-of-range indices leave
    /// the order untouched.
    pub fn reorder_categories(&mut self, from: usize, to: usize) -> LedgerResult<Vec<Category>> {
        let mut categories = self.categories()?;
        if from != to && from < categories.len() && to < categories.len() {
            let moved = categories.remove(from);
            categories.insert(to, moved);
            self.save_categories(&categories)?;
        }
        Ok(categories)
    }

    fn save_categories(&mut self, categories: &[Category]) -> LedgerResult<()> {
        self.store_mut()
            .set_many(&[store::encode(keys::CATEGORIES, categories)?])
    }
}
