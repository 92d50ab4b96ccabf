// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyed document storage.
//!
//! Every collection and setting lives under its own key as a JSON value.
//! Missing keys fall back to the seed values below.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, DecimalFormat, Theme, Transaction, Wallet};

pub mod keys {
    pub const WALLETS: &str = "wallets";
    pub const TRANSACTIONS: &str = "transactions";
    pub const CATEGORIES: &str = "categories";
    pub const CURRENCY: &str = "currency";
    pub const MONTHLY_BUDGET: &str = "monthlyBudget";
    pub const DECIMAL_FORMAT: &str = "decimalFormat";
    pub const THEME: &str = "theme";
}

pub trait Store {
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Write all entries or none of them.
    fn set_many(&mut self, entries: &[(&str, String)]) -> LedgerResult<()>;

    fn set(&mut self, key: &str, value: String) -> LedgerResult<()> {
        self.set_many(&[(key, value)])
    }
}

/// Read a document, or `seed()` when the key has never been written.
pub fn load<S, T, F>(store: &S, key: &str, seed: F) -> LedgerResult<T>
where
    S: Store + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| LedgerError::Document {
            key: key.to_string(),
            source,
        }),
        None => Ok(seed()),
    }
}

pub fn encode<'k, T: Serialize + ?Sized>(key: &'k str, value: &T) -> LedgerResult<(&'k str, String)> {
    let raw = serde_json::to_string(value).map_err(|source| LedgerError::Document {
        key: key.to_string(),
        source,
    })?;
    Ok((key, raw))
}

pub fn seed_wallets() -> Vec<Wallet> {
    vec![
        Wallet::unknown(),
        Wallet {
            id: "1".into(),
            name: "Cash".into(),
            r#type: "cash".into(),
            balance: Decimal::ZERO,
            icon: Some("mdi:cash".into()),
            is_persistent: false,
        },
        Wallet {
            id: "2".into(),
            name: "Debit Card".into(),
            r#type: "debit".into(),
            balance: Decimal::ZERO,
            icon: Some("mdi:credit-card-outline".into()),
            is_persistent: false,
        },
    ]
}

pub fn seed_categories() -> Vec<Category> {
    [
        ("1", "Food", "#FF5733", 500),
        ("2", "Transport", "#33FF57", 200),
        ("3", "Entertainment", "#3357FF", 150),
        ("4", "Utilities", "#FF33A1", 300),
        ("5", "Other", "#A133FF", 100),
    ]
    .into_iter()
    .map(|(id, name, color, limit)| Category {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        limit: Decimal::from(limit),
        icon: None,
    })
    .collect()
}

pub fn seed_transactions() -> Vec<Transaction> {
    Vec::new()
}

pub fn seed_currency() -> String {
    "$".to_string()
}

pub fn seed_monthly_budget() -> Decimal {
    Decimal::from(2000)
}

pub fn seed_decimal_format() -> DecimalFormat {
    DecimalFormat::default()
}

pub fn seed_theme() -> Theme {
    Theme::default()
}

/// Documents kept in the `documents` table of a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(SqliteStore {
            conn: db::open_or_init(path)?,
        })
    }

    pub fn open_in_memory() -> LedgerResult<Self> {
        SqliteStore::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> LedgerResult<Self> {
        db::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM documents WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO documents(key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Process-local store, handy for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        Ok(self.docs.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> LedgerResult<()> {
        for (key, value) in entries {
            self.docs.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}
