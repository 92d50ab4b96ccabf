// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Wallet '{0}' is protected and cannot be deleted")]
    ProtectedWallet(String),
    #[error("At least one wallet is required")]
    LastWallet,
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Wallet '{0}' not found")]
    WalletNotFound(String),
    #[error("Category '{0}' not found")]
    CategoryNotFound(String),
    #[error("Balance of wallet '{0}' is out of range")]
    Overflow(String),
    #[error("Migration did not converge after {0} repair passes")]
    MigrationDiverged(usize),
    #[error("Invalid '{key}' document")]
    Document {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
