// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::Wallet;
use crate::store::{self, Store, keys};

/// Deletion rules, checked in order: persistent wallets are protected, and
/// the last non-persistent wallet must stay.
pub fn check_deletable(wallets: &[Wallet], id: &str) -> LedgerResult<()> {
    if wallets.iter().any(|w| w.id == id && w.is_persistent) {
        return Err(LedgerError::ProtectedWallet(id.to_string()));
    }
    if wallets.iter().filter(|w| !w.is_persistent).count() <= 1 {
        return Err(LedgerError::LastWallet);
    }
    Ok(())
}

impl<S: Store> Ledger<S> {
    /// Remove a wallet. Its transactions are left pointing at the old id;
    /// the reconcile that follows moves them to the Unknown wallet.
    pub fn delete_wallet(&mut self, id: &str) -> LedgerResult<Option<Wallet>> {
        let mut wallets = self.wallets()?;
        if let Err(e) = check_deletable(&wallets, id) {
            warn!(wallet = id, error = %e, "wallet deletion refused");
            return Err(e);
        }
        let removed = wallets
            .iter()
            .position(|w| w.id == id)
            .map(|pos| wallets.remove(pos));
        if removed.is_some() {
            self.store_mut()
                .set_many(&[store::encode(keys::WALLETS, &wallets)?])?;
            debug!(wallet = id, "wallet deleted");
            self.settle();
        }
        Ok(removed)
    }
}
