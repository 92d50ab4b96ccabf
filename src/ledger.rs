// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction bookkeeping on top of a [`Store`].
//!
//! Every mutation reads the current collections, computes the next ones and
//! writes them back in a single `set_many` call, then re-runs the migration
//! fixed point. Mutating methods take `&mut self`, so one `Ledger` is the
//! single writer for its store.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::migration::{self, MAX_REPAIR_PASSES, Repair};
use crate::models::{
    Category, LedgerState, NewTransaction, Transaction, TransactionPatch, UNKNOWN_WALLET_ID,
    Wallet,
};
use crate::store::{self, Store, keys};

/// What a call to [`Ledger::reconcile`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciled {
    pub repairs: Vec<Repair>,
}

impl Reconciled {
    pub fn is_noop(&self) -> bool {
        self.repairs.is_empty()
    }
}

pub struct Ledger<S: Store> {
    store: S,
}

impl<S: Store> Ledger<S> {
    /// Wrap `store` and bring it to the migration fixed point.
    pub fn load(store: S) -> LedgerResult<Self> {
        Ledger::open(store).map(|(ledger, _)| ledger)
    }

    /// Wrap `store` as it is, without repairing anything. For inspection
    /// only; mutations still reconcile afterwards.
    pub fn unreconciled(store: S) -> Self {
        Ledger { store }
    }

    /// Like [`Ledger::load`], also reporting the repairs made on the way in.
    pub fn open(store: S) -> LedgerResult<(Self, Reconciled)> {
        let mut ledger = Ledger { store };
        let repaired = ledger.reconcile()?;
        Ok((ledger, repaired))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn state(&self) -> LedgerResult<LedgerState> {
        Ok(LedgerState {
            wallets: self.wallets()?,
            transactions: self.transactions()?,
        })
    }

    pub fn wallets(&self) -> LedgerResult<Vec<Wallet>> {
        store::load(&self.store, keys::WALLETS, store::seed_wallets)
    }

    /// Most recent first.
    pub fn transactions(&self) -> LedgerResult<Vec<Transaction>> {
        store::load(&self.store, keys::TRANSACTIONS, store::seed_transactions)
    }

    pub fn categories(&self) -> LedgerResult<Vec<Category>> {
        store::load(&self.store, keys::CATEGORIES, store::seed_categories)
    }

    pub fn transaction(&self, id: &str) -> LedgerResult<Option<Transaction>> {
        Ok(self.transactions()?.into_iter().find(|t| t.id == id))
    }

    /// Replace both collections in one store write.
    pub(crate) fn commit(&mut self, state: &LedgerState) -> LedgerResult<()> {
        let entries = [
            store::encode(keys::WALLETS, &state.wallets)?,
            store::encode(keys::TRANSACTIONS, &state.transactions)?,
        ];
        self.store.set_many(&entries)
    }

    /// Run repair passes until nothing changes. Each repair is persisted
    /// before the next pass looks at the data.
    pub fn reconcile(&mut self) -> LedgerResult<Reconciled> {
        let mut state = self.state()?;
        let mut done = Reconciled::default();
        while let Some(repair) = migration::repair_pass(&mut state)? {
            if done.repairs.len() == MAX_REPAIR_PASSES {
                return Err(LedgerError::MigrationDiverged(done.repairs.len() + 1));
            }
            let entry = match repair.document() {
                keys::TRANSACTIONS => store::encode(keys::TRANSACTIONS, &state.transactions)?,
                _ => store::encode(keys::WALLETS, &state.wallets)?,
            };
            self.store.set_many(&[entry])?;
            info!(%repair, "ledger repaired");
            done.repairs.push(repair);
        }
        Ok(done)
    }

    /// Reconcile after a write that is already committed. A failure here
    /// does not undo the write; it is logged and retried on the next load.
    pub(crate) fn settle(&mut self) {
        if let Err(error) = self.reconcile() {
            warn!(%error, "reconcile after write failed");
        }
    }

    /// Record a transaction and move its wallet's balance.
    pub fn add_transaction(&mut self, input: NewTransaction) -> LedgerResult<Transaction> {
        let mut state = self.state()?;
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            amount: input.amount,
            r#type: input.r#type,
            category_id: input.category_id,
            wallet_id: input
                .wallet_id
                .filter(|w| !w.is_empty())
                .unwrap_or_else(|| UNKNOWN_WALLET_ID.to_string()),
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            note: input.note.unwrap_or_default(),
        };
        apply_add(&mut state, tx.clone())?;
        self.commit(&state)?;
        debug!(id = %tx.id, wallet = %tx.wallet_id, amount = %tx.amount, "transaction added");
        self.settle();
        Ok(tx)
    }

    /// Remove a transaction and undo its balance effect. Unknown ids are a
    /// no-op, so deleting twice is harmless.
    pub fn delete_transaction(&mut self, id: &str) -> LedgerResult<Option<Transaction>> {
        let mut state = self.state()?;
        let Some(removed) = apply_delete(&mut state, id)? else {
            debug!(id, "transaction already gone");
            return Ok(None);
        };
        self.commit(&state)?;
        debug!(id, wallet = %removed.wallet_id, "transaction deleted");
        self.settle();
        Ok(Some(removed))
    }

    /// Overwrite fields of a transaction in place.
    ///
    /// Wallet balances are NOT adjusted, even when the amount, type or
    /// wallet changes. Delete and re-add to move money.
    pub fn update_transaction(
        &mut self,
        id: &str,
        patch: &TransactionPatch,
    ) -> LedgerResult<Option<Transaction>> {
        let mut transactions = self.transactions()?;
        let Some(tx) = transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        patch.apply(tx);
        let updated = tx.clone();
        self.store
            .set_many(&[store::encode(keys::TRANSACTIONS, &transactions)?])?;
        debug!(id, "transaction updated");
        self.settle();
        Ok(Some(updated))
    }
}

/// Insert at the head and apply the signed amount to the wallet. On
/// overflow `state` is left unchanged.
pub fn apply_add(state: &mut LedgerState, tx: Transaction) -> LedgerResult<()> {
    state.adjust_balance(&tx.wallet_id, tx.signed_amount())?;
    state.transactions.insert(0, tx);
    Ok(())
}

/// Remove by id and reverse the signed amount on its wallet.
pub fn apply_delete(state: &mut LedgerState, id: &str) -> LedgerResult<Option<Transaction>> {
    let Some(pos) = state.transactions.iter().position(|t| t.id == id) else {
        return Ok(None);
    };
    let tx = &state.transactions[pos];
    let (wallet_id, delta) = (tx.wallet_id.clone(), -tx.signed_amount());
    state.adjust_balance(&wallet_id, delta)?;
    Ok(Some(state.transactions.remove(pos)))
}
