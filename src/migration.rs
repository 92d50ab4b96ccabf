// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Repairs that bring persisted wallets and transactions back in line with
//! the ledger invariants.
//!
//! [`repair_pass`] performs at most one repair per call, always in this
//! order:
//!
//! 1. make sure the `unknown` wallet exists;
//! 2. route transactions with an empty or dangling `walletId` to it;
//! 3. recompute its balance from the transactions that point at it.
//!
//! Each step relies on the previous ones having converged, e.g. the
//! balance in step 3 is only meaningful once every orphan has been moved.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::{LedgerState, UNKNOWN_WALLET_ID, Wallet};
use crate::store::keys;

/// One repair pass can resolve each kind of problem at most once.
pub const MAX_REPAIR_PASSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "repair", rename_all = "snake_case")]
pub enum Repair {
    CreatedUnknownWallet,
    AssignedOrphans { count: usize },
    RebalancedUnknown { from: Decimal, to: Decimal },
}

impl Repair {
    /// The document a repair rewrites.
    pub fn document(&self) -> &'static str {
        match self {
            Repair::CreatedUnknownWallet | Repair::RebalancedUnknown { .. } => keys::WALLETS,
            Repair::AssignedOrphans { .. } => keys::TRANSACTIONS,
        }
    }
}

impl std::fmt::Display for Repair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Repair::CreatedUnknownWallet => write!(f, "created the Unknown wallet"),
            Repair::AssignedOrphans { count } => {
                write!(f, "moved {} transaction(s) to the Unknown wallet", count)
            }
            Repair::RebalancedUnknown { from, to } => {
                write!(f, "Unknown wallet balance {} -> {}", from, to)
            }
        }
    }
}

/// A transaction needs rerouting when its wallet is blank or gone.
fn is_orphan(state: &LedgerState, wallet_id: &str) -> bool {
    wallet_id.is_empty() || !state.has_wallet(wallet_id)
}

/// Apply the first repair the state needs. `Ok(None)` means the state is a
/// fixed point.
pub fn repair_pass(state: &mut LedgerState) -> LedgerResult<Option<Repair>> {
    if !state.has_wallet(UNKNOWN_WALLET_ID) {
        state.wallets.insert(0, Wallet::unknown());
        return Ok(Some(Repair::CreatedUnknownWallet));
    }

    let view: &LedgerState = state;
    let orphans: Vec<usize> = view
        .transactions
        .iter()
        .enumerate()
        .filter(|(_, t)| is_orphan(view, &t.wallet_id))
        .map(|(i, _)| i)
        .collect();
    if !orphans.is_empty() {
        for &i in &orphans {
            state.transactions[i].wallet_id = UNKNOWN_WALLET_ID.to_string();
        }
        return Ok(Some(Repair::AssignedOrphans {
            count: orphans.len(),
        }));
    }

    let computed = state.signed_sum(UNKNOWN_WALLET_ID)?;
    let Some(unknown) = state.wallets.iter_mut().find(|w| w.id == UNKNOWN_WALLET_ID) else {
        return Ok(None);
    };
    if unknown.balance != computed {
        let from = unknown.balance;
        unknown.balance = computed;
        return Ok(Some(Repair::RebalancedUnknown { from, to: computed }));
    }
    Ok(None)
}

pub fn is_converged(state: &LedgerState) -> bool {
    matches!(repair_pass(&mut state.clone()), Ok(None))
}

/// Something `doctor` reports without touching the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub issue: &'static str,
    pub detail: String,
}

/// Check every invariant, including the incrementally maintained balances
/// that migration never rewrites.
pub fn audit(state: &LedgerState) -> Vec<Finding> {
    let mut out = Vec::new();

    let unknown_count = state
        .wallets
        .iter()
        .filter(|w| w.id == UNKNOWN_WALLET_ID)
        .count();
    match unknown_count {
        0 => out.push(Finding {
            issue: "missing_unknown_wallet",
            detail: UNKNOWN_WALLET_ID.to_string(),
        }),
        1 => {}
        n => out.push(Finding {
            issue: "duplicate_unknown_wallet",
            detail: format!("{} copies", n),
        }),
    }
    if let Some(w) = state.wallet(UNKNOWN_WALLET_ID).filter(|w| !w.is_persistent) {
        out.push(Finding {
            issue: "unknown_wallet_not_persistent",
            detail: w.name.clone(),
        });
    }

    for t in &state.transactions {
        if is_orphan(state, &t.wallet_id) {
            let wallet = if t.wallet_id.is_empty() {
                "(none)"
            } else {
                t.wallet_id.as_str()
            };
            out.push(Finding {
                issue: "orphan_transaction",
                detail: format!("{} -> {}", t.id, wallet),
            });
        }
    }

    for w in &state.wallets {
        match state.signed_sum(&w.id) {
            Ok(expected) if expected != w.balance => out.push(Finding {
                issue: "balance_drift",
                detail: format!("{}: stored {} expected {}", w.name, w.balance, expected),
            }),
            Ok(_) => {}
            Err(e) => out.push(Finding {
                issue: "balance_overflow",
                detail: e.to_string(),
            }),
        }
    }
    out
}
