// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::Ledger;
use crate::ledger::Reconciled;
use crate::migration::{Finding, Repair, audit};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

/// Audit the documents as stored. Pair with [`Ledger::unreconciled`] so
/// that load-time repairs do not hide what is wrong.
pub fn findings<S: Store>(ledger: &Ledger<S>) -> Result<Vec<Finding>> {
    Ok(audit(&ledger.state()?))
}

pub fn handle<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let findings = findings(ledger)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &findings)? {
        return Ok(());
    }
    if findings.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = findings
            .into_iter()
            .map(|f| vec![f.issue.to_string(), f.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Report what the load-time reconcile fixed, then check the fixed point
/// once more.
pub fn migrate<S: Store>(ledger: &mut Ledger<S>, on_load: Reconciled) -> Result<Vec<Repair>> {
    let again = ledger.reconcile()?;
    let repairs: Vec<_> = on_load.repairs.into_iter().chain(again.repairs).collect();
    if repairs.is_empty() {
        println!("Already consistent; nothing to migrate");
    } else {
        for r in &repairs {
            println!("- {}", r);
        }
    }
    Ok(repairs)
}
