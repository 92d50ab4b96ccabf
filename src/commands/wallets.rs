// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required, resolve_wallet};
use crate::Ledger;
use crate::models::WalletPatch;
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let icon = sub.get_one::<String>("icon").map(String::as_str);
            let w = ledger.add_wallet(name, icon)?;
            println!("Added wallet '{}' ({})", w.name, w.id);
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => {
            let wallets = ledger.wallets()?;
            let id = resolve_wallet(&wallets, required(sub, "wallet")?)?.id.clone();
            let patch = WalletPatch {
                name: sub.get_one::<String>("name").cloned(),
                icon: sub.get_one::<String>("icon").cloned(),
            };
            let w = ledger.update_wallet(&id, &patch)?;
            println!("Updated wallet '{}'", w.name);
        }
        Some(("rm", sub)) => {
            let wallets = ledger.wallets()?;
            let id = resolve_wallet(&wallets, required(sub, "wallet")?)?.id.clone();
            if let Some(w) = ledger.delete_wallet(&id)? {
                println!("Removed wallet '{}'", w.name);
            }
        }
        _ => {}
    }
    Ok(())
}

fn list<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let wallets = ledger.wallets()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &wallets)? {
        return Ok(());
    }
    let settings = ledger.settings()?;
    let rows: Vec<Vec<String>> = wallets
        .iter()
        .map(|w| {
            vec![
                w.id.clone(),
                w.name.clone(),
                w.r#type.clone(),
                format_currency(w.balance, &settings.currency, &settings.decimal_format),
                (if w.is_persistent { "yes" } else { "" }).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Name", "Type", "Balance", "Protected"], rows)
    );
    Ok(())
}
