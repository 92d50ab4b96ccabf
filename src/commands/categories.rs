// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required, resolve_category};
use crate::Ledger;
use crate::models::CategoryPatch;
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let color = required(sub, "color")?;
            let limit = parse_decimal(required(sub, "limit")?)?;
            let icon = sub.get_one::<String>("icon").map(String::as_str);
            let c = ledger.add_category(name, color, limit, icon)?;
            println!("Added category '{}' ({})", c.name, c.id);
        }
        Some(("list", sub)) => {
            let categories = ledger.categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let settings = ledger.settings()?;
                let rows: Vec<Vec<String>> = categories
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        vec![
                            i.to_string(),
                            c.id.clone(),
                            c.name.clone(),
                            c.color.clone(),
                            format_currency(c.limit, &settings.currency, &settings.decimal_format),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["#", "Id", "Category", "Color", "Limit"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let categories = ledger.categories()?;
            let id = resolve_category(&categories, required(sub, "category")?)?
                .id
                .clone();
            let patch = CategoryPatch {
                name: sub.get_one::<String>("name").cloned(),
                color: sub.get_one::<String>("color").cloned(),
                limit: sub
                    .get_one::<String>("limit")
                    .map(|s| parse_decimal(s))
                    .transpose()?,
                icon: sub.get_one::<String>("icon").cloned(),
            };
            let c = ledger.update_category(&id, &patch)?;
            println!("Updated category '{}'", c.name);
        }
        Some(("rm", sub)) => {
            let categories = ledger.categories()?;
            let id = resolve_category(&categories, required(sub, "category")?)?
                .id
                .clone();
            if let Some(c) = ledger.delete_category(&id)? {
                println!("Removed category '{}'", c.name);
            }
        }
        Some(("move", sub)) => {
            let from = *sub.get_one::<usize>("from").unwrap_or(&0);
            let to = *sub.get_one::<usize>("to").unwrap_or(&0);
            let order = ledger.reorder_categories(from, to)?;
            let names: Vec<&str> = order.iter().map(|c| c.name.as_str()).collect();
            println!("Order: {}", names.join(", "));
        }
        _ => {}
    }
    Ok(())
}
