// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("month").long("month").help("YYYY-MM"))
        .arg(
            Arg::new("from")
                .long("from")
                .requires("to")
                .conflicts_with("month")
                .help("Start date YYYY-MM-DD (inclusive)"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .requires("from")
                .help("End date YYYY-MM-DD (inclusive)"),
        )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .required(required)
            .value_parser(["income", "expense"]),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Category id or name"),
    )
    .arg(
        Arg::new("wallet")
            .long("wallet")
            .help("Wallet id or name (default: Unknown)"),
    )
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
    .arg(Arg::new("note").long("note"))
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Wallet-based personal finance tracker")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Database file (default: $POCKETLEDGER_DB or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database and seed documents"))
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("wallet").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("wallet").required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").default_value("#000000"))
                        .arg(Arg::new("limit").long("limit").default_value("0"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("limit").long("limit"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("category").required(true)))
                .subcommand(
                    Command::new("move")
                        .about("Move a category to a new position (0-based)")
                        .arg(
                            Arg::new("from")
                                .required(true)
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("to")
                                .required(true)
                                .value_parser(value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add"), true))
                .subcommand(json_flags(range_args(
                    Command::new("list")
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("wallet")
                                .long("wallet")
                                .action(ArgAction::Append),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(tx_fields(
                    Command::new("edit")
                        .about("Edit fields in place (wallet balances are not adjusted)")
                        .arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards and analytics")
                .subcommand(json_flags(
                    Command::new("dashboard").arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_flags(range_args(
                    Command::new("by-category").arg(
                        Arg::new("wallet")
                            .long("wallet")
                            .action(ArgAction::Append),
                    ),
                )))
                .subcommand(json_flags(range_args(
                    Command::new("trend").arg(
                        Arg::new("wallet")
                            .long("wallet")
                            .action(ArgAction::Append),
                    ),
                ))),
        )
        .subcommand(
            Command::new("settings")
                .about("Currency, budget and display preferences")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(Command::new("currency").arg(Arg::new("symbol").required(true)))
                .subcommand(Command::new("budget").arg(Arg::new("amount").required(true)))
                .subcommand(
                    Command::new("format")
                        .arg(
                            Arg::new("places")
                                .long("places")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("decimal-sep").long("decimal-sep"))
                        .arg(Arg::new("thousands-sep").long("thousands-sep"))
                        .arg(
                            Arg::new("show-decimals")
                                .long("show-decimals")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("theme")
                        .arg(Arg::new("theme").required(true).value_parser(["light", "dark"])),
                ),
        )
        .subcommand(Command::new("migrate").about("Repair wallets and transactions now"))
        .subcommand(json_flags(
            Command::new("doctor").about("Check ledger invariants without changing anything"),
        ))
}
