// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("fluxbook")
        .version(crate_version!())
        .about("Personal finance tracker: cloud sync, recurring schedules, budgets, smart CSV import")
        .subcommand(Command::new("init").about("Initialize the local data store"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense", "debt"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense", "debt"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Delete everything, locally and in the cloud")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm the wipe"),
                        ),
                ),
        )
        .subcommand(
            Command::new("debt")
                .about("Track and pay down debts")
                .subcommand(json_flags(Command::new("list").about("List debts")))
                .subcommand(
                    Command::new("pay")
                        .about("Record a payment toward a debt")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Scheduled income and expense flows")
                .subcommand(
                    Command::new("add")
                        .about("Create a schedule")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("category").long("category").default_value("General"))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .value_parser(["daily", "weekly", "monthly", "yearly"])
                                .default_value("monthly"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .help("First occurrence, YYYY-MM-DD; defaults to today"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List schedules")))
                .subcommand(
                    Command::new("toggle")
                        .about("Pause or resume a schedule")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a schedule")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(Command::new("run").about("Replay due occurrences now")),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create or update the budget for a category")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Budgets with spending for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
                        .arg(Arg::new("color").long("color").default_value("#6366f1"))
                        .arg(Arg::new("icon").long("icon").default_value("target")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals")))
                .subcommand(
                    Command::new("update")
                        .about("Edit a goal")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(
                    Command::new("contribute")
                        .about("Put money toward a goal")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("transactions")
                        .about("Import a bank statement CSV")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(Arg::new("date-col").long("date-col").help("Header of the date column"))
                        .arg(Arg::new("title-col").long("title-col").help("Header of the title column"))
                        .arg(Arg::new("amount-col").long("amount-col").help("Header of the amount column"))
                        .arg(
                            Arg::new("flip-signs")
                                .long("flip-signs")
                                .action(ArgAction::SetTrue)
                                .help("Negate amounts (credit card statements)"),
                        )
                        .arg(
                            Arg::new("include-duplicates")
                                .long("include-duplicates")
                                .action(ArgAction::SetTrue)
                                .help("Import rows flagged as potential duplicates too"),
                        )
                        .arg(
                            Arg::new("dry-run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue)
                                .help("Preview without importing"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions to CSV")
                        .arg(Arg::new("path").long("path").help("Output file; stdout if omitted")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views of the ledger")
                .subcommand(json_flags(Command::new("summary").about("Headline figures and health")))
                .subcommand(json_flags(Command::new("daily").about("Per-day flows with running balance")))
                .subcommand(json_flags(Command::new("categories").about("Spending by category")))
                .subcommand(json_flags(Command::new("monthly").about("Last six months of flows")))
                .subcommand(json_flags(Command::new("health").about("Financial health score"))),
        )
        .subcommand(
            Command::new("cloud")
                .about("Hosted backend session")
                .subcommand(
                    Command::new("login")
                        .about("Store a session and sync")
                        .arg(Arg::new("url").long("url").required(true))
                        .arg(Arg::new("api-key").long("api-key").required(true))
                        .arg(Arg::new("token").long("token").required(true))
                        .arg(Arg::new("user-id").long("user-id").required(true)),
                )
                .subcommand(Command::new("logout").about("Forget the stored session"))
                .subcommand(Command::new("status").about("Show session state"))
                .subcommand(Command::new("pull").about("Re-fetch all collections")),
        )
        .subcommand(
            Command::new("whatsnew")
                .about("Release notes since your last look")
                .arg(
                    Arg::new("ack")
                        .long("ack")
                        .action(ArgAction::SetTrue)
                        .help("Mark the current release as seen"),
                ),
        )
}
