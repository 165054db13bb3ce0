// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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

fn currency_arg() -> Arg {
    Arg::new("currency")
        .long("currency")
        .value_name("CCY")
        .help("Display amounts converted to this currency (needs fx rates)")
}

pub fn build_cli() -> Command {
    Command::new("gigclip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Delivery gig earnings tracker: daily earnings, deductions, summaries, and targets")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("earning")
                .about("Record and manage daily earnings")
                .subcommand(
                    Command::new("add")
                        .about("Record a day's earnings; re-adding the same date replaces its amounts")
                        .arg(
                            Arg::new("daily")
                                .long("daily")
                                .required(true)
                                .value_name("AMOUNT")
                                .help("App-tracked earnings for the day"),
                        )
                        .arg(
                            Arg::new("cash")
                                .long("cash")
                                .value_name("AMOUNT")
                                .help("Cash earnings for the day (default 0)"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List recorded earnings, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("N")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete one earning by id")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_name("ID")
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Deduction settings (monthly figures plus platform fee rate)")
                .subcommand(
                    Command::new("set")
                        .about("Set one or more settings; unnamed fields keep their value")
                        .arg(Arg::new("rent").long("rent").value_name("AMOUNT"))
                        .arg(Arg::new("motorcycle").long("motorcycle").value_name("AMOUNT"))
                        .arg(Arg::new("tax").long("tax").value_name("AMOUNT"))
                        .arg(
                            Arg::new("fee-rate")
                                .long("fee-rate")
                                .value_name("PERCENT")
                                .help("Platform fee as a percentage of gross income (0-100)"),
                        ),
                )
                .subcommand(json_flags(Command::new("show").about("Show current settings"))),
        )
        .subcommand(
            Command::new("target")
                .about("Monthly net income targets")
                .subcommand(
                    Command::new("set")
                        .about("Set (or replace) the target for a month")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .value_name("1-12")
                                .value_parser(value_parser!(u32).range(1..=12)),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_name("YYYY")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .value_name("AMOUNT"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List targets, newest first"),
                )),
        )
        .subcommand(
            Command::new("summary")
                .about("Net income summaries")
                .subcommand(json_flags(
                    Command::new("week")
                        .about("True calendar week (Mon-Sun); monthly settings apportioned /4")
                        .arg(
                            Arg::new("offset")
                                .long("offset")
                                .value_name("WEEKS")
                                .value_parser(value_parser!(u32))
                                .help("How many weeks back from the current week"),
                        )
                        .arg(currency_arg())
                        .arg(
                            Arg::new("save")
                                .long("save")
                                .action(ArgAction::SetTrue)
                                .help("Append this summary to history"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("project")
                        .about("Project all recorded earnings onto a period by its multiplier")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .required(true)
                                .value_parser(["week", "2weeks", "3weeks", "4weeks", "month"]),
                        )
                        .arg(currency_arg())
                        .arg(
                            Arg::new("save")
                                .long("save")
                                .action(ArgAction::SetTrue)
                                .help("Append this projection to history"),
                        ),
                )),
        )
        .subcommand(
            Command::new("history")
                .about("Saved summaries (append-only)")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List saved summaries, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("N")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to CSV or JSON")
                .subcommand(
                    Command::new("earnings")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
                )
                .subcommand(
                    Command::new("history")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
                ),
        )
        .subcommand(
            Command::new("fx")
                .about("Exchange rates for display conversion")
                .subcommand(
                    Command::new("set-base")
                        .about("Set the currency earnings are recorded in")
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .required(true)
                                .value_name("CCY"),
                        ),
                )
                .subcommand(
                    Command::new("fetch")
                        .about("Fetch daily base->quote rates via Frankfurter (ECB)")
                        .arg(
                            Arg::new("symbols")
                                .long("symbols")
                                .required(true)
                                .value_name("CCY,CCY,..")
                                .help("Comma-separated quote currencies, e.g. USD,EUR,MAD"),
                        )
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_name("N")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(Command::new("list").about("List stored rates, newest first"))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between currencies on a date")
                        .arg(Arg::new("date").long("date").required(true).value_name("YYYY-MM-DD"))
                        .arg(Arg::new("amount").long("amount").required(true).value_name("AMOUNT"))
                        .arg(Arg::new("from").long("from").required(true).value_name("CCY"))
                        .arg(Arg::new("to").long("to").required(true).value_name("CCY")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
