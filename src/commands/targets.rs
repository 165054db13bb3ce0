// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, get_base_currency, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = *sub.get_one::<u32>("month").unwrap();
    let year = *sub.get_one::<i32>("year").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let t = store::upsert_target(conn, month, year, amount)?;
    let ccy = get_base_currency(conn)?;
    println!(
        "Target for {}/{} set to {}",
        t.month,
        t.year,
        fmt_money(&t.target_amount, &ccy)
    );
    Ok(())
}

#[derive(Serialize)]
struct TargetRow {
    month: u32,
    year: i32,
    target_amount: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let targets = store::fetch_targets(conn)?;
    let data: Vec<TargetRow> = targets
        .iter()
        .map(|t| TargetRow {
            month: t.month,
            year: t.year,
            target_amount: format!("{:.2}", t.target_amount),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.month.to_string(),
                    t.year.to_string(),
                    t.target_amount.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Year", "Target"], rows));
    }
    Ok(())
}
