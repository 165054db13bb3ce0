// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, get_base_currency, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let daily = parse_amount(sub.get_one::<String>("daily").unwrap())?;
    let cash = match sub.get_one::<String>("cash") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let e = store::upsert_earning(conn, date, daily, cash)?;
    let ccy = get_base_currency(conn)?;
    println!(
        "Recorded {} on {} (daily {}, cash {})",
        fmt_money(&e.total_amount(), &ccy),
        e.date,
        e.daily_amount,
        e.cash_amount
    );
    Ok(())
}

#[derive(Serialize)]
pub struct EarningRow {
    pub id: i64,
    pub date: String,
    pub daily_amount: String,
    pub cash_amount: String,
    pub total_amount: String,
}

pub fn query_rows(conn: &Connection, limit: Option<usize>) -> Result<Vec<EarningRow>> {
    let mut earnings = store::fetch_earnings(conn)?;
    if let Some(n) = limit {
        earnings.truncate(n);
    }
    Ok(earnings
        .iter()
        .map(|e| EarningRow {
            id: e.id,
            date: e.date.to_string(),
            daily_amount: format!("{:.2}", e.daily_amount),
            cash_amount: format!("{:.2}", e.cash_amount),
            total_amount: format!("{:.2}", e.total_amount()),
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied();
    let data = query_rows(conn, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.daily_amount.clone(),
                    r.cash_amount.clone(),
                    r.total_amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Daily", "Cash", "Total"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if store::delete_earning(conn, id)? {
        println!("Deleted earning {}", id);
    } else {
        println!("Earning {} not found; nothing to delete", id);
    }
    Ok(())
}
