// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("earnings", sub)) => export_earnings(conn, sub),
        Some(("history", sub)) => export_history(conn, sub),
        _ => Ok(()),
    }
}

fn export_earnings(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let earnings = store::fetch_earnings(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "daily_amount", "cash_amount", "total_amount"])?;
            for e in &earnings {
                wtr.write_record([
                    e.date.to_string(),
                    e.daily_amount.to_string(),
                    e.cash_amount.to_string(),
                    e.total_amount().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for e in &earnings {
                items.push(json!({
                    "date": e.date.to_string(),
                    "daily_amount": e.daily_amount,
                    "cash_amount": e.cash_amount,
                    "total_amount": e.total_amount(),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported earnings to {}", out);
    Ok(())
}

fn export_history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let summaries = store::fetch_summaries(conn, None)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "period_type",
                "period_label",
                "start_date",
                "end_date",
                "total_income",
                "rent_deduction",
                "motorcycle_deduction",
                "tax_deduction",
                "platform_fee",
                "net_income",
                "created_at",
            ])?;
            for s in &summaries {
                wtr.write_record([
                    s.period_type.clone(),
                    s.period_label.clone(),
                    s.start_date.to_string(),
                    s.end_date.to_string(),
                    s.total_income.to_string(),
                    s.rent_deduction.to_string(),
                    s.motorcycle_deduction.to_string(),
                    s.tax_deduction.to_string(),
                    s.platform_fee.to_string(),
                    s.net_income.to_string(),
                    s.created_at.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&summaries)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported history to {}", out);
    Ok(())
}
