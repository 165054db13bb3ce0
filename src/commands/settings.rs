// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{self, SettingsPatch};
use crate::utils::{get_base_currency, maybe_print_json, parse_amount, parse_rate, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let patch = SettingsPatch {
        rent: sub
            .get_one::<String>("rent")
            .map(|s| parse_amount(s))
            .transpose()?,
        motorcycle: sub
            .get_one::<String>("motorcycle")
            .map(|s| parse_amount(s))
            .transpose()?,
        tax: sub
            .get_one::<String>("tax")
            .map(|s| parse_amount(s))
            .transpose()?,
        platform_fee_rate: sub
            .get_one::<String>("fee-rate")
            .map(|s| parse_rate(s))
            .transpose()?,
    };
    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to update; pass at least one of --rent/--motorcycle/--tax/--fee-rate"
        );
    }

    let updated = store::update_settings(conn, &patch)?;
    let ccy = get_base_currency(conn)?;
    if let Some(s) = updated {
        println!(
            "Settings: rent {} {c}, motorcycle {} {c}, tax {} {c}, platform fee {}%",
            s.rent,
            s.motorcycle,
            s.tax,
            s.platform_fee_rate,
            c = ccy
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let Some(s) = store::get_settings(conn)? else {
        println!("Settings not configured yet. Run 'gigclip settings set'.");
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let ccy = get_base_currency(conn)?;
    let rows = vec![
        vec!["Rent (monthly)".into(), format!("{:.2} {}", s.rent, ccy)],
        vec![
            "Motorcycle (monthly)".into(),
            format!("{:.2} {}", s.motorcycle, ccy),
        ],
        vec!["Tax (monthly)".into(), format!("{:.2} {}", s.tax, ccy)],
        vec![
            "Platform fee".into(),
            format!("{:.2} %", s.platform_fee_rate),
        ],
        vec!["Base currency".into(), ccy.clone()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
