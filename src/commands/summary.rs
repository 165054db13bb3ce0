// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, WeekSummary};
use crate::models::Settings;
use crate::store;
use crate::utils::{fx_convert, get_base_currency, maybe_print_json, parse_period, pretty_table};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("week", sub)) => week(conn, sub)?,
        Some(("project", sub)) => project(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Snapshot earnings and settings, then run the calendar-window engine for
/// the week `offset` weeks before the one containing `reference`.
pub fn compute_week(
    conn: &Connection,
    reference: NaiveDate,
    offset: u32,
) -> Result<(WeekSummary, Option<Settings>)> {
    let earnings = store::fetch_earnings(conn)?;
    let settings = store::get_settings(conn)?;
    let (week_start, _) = engine::week_window(reference, offset);
    let summary = engine::week_summary(&earnings, settings.as_ref(), week_start);
    Ok((summary, settings))
}

fn week(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let save = sub.get_flag("save");
    let offset = sub.get_one::<u32>("offset").copied().unwrap_or(0);
    let out_ccy = sub.get_one::<String>("currency").map(|s| s.to_uppercase());
    let today = Utc::now().date_naive();

    let (summary, settings) = compute_week(conn, today, offset)?;
    let target = store::target_for(conn, today.month(), today.year())?;
    let progress = match (&summary.deductions, &target) {
        (Some(d), Some(t)) => engine::target_progress(d.net_income, t.target_amount),
        _ => None,
    };

    // The save captures the summary computed from the snapshot above, not a
    // re-read of the stores.
    if save {
        match summary.to_history() {
            Some(new) => {
                let saved = store::append_summary(conn, &new)?;
                println!("Saved '{}' to history", saved.period_label);
            }
            None => println!("Not saved: settings are not configured yet."),
        }
    }

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let base = get_base_currency(conn)?;
    let disp = |v: &Decimal| -> Result<String> {
        match &out_ccy {
            Some(c) => Ok(format!("{:.2} {}", fx_convert(conn, today, *v, &base, c)?, c)),
            None => Ok(format!("{:.2} {}", v, base)),
        }
    };

    println!(
        "{}{}",
        engine::week_label(summary.week_start, summary.week_end),
        if offset == 0 { " (current week)" } else { "" }
    );

    let mut day_rows = Vec::new();
    for d in &summary.daily {
        day_rows.push(vec![
            d.label.clone(),
            disp(&d.daily_amount)?,
            disp(&d.cash_amount)?,
            disp(&d.total_amount)?,
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Day", "Daily", "Cash", "Total"], day_rows)
    );

    let mut rows = vec![vec!["Total Income".to_string(), disp(&summary.total_income)?]];
    if let (Some(d), Some(s)) = (&summary.deductions, &settings) {
        rows.push(vec!["Rent (weekly)".into(), format!("-{}", disp(&d.rent)?)]);
        rows.push(vec![
            "Motorcycle (weekly)".into(),
            format!("-{}", disp(&d.motorcycle)?),
        ]);
        rows.push(vec!["Tax (weekly)".into(), format!("-{}", disp(&d.tax)?)]);
        rows.push(vec![
            format!("Platform fee ({}%)", s.platform_fee_rate),
            format!("-{}", disp(&d.platform_fee)?),
        ]);
        rows.push(vec!["Net Income".into(), disp(&d.net_income)?]);
    }
    println!("{}", pretty_table(&["Line", "Amount"], rows));

    if summary.deductions.is_none() {
        println!("Settings not configured; showing gross income only. Run 'gigclip settings set'.");
    }
    print_target_line(&target, &progress, disp)?;
    Ok(())
}

fn project(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let save = sub.get_flag("save");
    let period = parse_period(sub.get_one::<String>("period").unwrap())?;
    let out_ccy = sub.get_one::<String>("currency").map(|s| s.to_uppercase());
    let today = Utc::now().date_naive();

    let earnings = store::fetch_earnings(conn)?;
    let settings = store::get_settings(conn)?;
    let summary = engine::projected_summary(&earnings, settings.as_ref(), period);
    let target = store::target_for(conn, today.month(), today.year())?;
    let progress = match (&summary.deductions, &target) {
        (Some(d), Some(t)) => engine::target_progress(d.net_income, t.target_amount),
        _ => None,
    };

    if save {
        match summary.to_history(today) {
            Some(new) => {
                let saved = store::append_summary(conn, &new)?;
                println!("Saved '{}' to history", saved.period_label);
            }
            None => println!("Not saved: settings are not configured yet."),
        }
    }

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let base = get_base_currency(conn)?;
    let disp = |v: &Decimal| -> Result<String> {
        match &out_ccy {
            Some(c) => Ok(format!("{:.2} {}", fx_convert(conn, today, *v, &base, c)?, c)),
            None => Ok(format!("{:.2} {}", v, base)),
        }
    };

    println!(
        "{} projection ({}x week)",
        period.label(),
        period.multiplier()
    );

    let mut chart_rows = Vec::new();
    for d in &summary.chart {
        let label = if d.label.is_empty() {
            "-".to_string()
        } else {
            d.label.clone()
        };
        chart_rows.push(vec![label, disp(&d.total_amount)?]);
    }
    println!("{}", pretty_table(&["Last 7 days", "Total"], chart_rows));

    let mut rows = vec![
        vec!["Recorded Income".to_string(), disp(&summary.total_income)?],
        vec!["Projected Income".to_string(), disp(&summary.scaled_income)?],
    ];
    if let (Some(d), Some(s)) = (&summary.deductions, &settings) {
        rows.push(vec!["Rent".into(), format!("-{}", disp(&d.rent)?)]);
        rows.push(vec!["Motorcycle".into(), format!("-{}", disp(&d.motorcycle)?)]);
        rows.push(vec!["Tax".into(), format!("-{}", disp(&d.tax)?)]);
        rows.push(vec![
            format!("Platform fee ({}%)", s.platform_fee_rate),
            format!("-{}", disp(&d.platform_fee)?),
        ]);
        rows.push(vec!["Net Income".into(), disp(&d.net_income)?]);
    }
    println!("{}", pretty_table(&["Line", "Amount"], rows));

    if summary.deductions.is_none() {
        println!("Settings not configured; showing gross income only. Run 'gigclip settings set'.");
    }
    print_target_line(&target, &progress, disp)?;
    Ok(())
}

fn print_target_line(
    target: &Option<crate::models::MonthlyTarget>,
    progress: &Option<Decimal>,
    disp: impl Fn(&Decimal) -> Result<String>,
) -> Result<()> {
    match (target, progress) {
        (Some(t), Some(p)) => println!(
            "Monthly target {}: {:.1}% reached",
            disp(&t.target_amount)?,
            p
        ),
        (Some(t), None) => println!("Monthly target {}", disp(&t.target_amount)?),
        _ => {}
    }
    Ok(())
}
