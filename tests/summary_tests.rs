// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use gigclip::commands::summary;
use gigclip::store::{self, SettingsPatch};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE earnings(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,
            daily_amount TEXT NOT NULL,
            cash_amount TEXT NOT NULL DEFAULT '0',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE monthly_targets(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            target_amount TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(month, year)
        );
        CREATE TABLE historical_summaries(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            period_type TEXT NOT NULL,
            period_label TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            total_income TEXT NOT NULL,
            rent_deduction TEXT NOT NULL,
            motorcycle_deduction TEXT NOT NULL,
            tax_deduction TEXT NOT NULL,
            platform_fee TEXT NOT NULL,
            net_income TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .unwrap();
    conn
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn configure(conn: &Connection) {
    store::update_settings(
        conn,
        &SettingsPatch {
            rent: Some(Decimal::from(400)),
            motorcycle: Some(Decimal::from(150)),
            tax: Some(Decimal::from(425)),
            platform_fee_rate: Some(Decimal::from(10)),
        },
    )
    .unwrap();
}

#[test]
fn week_compute_over_seeded_store() {
    let conn = setup();
    configure(&conn);
    store::upsert_earning(&conn, day("2025-08-04"), Decimal::from(300), Decimal::ZERO).unwrap();
    store::upsert_earning(&conn, day("2025-08-09"), Decimal::from(100), Decimal::from(100))
        .unwrap();
    store::upsert_earning(&conn, day("2025-07-30"), Decimal::from(999), Decimal::ZERO).unwrap();

    let (sum, settings) = summary::compute_week(&conn, day("2025-08-06"), 0).unwrap();
    assert!(settings.is_some());
    assert_eq!(sum.week_start, day("2025-08-04"));
    assert_eq!(sum.total_income, Decimal::from(500));
    let d = sum.deductions.unwrap();
    assert_eq!(d.rent, Decimal::from(100));
    assert_eq!(d.platform_fee, Decimal::from(50));
    // 500 - 100 - 37.5 - 106.25 - 50
    assert_eq!(d.net_income, Decimal::from_str_exact("206.25").unwrap());
}

#[test]
fn week_offset_selects_the_previous_window() {
    let conn = setup();
    configure(&conn);
    store::upsert_earning(&conn, day("2025-07-30"), Decimal::from(999), Decimal::ZERO).unwrap();

    let (sum, _) = summary::compute_week(&conn, day("2025-08-06"), 1).unwrap();
    assert_eq!(sum.week_start, day("2025-07-28"));
    assert_eq!(sum.total_income, Decimal::from(999));
}

#[test]
fn settings_absent_until_first_set_then_merge_field_wise() {
    let conn = setup();
    assert!(store::get_settings(&conn).unwrap().is_none());

    configure(&conn);
    let merged = store::update_settings(
        &conn,
        &SettingsPatch {
            rent: Some(Decimal::from(500)),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(merged.rent, Decimal::from(500));
    // untouched fields keep their previous values
    assert_eq!(merged.motorcycle, Decimal::from(150));
    assert_eq!(merged.tax, Decimal::from(425));
    assert_eq!(merged.platform_fee_rate, Decimal::from(10));
}

#[test]
fn unconfigured_settings_yield_gross_only_summary() {
    let conn = setup();
    store::upsert_earning(&conn, day("2025-08-04"), Decimal::from(200), Decimal::ZERO).unwrap();

    let (sum, settings) = summary::compute_week(&conn, day("2025-08-06"), 0).unwrap();
    assert!(settings.is_none());
    assert_eq!(sum.total_income, Decimal::from(200));
    assert!(sum.deductions.is_none());
}

#[test]
fn saving_appends_to_history() {
    let conn = setup();
    configure(&conn);
    store::upsert_earning(&conn, day("2025-08-04"), Decimal::from(300), Decimal::ZERO).unwrap();

    let (sum, _) = summary::compute_week(&conn, day("2025-08-06"), 0).unwrap();
    let snap = sum.to_history().unwrap();
    let first = store::append_summary(&conn, &snap).unwrap();
    let second = store::append_summary(&conn, &snap).unwrap();
    assert_ne!(first.id, second.id);

    let all = store::fetch_summaries(&conn, None).unwrap();
    assert_eq!(all.len(), 2);
    // newest first
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[0].period_type, "week");
    assert_eq!(all[0].net_income, first.net_income);
}

#[test]
fn target_upsert_replaces_by_month_and_year() {
    let conn = setup();
    store::upsert_target(&conn, 8, 2025, Decimal::from(4000)).unwrap();
    store::upsert_target(&conn, 8, 2025, Decimal::from(5000)).unwrap();

    let targets = store::fetch_targets(&conn).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].target_amount, Decimal::from(5000));

    let t = store::target_for(&conn, 8, 2025).unwrap().unwrap();
    assert_eq!(t.target_amount, Decimal::from(5000));
    assert!(store::target_for(&conn, 9, 2025).unwrap().is_none());
}
