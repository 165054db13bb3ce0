// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Earning, HistoricalSummary, MonthlyTarget, NewSummary, Settings};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("invalid stored amount '{value}' in {column}")]
    BadAmount { column: &'static str, value: String },
    #[error("invalid stored date '{0}'")]
    BadDate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

const SETTING_KEYS: [&str; 4] = ["rent", "motorcycle", "tax", "platform_fee_rate"];

fn read_amount(column: &'static str, value: String) -> StoreResult<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|_| StoreError::BadAmount { column, value })
}

fn read_day(value: String) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| StoreError::BadDate(value))
}

// ---- earnings ----

fn earning_row(r: &rusqlite::Row) -> rusqlite::Result<(i64, String, String, String)> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
}

fn build_earning(raw: (i64, String, String, String)) -> StoreResult<Earning> {
    let (id, date, daily, cash) = raw;
    Ok(Earning {
        id,
        date: read_day(date)?,
        daily_amount: read_amount("daily_amount", daily)?,
        cash_amount: read_amount("cash_amount", cash)?,
    })
}

pub fn fetch_earnings(conn: &Connection) -> StoreResult<Vec<Earning>> {
    let mut stmt = conn
        .prepare("SELECT id, date, daily_amount, cash_amount FROM earnings ORDER BY date DESC")?;
    let rows = stmt.query_map([], earning_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(build_earning(row?)?);
    }
    Ok(out)
}

/// Insert, or replace both amounts if the date already has a row. The
/// unique-date collision is the expected path on a same-day re-save, so it
/// never surfaces as an error.
pub fn upsert_earning(
    conn: &Connection,
    date: NaiveDate,
    daily_amount: Decimal,
    cash_amount: Decimal,
) -> StoreResult<Earning> {
    conn.execute(
        "INSERT INTO earnings(date, daily_amount, cash_amount) VALUES (?1, ?2, ?3)
         ON CONFLICT(date) DO UPDATE SET
             daily_amount=excluded.daily_amount,
             cash_amount=excluded.cash_amount,
             updated_at=datetime('now')",
        params![
            date.to_string(),
            daily_amount.to_string(),
            cash_amount.to_string()
        ],
    )?;
    let raw = conn.query_row(
        "SELECT id, date, daily_amount, cash_amount FROM earnings WHERE date=?1",
        params![date.to_string()],
        earning_row,
    )?;
    build_earning(raw)
}

/// Idempotent: deleting an id that is already gone is a benign no-op and
/// reports false.
pub fn delete_earning(conn: &Connection, id: i64) -> StoreResult<bool> {
    let n = conn.execute("DELETE FROM earnings WHERE id=?1", params![id])?;
    Ok(n > 0)
}

// ---- settings ----

#[derive(Debug, Default, Clone)]
pub struct SettingsPatch {
    pub rent: Option<Decimal>,
    pub motorcycle: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub platform_fee_rate: Option<Decimal>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.rent.is_none()
            && self.motorcycle.is_none()
            && self.tax.is_none()
            && self.platform_fee_rate.is_none()
    }
}

/// None until the first `settings set`; after that, fields never written
/// read as zero.
pub fn get_settings(conn: &Connection) -> StoreResult<Option<Settings>> {
    let mut values = [Decimal::ZERO; 4];
    let mut configured = false;
    for (i, key) in SETTING_KEYS.into_iter().enumerate() {
        let v: Option<String> = conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        if let Some(s) = v {
            configured = true;
            values[i] = read_amount(key, s)?;
        }
    }
    if !configured {
        return Ok(None);
    }
    Ok(Some(Settings {
        rent: values[0],
        motorcycle: values[1],
        tax: values[2],
        platform_fee_rate: values[3],
    }))
}

/// Field-wise merge into the singleton; unnamed fields keep their value.
pub fn update_settings(conn: &Connection, patch: &SettingsPatch) -> StoreResult<Option<Settings>> {
    let fields = [
        ("rent", patch.rent),
        ("motorcycle", patch.motorcycle),
        ("tax", patch.tax),
        ("platform_fee_rate", patch.platform_fee_rate),
    ];
    for (key, value) in fields {
        if let Some(v) = value {
            conn.execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, v.to_string()],
            )?;
        }
    }
    get_settings(conn)
}

// ---- monthly targets ----

fn target_row(r: &rusqlite::Row) -> rusqlite::Result<(i64, u32, i32, String)> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
}

fn build_target(raw: (i64, u32, i32, String)) -> StoreResult<MonthlyTarget> {
    let (id, month, year, amount) = raw;
    Ok(MonthlyTarget {
        id,
        month,
        year,
        target_amount: read_amount("target_amount", amount)?,
    })
}

pub fn upsert_target(
    conn: &Connection,
    month: u32,
    year: i32,
    amount: Decimal,
) -> StoreResult<MonthlyTarget> {
    conn.execute(
        "INSERT INTO monthly_targets(month, year, target_amount) VALUES (?1, ?2, ?3)
         ON CONFLICT(month, year) DO UPDATE SET
             target_amount=excluded.target_amount,
             updated_at=datetime('now')",
        params![month, year, amount.to_string()],
    )?;
    let raw = conn.query_row(
        "SELECT id, month, year, target_amount FROM monthly_targets WHERE month=?1 AND year=?2",
        params![month, year],
        target_row,
    )?;
    build_target(raw)
}

pub fn target_for(conn: &Connection, month: u32, year: i32) -> StoreResult<Option<MonthlyTarget>> {
    let raw = conn
        .query_row(
            "SELECT id, month, year, target_amount FROM monthly_targets WHERE month=?1 AND year=?2",
            params![month, year],
            target_row,
        )
        .optional()?;
    raw.map(build_target).transpose()
}

pub fn fetch_targets(conn: &Connection) -> StoreResult<Vec<MonthlyTarget>> {
    let mut stmt = conn.prepare(
        "SELECT id, month, year, target_amount FROM monthly_targets
         ORDER BY year DESC, month DESC",
    )?;
    let rows = stmt.query_map([], target_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(build_target(row?)?);
    }
    Ok(out)
}

// ---- historical summaries (append-only) ----

type SummaryRaw = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn summary_row(r: &rusqlite::Row) -> rusqlite::Result<SummaryRaw> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
        r.get(9)?,
        r.get(10)?,
        r.get(11)?,
    ))
}

fn build_summary(raw: SummaryRaw) -> StoreResult<HistoricalSummary> {
    let (
        id,
        period_type,
        period_label,
        start_date,
        end_date,
        total_income,
        rent_deduction,
        motorcycle_deduction,
        tax_deduction,
        platform_fee,
        net_income,
        created_at,
    ) = raw;
    Ok(HistoricalSummary {
        id,
        period_type,
        period_label,
        start_date: read_day(start_date)?,
        end_date: read_day(end_date)?,
        total_income: read_amount("total_income", total_income)?,
        rent_deduction: read_amount("rent_deduction", rent_deduction)?,
        motorcycle_deduction: read_amount("motorcycle_deduction", motorcycle_deduction)?,
        tax_deduction: read_amount("tax_deduction", tax_deduction)?,
        platform_fee: read_amount("platform_fee", platform_fee)?,
        net_income: read_amount("net_income", net_income)?,
        created_at,
    })
}

const SUMMARY_COLS: &str = "id, period_type, period_label, start_date, end_date, total_income, \
     rent_deduction, motorcycle_deduction, tax_deduction, platform_fee, net_income, created_at";

pub fn append_summary(conn: &Connection, s: &NewSummary) -> StoreResult<HistoricalSummary> {
    conn.execute(
        "INSERT INTO historical_summaries(period_type, period_label, start_date, end_date,
             total_income, rent_deduction, motorcycle_deduction, tax_deduction,
             platform_fee, net_income)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            s.period_type,
            s.period_label,
            s.start_date.to_string(),
            s.end_date.to_string(),
            s.total_income.to_string(),
            s.rent_deduction.to_string(),
            s.motorcycle_deduction.to_string(),
            s.tax_deduction.to_string(),
            s.platform_fee.to_string(),
            s.net_income.to_string(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    let raw = conn.query_row(
        &format!("SELECT {SUMMARY_COLS} FROM historical_summaries WHERE id=?1"),
        params![id],
        summary_row,
    )?;
    build_summary(raw)
}

pub fn fetch_summaries(conn: &Connection, limit: Option<usize>) -> StoreResult<Vec<HistoricalSummary>> {
    let mut sql =
        format!("SELECT {SUMMARY_COLS} FROM historical_summaries ORDER BY created_at DESC, id DESC");
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], summary_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(build_summary(row?)?);
    }
    Ok(out)
}
