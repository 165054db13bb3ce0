// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Settings coverage: all four keys, or none
    let mut missing = Vec::new();
    let mut present = 0;
    for key in ["rent", "motorcycle", "tax", "platform_fee_rate"] {
        let found: Option<i32> = conn
            .query_row("SELECT 1 FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        if found.is_some() {
            present += 1;
        } else {
            missing.push(key);
        }
    }
    if present == 0 {
        rows.push(vec![
            "settings_unconfigured".into(),
            "run 'gigclip settings set'".into(),
        ]);
    } else if !missing.is_empty() {
        rows.push(vec!["settings_partial".into(), missing.join(", ")]);
    }

    // 2) Targets whose progress can never be computed
    let mut stmt = conn.prepare(
        "SELECT month, year, target_amount FROM monthly_targets
         WHERE CAST(target_amount AS REAL) <= 0",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let month: u32 = r.get(0)?;
        let year: i32 = r.get(1)?;
        let amount: String = r.get(2)?;
        rows.push(vec![
            "target_nonpositive".into(),
            format!("{}/{} = {}", month, year, amount),
        ]);
    }

    // 3) Earnings rows edited outside the CLI into a negative amount
    let mut stmt2 = conn.prepare(
        "SELECT date, daily_amount, cash_amount FROM earnings
         WHERE CAST(daily_amount AS REAL) < 0 OR CAST(cash_amount AS REAL) < 0
         ORDER BY date",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let date: String = r.get(0)?;
        let daily: String = r.get(1)?;
        let cash: String = r.get(2)?;
        rows.push(vec![
            "negative_amount".into(),
            format!("{}: daily {} cash {}", date, daily, cash),
        ]);
    }

    // 4) Stored rates that can never serve the configured base currency
    let base = crate::utils::get_base_currency(conn)?;
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM fx_rates", [], |r| r.get(0))?;
    let for_base: i64 = conn.query_row(
        "SELECT COUNT(*) FROM fx_rates WHERE base=?1 OR quote=?1",
        params![base],
        |r| r.get(0),
    )?;
    if total > 0 && for_base == 0 {
        rows.push(vec![
            "fx_base_mismatch".into(),
            format!("no stored rates touch base currency {}", base),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
