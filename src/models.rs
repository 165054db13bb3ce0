// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One calendar day's reported delivery income: the app-tracked amount
/// plus whatever was collected in cash. At most one row per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Earning {
    pub id: i64,
    pub date: NaiveDate,
    pub daily_amount: Decimal,
    pub cash_amount: Decimal,
}

impl Earning {
    /// Derived, never stored independently.
    pub fn total_amount(&self) -> Decimal {
        self.daily_amount + self.cash_amount
    }
}

/// Monthly deduction parameters. Rent, motorcycle and tax are flat monthly
/// figures; the platform fee is a percentage (0-100) of gross income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub rent: Decimal,
    pub motorcycle: Decimal,
    pub tax: Decimal,
    pub platform_fee_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTarget {
    pub id: i64,
    pub month: u32,
    pub year: i32,
    pub target_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalSummary {
    pub id: i64,
    pub period_type: String,
    pub period_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Decimal,
    pub rent_deduction: Decimal,
    pub motorcycle_deduction: Decimal,
    pub tax_deduction: Decimal,
    pub platform_fee: Decimal,
    pub net_income: Decimal,
    pub created_at: String,
}

/// A summary about to be appended to history; ids and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewSummary {
    pub period_type: String,
    pub period_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Decimal,
    pub rent_deduction: Decimal,
    pub motorcycle_deduction: Decimal,
    pub tax_deduction: Decimal,
    pub platform_fee: Decimal,
    pub net_income: Decimal,
}
