// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Earning, NewSummary, Settings};

/// Reporting period. Each kind carries a fixed week multiplier; a month is
/// approximated as 4.33 weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    TwoWeeks,
    ThreeWeeks,
    FourWeeks,
    Month,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Week,
        Period::TwoWeeks,
        Period::ThreeWeeks,
        Period::FourWeeks,
        Period::Month,
    ];

    pub fn parse(s: &str) -> Option<Period> {
        match s {
            "week" => Some(Period::Week),
            "2weeks" => Some(Period::TwoWeeks),
            "3weeks" => Some(Period::ThreeWeeks),
            "4weeks" => Some(Period::FourWeeks),
            "month" => Some(Period::Month),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::TwoWeeks => "2weeks",
            Period::ThreeWeeks => "3weeks",
            Period::FourWeeks => "4weeks",
            Period::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::TwoWeeks => "2 Weeks",
            Period::ThreeWeeks => "3 Weeks",
            Period::FourWeeks => "4 Weeks",
            Period::Month => "Month",
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            Period::Week => Decimal::ONE,
            Period::TwoWeeks => Decimal::from(2),
            Period::ThreeWeeks => Decimal::from(3),
            Period::FourWeeks => Decimal::from(4),
            Period::Month => Decimal::new(433, 2),
        }
    }

    /// Calendar days covered when a projection is pinned to a date range.
    pub fn days(self) -> i64 {
        match self {
            Period::Week => 7,
            Period::TwoWeeks => 14,
            Period::ThreeWeeks => 21,
            Period::FourWeeks => 28,
            Period::Month => 30,
        }
    }
}

impl serde::Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// The four deduction lines plus the resulting net. Net income may be
/// negative; a loss is reported, not clamped.
#[derive(Debug, Clone, Serialize)]
pub struct Deductions {
    pub rent: Decimal,
    pub motorcycle: Decimal,
    pub tax: Decimal,
    pub platform_fee: Decimal,
    pub net_income: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEarning {
    pub date: Option<NaiveDate>,
    pub label: String,
    pub daily_amount: Decimal,
    pub cash_amount: Decimal,
    pub total_amount: Decimal,
}

impl DailyEarning {
    fn empty(date: Option<NaiveDate>, label: String) -> Self {
        DailyEarning {
            date,
            label,
            daily_amount: Decimal::ZERO,
            cash_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_income: Decimal,
    pub daily: Vec<DailyEarning>,
    pub deductions: Option<Deductions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectedSummary {
    pub period: Period,
    pub total_income: Decimal,
    pub scaled_income: Decimal,
    pub chart: Vec<DailyEarning>,
    pub deductions: Option<Deductions>,
}

/// Inclusive Monday..Sunday window containing `reference`, shifted back
/// `offset` whole weeks.
pub fn week_window(reference: NaiveDate, offset: u32) -> (NaiveDate, NaiveDate) {
    let monday = reference
        - Duration::days(reference.weekday().num_days_from_monday() as i64)
        - Duration::weeks(offset as i64);
    (monday, monday + Duration::days(6))
}

/// Calendar-window aggregation: only earnings inside the week count, and the
/// monthly settings figures are apportioned across four weeks.
pub fn week_summary(
    earnings: &[Earning],
    settings: Option<&Settings>,
    week_start: NaiveDate,
) -> WeekSummary {
    let week_end = week_start + Duration::days(6);
    let in_week: Vec<&Earning> = earnings
        .iter()
        .filter(|e| e.date >= week_start && e.date <= week_end)
        .collect();

    let daily = (0..7)
        .map(|i| {
            let day = week_start + Duration::days(i);
            let label = day.format("%a, %b %-d").to_string();
            match in_week.iter().find(|e| e.date == day) {
                Some(e) => DailyEarning {
                    date: Some(day),
                    label,
                    daily_amount: e.daily_amount,
                    cash_amount: e.cash_amount,
                    total_amount: e.total_amount(),
                },
                None => DailyEarning::empty(Some(day), label),
            }
        })
        .collect();

    let total_income: Decimal = in_week.iter().map(|e| e.total_amount()).sum();
    let four = Decimal::from(4);
    let deductions = settings.map(|s| {
        let rent = s.rent / four;
        let motorcycle = s.motorcycle / four;
        let tax = s.tax / four;
        let platform_fee = total_income * s.platform_fee_rate / Decimal::ONE_HUNDRED;
        Deductions {
            rent,
            motorcycle,
            tax,
            platform_fee,
            net_income: total_income - rent - motorcycle - tax - platform_fee,
        }
    });

    WeekSummary {
        week_start,
        week_end,
        total_income,
        daily,
        deductions,
    }
}

/// Scaling aggregation: every recorded earning counts as one reference week,
/// projected onto the period by its multiplier. The platform fee is taken on
/// the scaled gross, not scaled separately.
pub fn projected_summary(
    earnings: &[Earning],
    settings: Option<&Settings>,
    period: Period,
) -> ProjectedSummary {
    let total_income: Decimal = earnings.iter().map(|e| e.total_amount()).sum();
    let m = period.multiplier();
    let scaled_income = total_income * m;
    let deductions = settings.map(|s| {
        let rent = s.rent * m;
        let motorcycle = s.motorcycle * m;
        let tax = s.tax * m;
        let platform_fee = scaled_income * s.platform_fee_rate / Decimal::ONE_HUNDRED;
        Deductions {
            rent,
            motorcycle,
            tax,
            platform_fee,
            net_income: scaled_income - rent - motorcycle - tax - platform_fee,
        }
    });

    ProjectedSummary {
        period,
        total_income,
        scaled_income,
        chart: recent_daily(earnings, 7),
        deductions,
    }
}

/// Most recent `slots` records, oldest on the left, left-padded with zero
/// entries when fewer exist. Feeds the earnings chart.
pub fn recent_daily(earnings: &[Earning], slots: usize) -> Vec<DailyEarning> {
    let mut recent: Vec<&Earning> = earnings.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(slots);
    recent.reverse();

    let mut out = Vec::with_capacity(slots);
    for _ in recent.len()..slots {
        out.push(DailyEarning::empty(None, String::new()));
    }
    for e in recent {
        out.push(DailyEarning {
            date: Some(e.date),
            label: e.date.format("%b %-d").to_string(),
            daily_amount: e.daily_amount,
            cash_amount: e.cash_amount,
            total_amount: e.total_amount(),
        });
    }
    out
}

/// Net income as a percentage of the monthly target. A zero or negative
/// target has no meaningful progress and yields None.
pub fn target_progress(net_income: Decimal, target_amount: Decimal) -> Option<Decimal> {
    if target_amount <= Decimal::ZERO {
        return None;
    }
    Some(net_income / target_amount * Decimal::ONE_HUNDRED)
}

pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "Week {} - {}",
        start.format("%b %-d"),
        end.format("%b %-d, %Y")
    )
}

impl WeekSummary {
    /// Snapshot for the history log. None until settings are configured;
    /// a summary without deduction lines is not worth archiving.
    pub fn to_history(&self) -> Option<NewSummary> {
        self.deductions.as_ref().map(|d| NewSummary {
            period_type: Period::Week.key().to_string(),
            period_label: week_label(self.week_start, self.week_end),
            start_date: self.week_start,
            end_date: self.week_end,
            total_income: self.total_income,
            rent_deduction: d.rent,
            motorcycle_deduction: d.motorcycle,
            tax_deduction: d.tax,
            platform_fee: d.platform_fee,
            net_income: d.net_income,
        })
    }
}

impl ProjectedSummary {
    /// Snapshot for the history log, pinned to the trailing date range
    /// ending at `reference`.
    pub fn to_history(&self, reference: NaiveDate) -> Option<NewSummary> {
        let start = reference - Duration::days(self.period.days() - 1);
        self.deductions.as_ref().map(|d| NewSummary {
            period_type: self.period.key().to_string(),
            period_label: format!(
                "{} projection to {}",
                self.period.label(),
                reference.format("%b %-d, %Y")
            ),
            start_date: start,
            end_date: reference,
            total_income: self.scaled_income,
            rent_deduction: d.rent,
            motorcycle_deduction: d.motorcycle,
            tax_deduction: d.tax,
            platform_fee: d.platform_fee,
            net_income: d.net_income,
        })
    }
}
