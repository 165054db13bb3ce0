// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use gigclip::engine::{self, Period};
use gigclip::models::{Earning, Settings};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn earning(id: i64, date: &str, daily: &str, cash: &str) -> Earning {
    Earning {
        id,
        date: day(date),
        daily_amount: daily.parse().unwrap(),
        cash_amount: cash.parse().unwrap(),
    }
}

fn settings() -> Settings {
    Settings {
        rent: Decimal::from(400),
        motorcycle: Decimal::from(150),
        tax: Decimal::from(425),
        platform_fee_rate: Decimal::from(10),
    }
}

#[test]
fn total_is_daily_plus_cash_exactly() {
    let e = earning(1, "2025-08-04", "350.25", "50.10");
    assert_eq!(e.total_amount(), Decimal::from_str_exact("400.35").unwrap());
}

#[test]
fn scaling_mode_worked_example() {
    // total 1000, m=2, rent 400, motorcycle 150, tax 425, fee 10%
    // => scaled 2000, deductions 1950, fee 200, net -150
    let earnings = vec![
        earning(1, "2025-08-04", "600", "0"),
        earning(2, "2025-08-05", "350", "50"),
    ];
    let s = settings();
    let sum = engine::projected_summary(&earnings, Some(&s), Period::TwoWeeks);

    assert_eq!(sum.total_income, Decimal::from(1000));
    assert_eq!(sum.scaled_income, Decimal::from(2000));
    let d = sum.deductions.unwrap();
    assert_eq!(d.rent, Decimal::from(800));
    assert_eq!(d.motorcycle, Decimal::from(300));
    assert_eq!(d.tax, Decimal::from(850));
    assert_eq!(d.platform_fee, Decimal::from(200));
    // a loss is reported as-is, never clamped to zero
    assert_eq!(d.net_income, Decimal::from(-150));
}

#[test]
fn month_multiplier_is_exactly_4_33() {
    assert_eq!(Period::Month.multiplier(), Decimal::new(433, 2));
    let earnings = vec![earning(1, "2025-08-04", "100", "0")];
    let sum = engine::projected_summary(&earnings, None, Period::Month);
    assert_eq!(sum.scaled_income, Decimal::from_str_exact("433").unwrap());
    assert!(sum.deductions.is_none());
}

#[test]
fn period_parse_rejects_unknown_selector() {
    assert!(Period::parse("fortnight").is_none());
    for p in Period::ALL {
        assert_eq!(Period::parse(p.key()), Some(p));
    }
}

#[test]
fn week_window_starts_monday() {
    // 2025-08-06 is a Wednesday
    let (start, end) = engine::week_window(day("2025-08-06"), 0);
    assert_eq!(start, day("2025-08-04"));
    assert_eq!(end, day("2025-08-10"));

    let (prev_start, prev_end) = engine::week_window(day("2025-08-06"), 1);
    assert_eq!(prev_start, day("2025-07-28"));
    assert_eq!(prev_end, day("2025-08-03"));
}

#[test]
fn window_deductions_are_quarter_of_settings_regardless_of_days_worked() {
    let s = settings();
    let busy = vec![
        earning(1, "2025-08-04", "200", "0"),
        earning(2, "2025-08-05", "100", "50"),
        earning(3, "2025-07-28", "999", "0"), // outside the window
    ];
    let quiet: Vec<Earning> = vec![];

    for earnings in [&busy, &quiet] {
        let sum = engine::week_summary(earnings, Some(&s), day("2025-08-04"));
        let d = sum.deductions.unwrap();
        assert_eq!(d.rent, Decimal::from(100));
        assert_eq!(d.motorcycle, Decimal::from_str_exact("37.5").unwrap());
        assert_eq!(d.tax, Decimal::from_str_exact("106.25").unwrap());
    }
}

#[test]
fn window_mode_counts_only_earnings_inside_the_week() {
    let s = settings();
    let earnings = vec![
        earning(1, "2025-08-04", "200", "0"),
        earning(2, "2025-08-05", "100", "50"),
        earning(3, "2025-07-28", "999", "0"),
    ];
    let sum = engine::week_summary(&earnings, Some(&s), day("2025-08-04"));
    assert_eq!(sum.total_income, Decimal::from(350));
    let d = sum.deductions.unwrap();
    assert_eq!(d.platform_fee, Decimal::from(35));
    // 350 - 100 - 37.5 - 106.25 - 35
    assert_eq!(d.net_income, Decimal::from_str_exact("71.25").unwrap());
}

#[test]
fn empty_earnings_nets_the_negated_deductions() {
    let s = settings();
    let sum = engine::week_summary(&[], Some(&s), day("2025-08-04"));
    assert_eq!(sum.total_income, Decimal::ZERO);
    let d = sum.deductions.unwrap();
    assert_eq!(d.platform_fee, Decimal::ZERO);
    assert_eq!(d.net_income, Decimal::from_str_exact("-243.75").unwrap());
}

#[test]
fn daily_breakdown_has_seven_zero_filled_entries_monday_to_sunday() {
    let earnings = vec![earning(1, "2025-08-05", "120", "30")];
    let sum = engine::week_summary(&earnings, None, day("2025-08-04"));

    assert_eq!(sum.daily.len(), 7);
    for (i, entry) in sum.daily.iter().enumerate() {
        let expected = day("2025-08-04") + chrono::Duration::days(i as i64);
        assert_eq!(entry.date, Some(expected));
    }
    assert!(sum.daily[0].label.starts_with("Mon"));
    assert!(sum.daily[6].label.starts_with("Sun"));
    // Tuesday carries the record, everything else is zero
    assert_eq!(sum.daily[1].total_amount, Decimal::from(150));
    assert_eq!(sum.daily[0].total_amount, Decimal::ZERO);
    assert_eq!(sum.daily[2].daily_amount, Decimal::ZERO);
}

#[test]
fn missing_settings_yield_partial_summary() {
    let earnings = vec![earning(1, "2025-08-04", "200", "0")];
    let sum = engine::week_summary(&earnings, None, day("2025-08-04"));
    assert_eq!(sum.total_income, Decimal::from(200));
    assert!(sum.deductions.is_none());
    assert!(sum.to_history().is_none());
}

#[test]
fn chart_left_pads_to_seven_slots() {
    let earnings = vec![
        earning(1, "2025-08-03", "100", "0"),
        earning(2, "2025-08-01", "50", "0"),
        earning(3, "2025-08-02", "75", "0"),
    ];
    let chart = engine::recent_daily(&earnings, 7);
    assert_eq!(chart.len(), 7);
    for slot in &chart[..4] {
        assert!(slot.date.is_none());
        assert_eq!(slot.total_amount, Decimal::ZERO);
    }
    // oldest of the kept records on the left, newest on the right
    assert_eq!(chart[4].date, Some(day("2025-08-01")));
    assert_eq!(chart[5].date, Some(day("2025-08-02")));
    assert_eq!(chart[6].date, Some(day("2025-08-03")));
}

#[test]
fn chart_keeps_only_the_most_recent_records() {
    let earnings: Vec<Earning> = (1..=9)
        .map(|i| earning(i, &format!("2025-08-0{}", i), "10", "0"))
        .collect();
    let chart = engine::recent_daily(&earnings, 7);
    assert_eq!(chart.len(), 7);
    assert_eq!(chart[0].date, Some(day("2025-08-03")));
    assert_eq!(chart[6].date, Some(day("2025-08-09")));
}

#[test]
fn target_progress_guards_non_positive_targets() {
    let net = Decimal::from(500);
    assert_eq!(engine::target_progress(net, Decimal::ZERO), None);
    assert_eq!(engine::target_progress(net, Decimal::from(-10)), None);
    assert_eq!(
        engine::target_progress(net, Decimal::from(1000)),
        Some(Decimal::from(50))
    );
}

#[test]
fn week_history_snapshot_carries_window_and_label() {
    let s = settings();
    let earnings = vec![earning(1, "2025-08-04", "200", "0")];
    let sum = engine::week_summary(&earnings, Some(&s), day("2025-08-04"));
    let snap = sum.to_history().unwrap();
    assert_eq!(snap.period_type, "week");
    assert_eq!(snap.start_date, day("2025-08-04"));
    assert_eq!(snap.end_date, day("2025-08-10"));
    assert_eq!(snap.period_label, "Week Aug 4 - Aug 10, 2025");
}

#[test]
fn projection_history_snapshot_pins_trailing_window() {
    let s = settings();
    let earnings = vec![earning(1, "2025-08-04", "100", "0")];
    let sum = engine::projected_summary(&earnings, Some(&s), Period::TwoWeeks);
    let snap = sum.to_history(day("2025-08-06")).unwrap();
    assert_eq!(snap.period_type, "2weeks");
    assert_eq!(snap.start_date, day("2025-07-24"));
    assert_eq!(snap.end_date, day("2025-08-06"));
    assert_eq!(snap.total_income, Decimal::from(200));
}
