// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fluxbook::charts::{
    category_breakdown, daily_series, month_spending_by_category, monthly_series,
};
use fluxbook::models::{Debt, Stats, Transaction, TxKind};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(id: &str, amount: i64, kind: TxKind, category: &str, on: NaiveDate) -> Transaction {
    Transaction {
        id: id.to_string(),
        title: format!("tx {}", id),
        amount: Decimal::from(amount),
        kind,
        category: category.to_string(),
        date: on,
        user_id: None,
    }
}

fn sample_ledger() -> Vec<Transaction> {
    vec![
        tx("1", 3_000, TxKind::Income, "Income", date(2026, 3, 1)),
        tx("2", -120, TxKind::Expense, "Food & Dining", date(2026, 3, 2)),
        tx("3", -80, TxKind::Expense, "Transport", date(2026, 3, 2)),
        tx("4", -300, TxKind::Expense, "Food & Dining", date(2026, 3, 10)),
        tx("5", -500, TxKind::Debt, "Debt", date(2026, 3, 11)),
    ]
}

#[test]
fn daily_series_runs_ascending_with_carried_balance() {
    let series = daily_series(&sample_ledger());
    assert_eq!(series.len(), 4);
    assert_eq!(series[0].date, date(2026, 3, 1));
    assert_eq!(series[0].balance, Decimal::from(3_000));
    assert_eq!(series[1].income, Decimal::ZERO);
    assert_eq!(series[1].expenses, Decimal::from(200));
    assert_eq!(series[1].balance, Decimal::from(2_800));
    // debt-kind day exists but moves nothing
    assert_eq!(series[3].income, Decimal::ZERO);
    assert_eq!(series[3].expenses, Decimal::ZERO);
    assert_eq!(series[3].balance, Decimal::from(2_500));
}

#[test]
fn daily_terminal_balance_equals_income_minus_expenses() {
    let ledger = sample_ledger();
    let stats = Stats::compute(&ledger, &[]);
    let series = daily_series(&ledger);
    assert_eq!(
        series.last().unwrap().balance,
        stats.income - stats.expenses
    );
}

#[test]
fn category_breakdown_percentages_sum_to_hundred() {
    let slices = category_breakdown(&sample_ledger());
    assert_eq!(slices.len(), 2);
    // descending by amount
    assert_eq!(slices[0].category, "Food & Dining");
    assert_eq!(slices[0].amount, Decimal::from(420));
    let total: Decimal = slices.iter().map(|s| s.percentage).sum();
    assert_eq!(total, Decimal::from(100));
}

#[test]
fn category_breakdown_zero_total_yields_zero_percentages() {
    let ledger = vec![tx("1", 0, TxKind::Expense, "Food & Dining", date(2026, 1, 1))];
    let slices = category_breakdown(&ledger);
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].percentage, Decimal::ZERO);
}

#[test]
fn category_breakdown_names_empty_category() {
    let ledger = vec![tx("1", -10, TxKind::Expense, "", date(2026, 1, 1))];
    let slices = category_breakdown(&ledger);
    assert_eq!(slices[0].category, "Uncategorized");
}

#[test]
fn monthly_series_keeps_last_six_months() {
    let mut ledger = Vec::new();
    for m in 1..=8u32 {
        ledger.push(tx(
            &format!("i{}", m),
            1_000,
            TxKind::Income,
            "Income",
            date(2026, m, 5),
        ));
        ledger.push(tx(
            &format!("e{}", m),
            -400,
            TxKind::Expense,
            "Food & Dining",
            date(2026, m, 20),
        ));
    }
    let series = monthly_series(&ledger);
    assert_eq!(series.len(), 6);
    assert_eq!(series[0].month, "2026-03");
    assert_eq!(series[5].month, "2026-08");
    for point in &series {
        assert_eq!(point.net, Decimal::from(600));
    }
}

#[test]
fn month_spending_filters_to_requested_month() {
    let spending = month_spending_by_category(&sample_ledger(), "2026-03");
    assert_eq!(spending.get("Food & Dining"), Some(&Decimal::from(420)));
    assert_eq!(spending.get("Transport"), Some(&Decimal::from(80)));
    assert!(month_spending_by_category(&sample_ledger(), "2026-04").is_empty());
}

#[test]
fn stats_are_linear_reductions() {
    let ledger = sample_ledger();
    let stats = Stats::compute(&ledger, &[]);
    assert_eq!(stats.balance, Decimal::from(3_000 - 120 - 80 - 300 - 500));
    assert_eq!(stats.income, Decimal::from(3_000));
    assert_eq!(stats.expenses, Decimal::from(500));
    assert_eq!(stats.total_debt, Decimal::ZERO);
}

#[test]
fn balance_identity_holds_without_debt_entries() {
    let ledger: Vec<Transaction> = sample_ledger()
        .into_iter()
        .filter(|t| t.kind != TxKind::Debt)
        .collect();
    let stats = Stats::compute(&ledger, &[]);
    assert_eq!(stats.balance, stats.income - stats.expenses);
}

#[test]
fn total_debt_ignores_transactions() {
    let debts = vec![
        Debt {
            id: "d1".to_string(),
            label: "Car loan".to_string(),
            total: Decimal::from(12_000),
            paid: Decimal::from(2_000),
            due_date: date(2027, 1, 1),
            is_overdue: false,
            user_id: None,
        },
        Debt {
            id: "d2".to_string(),
            label: "Credit card".to_string(),
            total: Decimal::from(900),
            paid: Decimal::ZERO,
            due_date: date(2026, 6, 1),
            is_overdue: true,
            user_id: None,
        },
    ];
    let with_txs = Stats::compute(&sample_ledger(), &debts);
    let without_txs = Stats::compute(&[], &debts);
    assert_eq!(with_txs.total_debt, Decimal::from(10_900));
    assert_eq!(with_txs.total_debt, without_txs.total_debt);
}
