// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregations over the transaction list, shaped for chart and report
//! consumption. Debt-kind entries contribute nothing to income or expense
//! sums.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxKind};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Per-day income and absolute expense sums, ascending by date, with a
/// running balance carried forward across all prior days.
pub fn daily_series(transactions: &[Transaction]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = by_date.entry(t.date).or_default();
        match t.kind {
            TxKind::Income => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount.abs(),
            TxKind::Debt => {}
        }
    }

    let mut running = Decimal::ZERO;
    by_date
        .into_iter()
        .map(|(date, (income, expenses))| {
            running += income - expenses;
            DailyPoint {
                date,
                income,
                expenses,
                balance: running,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Expense totals per category with each slice's share of the whole,
/// descending by amount. Percentages are 0 when there is no spending.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .collect();
    let total: Decimal = expenses.iter().map(|t| t.amount.abs()).sum();

    let mut grouped: HashMap<&str, Decimal> = HashMap::new();
    for t in &expenses {
        let category = if t.category.is_empty() {
            UNCATEGORIZED
        } else {
            t.category.as_str()
        };
        *grouped.entry(category).or_default() += t.amount.abs();
    }

    let mut slices: Vec<CategorySlice> = grouped
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            category: category.to_string(),
            percentage: if total > Decimal::ZERO {
                amount / total * Decimal::from(100)
            } else {
                Decimal::ZERO
            },
            amount,
        })
        .collect();
    slices.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    slices
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Per-month income, absolute expenses, and net, ascending by month key,
/// restricted to the most recent six months present in the data.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let month = t.date.format("%Y-%m").to_string();
        let entry = by_month.entry(month).or_default();
        match t.kind {
            TxKind::Income => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount.abs(),
            TxKind::Debt => {}
        }
    }

    let points: Vec<MonthlyPoint> = by_month
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyPoint {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect();
    let skip = points.len().saturating_sub(6);
    points.into_iter().skip(skip).collect()
}

/// Absolute expense total per category for one YYYY-MM month. Feeds the
/// budget report's spent-versus-limit column.
pub fn month_spending_by_category(
    transactions: &[Transaction],
    month: &str,
) -> BTreeMap<String, Decimal> {
    let mut spending: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions {
        if t.kind != TxKind::Expense || t.date.format("%Y-%m").to_string() != month {
            continue;
        }
        let category = if t.category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            t.category.clone()
        };
        *spending.entry(category).or_default() += t.amount.abs();
    }
    spending
}
