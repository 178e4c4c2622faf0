// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Heuristic financial health score: a 0-100 number plus a status band,
//! display color, and one-line insight.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Stable,
    NeedsAttention,
    Critical,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Stable => "Stable",
            HealthStatus::NeedsAttention => "Needs Attention",
            HealthStatus::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialHealth {
    pub status: HealthStatus,
    pub color: &'static str,
    pub score: i32,
    pub insight: &'static str,
}

/// Score the four headline figures.
///
/// Baseline 50, adjusted by fixed-threshold bands on the savings rate
/// (surplus over income, as a percentage) and on a simplified debt-to-income
/// ratio, plus a bonus when the balance covers three months of expenses.
/// Zero income pins both ratios to 0, so "no income" and "break-even" score
/// alike.
pub fn assess(
    income: Decimal,
    expenses: Decimal,
    total_debt: Decimal,
    balance: Decimal,
) -> FinancialHealth {
    let surplus = income - expenses;
    let savings_rate = if income > Decimal::ZERO {
        surplus / income * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    let dti = if income > Decimal::ZERO {
        total_debt / income
    } else {
        Decimal::ZERO
    };

    let mut score: i32 = 50;

    if savings_rate > Decimal::from(25) {
        score += 30;
    } else if savings_rate > Decimal::from(15) {
        score += 20;
    } else if savings_rate > Decimal::from(5) {
        score += 10;
    } else if savings_rate < Decimal::from(-20) {
        score -= 50;
    } else if savings_rate < Decimal::ZERO {
        score -= 30;
    }

    if dti == Decimal::ZERO {
        score += 10;
    } else if dti > Decimal::from(5) {
        score -= 40;
    } else if dti > Decimal::from(2) {
        score -= 20;
    }

    // 3 months of runway
    if balance > expenses * Decimal::from(3) {
        score += 10;
    }

    let score = score.clamp(0, 100);

    let (status, color, insight) = if score >= 85 {
        (
            HealthStatus::Excellent,
            "#10b981",
            "You're building wealth rapidly! Great savings rate.",
        )
    } else if score >= 65 {
        (
            HealthStatus::Good,
            "#84cc16",
            "You're on the right track. Consider investing your surplus.",
        )
    } else if score >= 45 {
        (
            HealthStatus::Stable,
            "#6366f1",
            "Your finances are balanced, but there's room for more savings.",
        )
    } else if score >= 25 {
        (
            HealthStatus::NeedsAttention,
            "#f59e0b",
            "Your spending is high relative to income. Try to cut back.",
        )
    } else {
        (
            HealthStatus::Critical,
            "#ef4444",
            "You're spending significantly more than you earn. Action needed!",
        )
    };

    FinancialHealth {
        status,
        color,
        score,
        insight,
    }
}
