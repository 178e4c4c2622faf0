// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
    Debt,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Debt => "debt",
        }
    }
}

impl std::str::FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            "debt" => Ok(TxKind::Debt),
            other => Err(format!("unknown transaction kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Next occurrence after `date`. Monthly and yearly steps clamp to the
    /// end of shorter months (Jan 31 -> Feb 28), and further steps advance
    /// from the clamped value.
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date + Days::new(1),
            Frequency::Weekly => date + Days::new(7),
            Frequency::Monthly => date + Months::new(1),
            Frequency::Yearly => date + Months::new(12),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(format!("unknown frequency '{}'", other)),
        }
    }
}

/// A single ledger entry. Amounts are signed: positive is an inflow,
/// negative an outflow. Immutable once committed; only deletion is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Transaction input before an identifier has been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub label: String,
    pub total: Decimal,
    pub paid: Decimal,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Debt {
    pub fn remaining(&self) -> Decimal {
        self.total - self.paid
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub label: String,
    pub total: Decimal,
    pub paid: Decimal,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_occurrence: NaiveDate,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Recurring input; the first occurrence lands on `start_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecurring {
    pub title: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit_amount: Decimal,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub color: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub title: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub color: String,
    pub icon: String,
}

/// Partial goal edit; `None` fields are left untouched. The saved balance
/// moves only through contributions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsGoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Headline figures. Recomputed from scratch on every read; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub total_debt: Decimal,
}

impl Stats {
    pub fn compute(transactions: &[Transaction], debts: &[Debt]) -> Stats {
        let balance = transactions.iter().map(|t| t.amount).sum();
        let income = transactions
            .iter()
            .filter(|t| t.kind == TxKind::Income)
            .map(|t| t.amount)
            .sum();
        let expenses: Decimal = transactions
            .iter()
            .filter(|t| t.kind == TxKind::Expense)
            .map(|t| t.amount)
            .sum();
        let total_debt = debts.iter().map(Debt::remaining).sum();
        Stats {
            balance,
            income,
            expenses: expenses.abs(),
            total_debt,
        }
    }
}
