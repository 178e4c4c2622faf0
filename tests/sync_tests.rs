// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use chrono::NaiveDate;
use fluxbook::models::{
    Frequency, NewDebt, NewRecurring, NewSavingsGoal, NewTransaction, SavingsGoalUpdate,
    Transaction, TxKind,
};
use fluxbook::remote::{
    ChangeEvent, ChangeKind, RemoteBackend, RemoteError, RemoteResult, Table,
};
use fluxbook::store::LocalStore;
use fluxbook::sync::{FinanceData, SyncError, is_local_id};
use rust_decimal::Decimal;
use serde_json::Value;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_tx(title: &str, amount: i64, kind: TxKind, category: &str, on: NaiveDate) -> NewTransaction {
    NewTransaction {
        title: title.to_string(),
        amount: Decimal::from(amount),
        kind,
        category: category.to_string(),
        date: on,
    }
}

fn offline() -> FinanceData {
    FinanceData::load(LocalStore::open_in_memory().unwrap(), None).unwrap()
}

#[derive(Default)]
struct MockState {
    fail_inserts: HashSet<&'static str>, // table names, or "*" for all
    fail_updates: bool,
    fail_deletes: bool,
    fail_fetches: bool,
    fetch_rows: HashMap<&'static str, Vec<Value>>,
    inserts: Vec<String>,
    updates: Vec<(String, String)>,
    deletes: Vec<(String, String)>,
    cleared: Vec<String>,
    next_id: u32,
}

struct MockRemote(Rc<RefCell<MockState>>);

fn mock() -> (Rc<RefCell<MockState>>, Box<dyn RemoteBackend>) {
    let state = Rc::new(RefCell::new(MockState::default()));
    (state.clone(), Box::new(MockRemote(state)))
}

fn online() -> (Rc<RefCell<MockState>>, FinanceData) {
    let (state, remote) = mock();
    let data = FinanceData::load(LocalStore::open_in_memory().unwrap(), Some(remote)).unwrap();
    (state, data)
}

impl RemoteBackend for MockRemote {
    fn user_id(&self) -> &str {
        "user-1"
    }

    fn fetch_owned(&self, table: Table) -> RemoteResult<Vec<Value>> {
        let st = self.0.borrow();
        if st.fail_fetches {
            return Err(RemoteError::api(503, "unavailable"));
        }
        Ok(st.fetch_rows.get(table.name()).cloned().unwrap_or_default())
    }

    fn insert(&self, table: Table, row: Value) -> RemoteResult<Value> {
        let mut rows = self.insert_many(table, vec![row])?;
        rows.pop().ok_or(RemoteError::EmptyInsert)
    }

    fn insert_many(&self, table: Table, rows: Vec<Value>) -> RemoteResult<Vec<Value>> {
        let mut st = self.0.borrow_mut();
        if st.fail_inserts.contains("*") || st.fail_inserts.contains(table.name()) {
            return Err(RemoteError::api(500, "insert refused"));
        }
        let mut out = Vec::new();
        for mut row in rows {
            st.next_id += 1;
            if let Some(obj) = row.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    Value::String(format!("srv-{}", st.next_id)),
                );
            }
            st.inserts.push(table.name().to_string());
            out.push(row);
        }
        Ok(out)
    }

    fn update(&self, table: Table, id: &str, _patch: Value) -> RemoteResult<()> {
        let mut st = self.0.borrow_mut();
        if st.fail_updates {
            return Err(RemoteError::api(500, "update refused"));
        }
        st.updates.push((table.name().to_string(), id.to_string()));
        Ok(())
    }

    fn delete(&self, table: Table, id: &str) -> RemoteResult<()> {
        let mut st = self.0.borrow_mut();
        if st.fail_deletes {
            return Err(RemoteError::api(500, "delete refused"));
        }
        st.deletes.push((table.name().to_string(), id.to_string()));
        Ok(())
    }

    fn delete_owned(&self, table: Table) -> RemoteResult<()> {
        let mut st = self.0.borrow_mut();
        if st.fail_deletes {
            return Err(RemoteError::api(500, "delete refused"));
        }
        st.cleared.push(table.name().to_string());
        Ok(())
    }
}

#[test]
fn offline_mutations_assign_recognizable_local_ids() {
    let mut data = offline();
    let t = data
        .add_transaction(new_tx("Coffee", -5, TxKind::Expense, "Food & Dining", date(2026, 1, 2)))
        .unwrap();
    assert!(is_local_id(&t.id));
    assert!(!is_local_id("srv-1"));
    assert_eq!(data.transactions().len(), 1);
    assert!(data.transactions()[0].user_id.is_none());
}

#[test]
fn state_survives_reload_through_the_snapshot_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fluxbook.sqlite");
    {
        let mut data = FinanceData::load(LocalStore::open(&path).unwrap(), None).unwrap();
        data.add_transaction(new_tx(
            "Groceries",
            -80,
            TxKind::Expense,
            "Food & Dining",
            date(2026, 1, 2),
        ))
        .unwrap();
        data.update_budget("Food & Dining", Decimal::from(300)).unwrap();
        data.add_savings_goal(NewSavingsGoal {
            title: "Vacation".to_string(),
            target_amount: Decimal::from(2_000),
            deadline: None,
            color: "#6366f1".to_string(),
            icon: "target".to_string(),
        })
        .unwrap();
    }
    let data = FinanceData::load(LocalStore::open(&path).unwrap(), None).unwrap();
    assert_eq!(data.transactions().len(), 1);
    assert_eq!(data.transactions()[0].title, "Groceries");
    assert_eq!(data.budgets().len(), 1);
    assert_eq!(data.savings_goals().len(), 1);
}

#[test]
fn online_insert_adopts_the_server_assigned_id() {
    let (_state, mut data) = online();
    let t = data
        .add_transaction(new_tx("Coffee", -5, TxKind::Expense, "Food & Dining", date(2026, 1, 2)))
        .unwrap();
    assert_eq!(t.id, "srv-1");
    assert_eq!(data.transactions()[0].id, "srv-1");
    assert_eq!(data.transactions()[0].user_id.as_deref(), Some("user-1"));
    assert!(!data.transactions().iter().any(|t| is_local_id(&t.id)));
}

#[test]
fn failed_insert_rolls_back_element_wise() {
    let (state, mut data) = online();
    data.add_transaction(new_tx("Salary", 4_000, TxKind::Income, "Income", date(2026, 1, 1)))
        .unwrap();
    let before: Vec<Transaction> = data.transactions().to_vec();

    state.borrow_mut().fail_inserts.insert("*");
    let err = data
        .add_transaction(new_tx("Coffee", -5, TxKind::Expense, "Food & Dining", date(2026, 1, 2)))
        .unwrap_err();
    assert!(matches!(err, SyncError::Remote(_)));
    assert_eq!(data.transactions(), &before[..]);
}

#[test]
fn debt_transaction_spawns_a_companion_debt() {
    let mut data = offline();
    data.add_transaction(new_tx("Car loan", -5_000, TxKind::Debt, "Debt", date(2026, 2, 1)))
        .unwrap();

    assert_eq!(data.debts().len(), 1);
    let d = &data.debts()[0];
    assert_eq!(d.label, "Car loan");
    assert_eq!(d.total, Decimal::from(5_000));
    assert_eq!(d.paid, Decimal::ZERO);
    assert_eq!(d.due_date, date(2026, 2, 1));
    assert!(!d.is_overdue);
    assert_eq!(data.stats().total_debt, Decimal::from(5_000));
}

#[test]
fn failed_companion_debt_does_not_roll_back_the_transaction() {
    let (state, mut data) = online();
    state.borrow_mut().fail_inserts.insert("debts");

    let t = data
        .add_transaction(new_tx("Car loan", -5_000, TxKind::Debt, "Debt", date(2026, 2, 1)))
        .unwrap();
    assert_eq!(t.id, "srv-1");
    assert_eq!(data.transactions().len(), 1);
    assert!(data.debts().is_empty());
}

#[test]
fn pay_debt_updates_paid_and_records_an_expense() {
    let mut data = offline();
    let debt = data
        .add_debt(NewDebt {
            label: "Credit card".to_string(),
            total: Decimal::from(900),
            paid: Decimal::ZERO,
            due_date: date(2026, 6, 1),
            is_overdue: false,
        })
        .unwrap();

    data.pay_debt(&debt.id, Decimal::from(150), date(2026, 3, 3)).unwrap();

    assert_eq!(data.debts()[0].paid, Decimal::from(150));
    assert_eq!(data.debts()[0].remaining(), Decimal::from(750));
    let receipt = &data.transactions()[0];
    assert_eq!(receipt.title, "Payment for Credit card");
    assert_eq!(receipt.amount, Decimal::from(-150));
    assert_eq!(receipt.kind, TxKind::Expense);
    assert_eq!(receipt.category, "Debt Repayment");
    assert_eq!(receipt.date, date(2026, 3, 3));
}

#[test]
fn failed_payment_rolls_back_and_skips_the_receipt() {
    let (state, mut data) = online();
    let debt = data
        .add_debt(NewDebt {
            label: "Credit card".to_string(),
            total: Decimal::from(900),
            paid: Decimal::ZERO,
            due_date: date(2026, 6, 1),
            is_overdue: false,
        })
        .unwrap();

    state.borrow_mut().fail_updates = true;
    let err = data
        .pay_debt(&debt.id, Decimal::from(150), date(2026, 3, 3))
        .unwrap_err();
    assert!(matches!(err, SyncError::Remote(_)));
    assert_eq!(data.debts()[0].paid, Decimal::ZERO);
    assert!(data.transactions().is_empty());
}

#[test]
fn deleting_a_local_record_never_calls_the_remote() {
    let mut data = offline();
    let t = data
        .add_transaction(new_tx("Coffee", -5, TxKind::Expense, "Food & Dining", date(2026, 1, 2)))
        .unwrap();

    let (state, remote) = mock();
    data.attach_remote(remote);
    data.delete_transaction(&t.id).unwrap();

    assert!(data.transactions().is_empty());
    assert!(state.borrow().deletes.is_empty());
}

#[test]
fn failed_remote_delete_restores_the_record() {
    let (state, mut data) = online();
    let t = data
        .add_transaction(new_tx("Coffee", -5, TxKind::Expense, "Food & Dining", date(2026, 1, 2)))
        .unwrap();
    let before: Vec<Transaction> = data.transactions().to_vec();

    state.borrow_mut().fail_deletes = true;
    assert!(data.delete_transaction(&t.id).is_err());
    assert_eq!(data.transactions(), &before[..]);
}

#[test]
fn budget_update_is_an_upsert_keyed_by_category() {
    let mut data = offline();
    let first = data.update_budget("Food & Dining", Decimal::from(300)).unwrap();
    assert_eq!(first.period, "monthly");

    let second = data.update_budget("Food & Dining", Decimal::from(450)).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(data.budgets().len(), 1);
    assert_eq!(data.budgets()[0].limit_amount, Decimal::from(450));

    data.update_budget("Transport", Decimal::from(120)).unwrap();
    assert_eq!(data.budgets().len(), 2);
}

#[test]
fn contribution_updates_the_goal_and_records_an_expense() {
    let mut data = offline();
    let goal = data
        .add_savings_goal(NewSavingsGoal {
            title: "Emergency fund".to_string(),
            target_amount: Decimal::from(5_000),
            deadline: Some(date(2027, 1, 1)),
            color: "#10b981".to_string(),
            icon: "shield".to_string(),
        })
        .unwrap();
    assert_eq!(goal.current_amount, Decimal::ZERO);

    data.contribute_to_goal(&goal.id, Decimal::from(250), date(2026, 4, 1)).unwrap();

    assert_eq!(data.savings_goals()[0].current_amount, Decimal::from(250));
    let receipt = &data.transactions()[0];
    assert_eq!(receipt.title, "Contribution to Emergency fund");
    assert_eq!(receipt.amount, Decimal::from(-250));
    assert_eq!(receipt.category, "Savings");
}

#[test]
fn goal_updates_patch_only_the_given_fields() {
    let mut data = offline();
    let goal = data
        .add_savings_goal(NewSavingsGoal {
            title: "Emergency fund".to_string(),
            target_amount: Decimal::from(5_000),
            deadline: None,
            color: "#10b981".to_string(),
            icon: "shield".to_string(),
        })
        .unwrap();
    data.contribute_to_goal(&goal.id, Decimal::from(100), date(2026, 4, 1)).unwrap();

    data.update_savings_goal(
        &goal.id,
        SavingsGoalUpdate {
            target_amount: Some(Decimal::from(6_000)),
            deadline: Some(date(2027, 6, 1)),
            ..Default::default()
        },
    )
    .unwrap();

    let stored = &data.savings_goals()[0];
    assert_eq!(stored.title, "Emergency fund");
    assert_eq!(stored.target_amount, Decimal::from(6_000));
    assert_eq!(stored.deadline, Some(date(2027, 6, 1)));
    assert_eq!(stored.current_amount, Decimal::from(100));
}

#[test]
fn bulk_add_commits_or_rolls_back_as_one() {
    let (state, mut data) = online();
    data.add_transaction(new_tx("Salary", 4_000, TxKind::Income, "Income", date(2026, 1, 1)))
        .unwrap();

    let batch = vec![
        new_tx("A", -1, TxKind::Expense, "General", date(2026, 1, 2)),
        new_tx("B", -2, TxKind::Expense, "General", date(2026, 1, 3)),
    ];
    let imported = data.bulk_add_transactions(batch.clone()).unwrap();
    assert_eq!(imported.len(), 2);
    assert!(imported.iter().all(|t| t.id.starts_with("srv-")));
    // batch lands ahead of older entries, in batch order
    assert_eq!(data.transactions()[0].title, "A");
    assert_eq!(data.transactions()[1].title, "B");

    let before: Vec<Transaction> = data.transactions().to_vec();
    state.borrow_mut().fail_inserts.insert("*");
    assert!(data.bulk_add_transactions(batch).is_err());
    assert_eq!(data.transactions(), &before[..]);
}

#[test]
fn clear_all_empties_every_collection() {
    let (state, mut data) = online();
    data.add_transaction(new_tx("Salary", 4_000, TxKind::Income, "Income", date(2026, 1, 1)))
        .unwrap();
    data.update_budget("Food & Dining", Decimal::from(300)).unwrap();
    data.add_recurring(NewRecurring {
        title: "Rent".to_string(),
        amount: Decimal::from(-1_200),
        kind: TxKind::Expense,
        category: "Housing & Rent".to_string(),
        frequency: Frequency::Monthly,
        start_date: date(2026, 1, 1),
    })
    .unwrap();

    data.clear_all().unwrap();

    assert!(data.transactions().is_empty());
    assert!(data.debts().is_empty());
    assert!(data.recurring().is_empty());
    assert!(data.budgets().is_empty());
    assert!(data.savings_goals().is_empty());
    assert_eq!(state.borrow().cleared.len(), 5);
}

#[test]
fn refresh_failure_keeps_the_prior_collections() {
    let mut data = offline();
    data.add_transaction(new_tx("Coffee", -5, TxKind::Expense, "Food & Dining", date(2026, 1, 2)))
        .unwrap();

    let (state, remote) = mock();
    state.borrow_mut().fail_fetches = true;
    data.attach_remote(remote);
    data.refresh_from_remote();

    assert_eq!(data.transactions().len(), 1);
}

#[test]
fn refresh_replaces_state_with_remote_rows() {
    let cloud_tx = Transaction {
        id: "srv-42".to_string(),
        title: "Cloud coffee".to_string(),
        amount: Decimal::from(-6),
        kind: TxKind::Expense,
        category: "Food & Dining".to_string(),
        date: date(2026, 5, 5),
        user_id: Some("user-1".to_string()),
    };
    let (state, remote) = mock();
    state
        .borrow_mut()
        .fetch_rows
        .insert("transactions", vec![serde_json::to_value(&cloud_tx).unwrap()]);

    let mut data = FinanceData::load(LocalStore::open_in_memory().unwrap(), Some(remote)).unwrap();
    data.refresh_from_remote();

    assert_eq!(data.transactions(), &[cloud_tx][..]);
    assert!(data.debts().is_empty());
}

#[test]
fn realtime_merge_is_deterministic() {
    let mut data = offline();
    let t = Transaction {
        id: "srv-7".to_string(),
        title: "Pushed".to_string(),
        amount: Decimal::from(-9),
        kind: TxKind::Expense,
        category: "General".to_string(),
        date: date(2026, 5, 5),
        user_id: Some("user-1".to_string()),
    };
    let row = serde_json::to_value(&t).unwrap();

    // insert appends...
    data.apply_remote_change(ChangeEvent {
        table: Table::Transactions,
        kind: ChangeKind::Insert,
        row: row.clone(),
    })
    .unwrap();
    assert_eq!(data.transactions().len(), 1);

    // ...but an echo of a known id is skipped
    data.apply_remote_change(ChangeEvent {
        table: Table::Transactions,
        kind: ChangeKind::Insert,
        row: row.clone(),
    })
    .unwrap();
    assert_eq!(data.transactions().len(), 1);

    // update replaces the matching record
    let mut renamed = t.clone();
    renamed.title = "Pushed v2".to_string();
    data.apply_remote_change(ChangeEvent {
        table: Table::Transactions,
        kind: ChangeKind::Update,
        row: serde_json::to_value(&renamed).unwrap(),
    })
    .unwrap();
    assert_eq!(data.transactions()[0].title, "Pushed v2");

    // update for an unknown record appends it
    let mut other = t.clone();
    other.id = "srv-8".to_string();
    data.apply_remote_change(ChangeEvent {
        table: Table::Transactions,
        kind: ChangeKind::Update,
        row: serde_json::to_value(&other).unwrap(),
    })
    .unwrap();
    assert_eq!(data.transactions().len(), 2);

    // delete carries only the id
    data.apply_remote_change(ChangeEvent {
        table: Table::Transactions,
        kind: ChangeKind::Delete,
        row: serde_json::json!({ "id": "srv-7" }),
    })
    .unwrap();
    assert_eq!(data.transactions().len(), 1);
    assert_eq!(data.transactions()[0].id, "srv-8");
}

#[test]
fn toggling_a_schedule_flips_only_the_flag() {
    let mut data = offline();
    let r = data
        .add_recurring(NewRecurring {
            title: "Gym".to_string(),
            amount: Decimal::from(-40),
            kind: TxKind::Expense,
            category: "Health".to_string(),
            frequency: Frequency::Monthly,
            start_date: date(2026, 1, 1),
        })
        .unwrap();
    assert!(r.is_active);
    assert_eq!(r.next_occurrence, r.start_date);

    data.toggle_recurring(&r.id, false).unwrap();
    let stored = &data.recurring()[0];
    assert!(!stored.is_active);
    assert_eq!(stored.next_occurrence, r.next_occurrence);
}
