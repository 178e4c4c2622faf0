// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The synchronization hub. Owns the five in-memory entity collections and
//! mediates between them, the local snapshot store, and the remote backend.
//!
//! Every mutation follows the same contract: apply optimistically to
//! in-memory state, mirror to the snapshot store, and - when a session
//! exists - issue the remote write, replacing temporary identifiers with
//! server-assigned records on success and restoring the pre-operation
//! snapshot verbatim on failure. Rollback is value-level: the collection is
//! captured before the mutation and reinstated whole, never patched field
//! by field.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    Budget, Debt, NewDebt, NewRecurring, NewSavingsGoal, NewTransaction, RecurringTransaction,
    SavingsGoal, SavingsGoalUpdate, Stats, Transaction, TxKind,
};
use crate::remote::{ChangeEvent, ChangeKind, RemoteBackend, RemoteError, Table};
use crate::store::{LocalStore, keys};

/// Prefix distinguishing locally generated identifiers from server-assigned
/// ones. Later operations (delete, update) use it to decide whether a remote
/// call is owed for the record.
pub const LOCAL_ID_PREFIX: &str = "local-";

pub fn local_id() -> String {
    format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4().simple())
}

pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cloud sync failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("{0} '{1}' not found")]
    NotFound(&'static str, String),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

trait Record: Clone + Serialize + DeserializeOwned {
    const TABLE: Table;
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

impl Record for Transaction {
    const TABLE: Table = Table::Transactions;
    const ENTITY: &'static str = "transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Debt {
    const TABLE: Table = Table::Debts;
    const ENTITY: &'static str = "debt";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for RecurringTransaction {
    const TABLE: Table = Table::Recurring;
    const ENTITY: &'static str = "recurring transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Budget {
    const TABLE: Table = Table::Budgets;
    const ENTITY: &'static str = "budget";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for SavingsGoal {
    const TABLE: Table = Table::SavingsGoals;
    const ENTITY: &'static str = "savings goal";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Serialized row minus the local identifier, so the server assigns its own.
fn outbound_row<T: Serialize>(record: &T) -> SyncResult<Value> {
    let mut row = serde_json::to_value(record)?;
    if let Some(obj) = row.as_object_mut() {
        obj.remove("id");
    }
    Ok(row)
}

fn insert_synced<T: Record>(
    items: &mut Vec<T>,
    remote: Option<&dyn RemoteBackend>,
    record: T,
) -> SyncResult<T> {
    let payload = outbound_row(&record)?;
    let before = items.clone();
    items.insert(0, record.clone());
    let Some(remote) = remote else {
        return Ok(record);
    };
    match remote
        .insert(T::TABLE, payload)
        .map_err(SyncError::from)
        .and_then(|row| serde_json::from_value::<T>(row).map_err(SyncError::from))
    {
        Ok(confirmed) => {
            if let Some(slot) = items.iter_mut().find(|it| it.id() == record.id()) {
                *slot = confirmed.clone();
            }
            Ok(confirmed)
        }
        Err(err) => {
            *items = before;
            Err(err)
        }
    }
}

fn update_synced<T: Record>(
    items: &mut Vec<T>,
    remote: Option<&dyn RemoteBackend>,
    id: &str,
    patch: Value,
    apply: impl FnOnce(&mut T),
) -> SyncResult<()> {
    let before = items.clone();
    let Some(slot) = items.iter_mut().find(|it| it.id() == id) else {
        return Err(SyncError::NotFound(T::ENTITY, id.to_string()));
    };
    apply(slot);
    if let Some(remote) = remote {
        // Records still carrying a local id were never accepted remotely;
        // there is nothing to reference on the server.
        if !is_local_id(id) {
            if let Err(err) = remote.update(T::TABLE, id, patch) {
                *items = before;
                return Err(err.into());
            }
        }
    }
    Ok(())
}

fn delete_synced<T: Record>(
    items: &mut Vec<T>,
    remote: Option<&dyn RemoteBackend>,
    id: &str,
) -> SyncResult<()> {
    let before = items.clone();
    let len_before = items.len();
    items.retain(|it| it.id() != id);
    if items.len() == len_before {
        return Err(SyncError::NotFound(T::ENTITY, id.to_string()));
    }
    if let Some(remote) = remote {
        if !is_local_id(id) {
            if let Err(err) = remote.delete(T::TABLE, id) {
                *items = before;
                return Err(err.into());
            }
        }
    }
    Ok(())
}

fn apply_change<T: Record>(items: &mut Vec<T>, kind: ChangeKind, row: Value) -> SyncResult<()> {
    match kind {
        // An insert whose id is already present is the echo of our own
        // confirmed write; applying it again would duplicate the record.
        ChangeKind::Insert => {
            let record: T = serde_json::from_value(row)?;
            if !items.iter().any(|it| it.id() == record.id()) {
                items.insert(0, record);
            }
        }
        ChangeKind::Update => {
            let record: T = serde_json::from_value(row)?;
            if let Some(slot) = items.iter_mut().find(|it| it.id() == record.id()) {
                *slot = record;
            } else {
                items.insert(0, record);
            }
        }
        // Delete payloads carry only the old row's identifier.
        ChangeKind::Delete => {
            let id = row
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            items.retain(|it| it.id() != id);
        }
    }
    Ok(())
}

pub struct FinanceData {
    local: LocalStore,
    remote: Option<Box<dyn RemoteBackend>>,
    transactions: Vec<Transaction>,
    debts: Vec<Debt>,
    recurring: Vec<RecurringTransaction>,
    budgets: Vec<Budget>,
    savings_goals: Vec<SavingsGoal>,
}

impl FinanceData {
    /// Load state from the local snapshot store. The remote, when present,
    /// becomes authoritative only after `refresh_from_remote`.
    pub fn load(local: LocalStore, remote: Option<Box<dyn RemoteBackend>>) -> Result<Self> {
        let transactions = local.load_collection(keys::TRANSACTIONS)?;
        let debts = local.load_collection(keys::DEBTS)?;
        let recurring = local.load_collection(keys::RECURRING)?;
        let budgets = local.load_collection(keys::BUDGETS)?;
        let savings_goals = local.load_collection(keys::SAVINGS_GOALS)?;
        Ok(FinanceData {
            local,
            remote,
            transactions,
            debts,
            recurring,
            budgets,
            savings_goals,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn recurring(&self) -> &[RecurringTransaction] {
        &self.recurring
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.savings_goals
    }

    pub fn store(&self) -> &LocalStore {
        &self.local
    }

    pub fn online(&self) -> bool {
        self.remote.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.remote.as_deref().map(|r| r.user_id())
    }

    pub fn attach_remote(&mut self, remote: Box<dyn RemoteBackend>) {
        self.remote = Some(remote);
    }

    pub fn detach_remote(&mut self) {
        self.remote = None;
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.transactions, &self.debts)
    }

    fn owner(&self) -> Option<String> {
        self.user_id().map(str::to_string)
    }

    /// Mirror every collection to the snapshot store. Runs after each state
    /// change; a failed mirror degrades to a warning so the in-memory state
    /// the caller already observed stays authoritative.
    fn persist(&self) {
        if let Err(err) = self.try_persist() {
            warn!("local snapshot write failed: {err:#}");
        }
    }

    fn try_persist(&self) -> Result<()> {
        self.local
            .save_collection(keys::TRANSACTIONS, &self.transactions)?;
        self.local.save_collection(keys::DEBTS, &self.debts)?;
        self.local.save_collection(keys::RECURRING, &self.recurring)?;
        self.local.save_collection(keys::BUDGETS, &self.budgets)?;
        self.local
            .save_collection(keys::SAVINGS_GOALS, &self.savings_goals)?;
        Ok(())
    }

    /// Initial bulk fetch after a session appears. Each collection is pulled
    /// independently; a failed pull is logged and leaves the prior value.
    pub fn refresh_from_remote(&mut self) {
        fn pull<T: Record>(remote: &dyn RemoteBackend, into: &mut Vec<T>) {
            match remote.fetch_owned(T::TABLE) {
                Ok(rows) => {
                    match rows
                        .into_iter()
                        .map(serde_json::from_value)
                        .collect::<std::result::Result<Vec<T>, _>>()
                    {
                        Ok(items) => {
                            debug!("pulled {} {}s", items.len(), T::ENTITY);
                            *into = items;
                        }
                        Err(err) => warn!("decoding {}s failed: {err}", T::ENTITY),
                    }
                }
                Err(err) => warn!("fetching {}s failed: {err}", T::ENTITY),
            }
        }

        let Some(remote) = self.remote.as_deref() else {
            return;
        };
        pull(remote, &mut self.transactions);
        pull(remote, &mut self.debts);
        pull(remote, &mut self.recurring);
        pull(remote, &mut self.budgets);
        pull(remote, &mut self.savings_goals);
        self.persist();
    }

    /// Apply one realtime feed message. Deterministic merge: inserts dedupe
    /// by id, updates replace the matching record (or append when it is
    /// unknown locally), deletes remove by id.
    pub fn apply_remote_change(&mut self, event: ChangeEvent) -> SyncResult<()> {
        match event.table {
            Table::Transactions => apply_change(&mut self.transactions, event.kind, event.row)?,
            Table::Debts => apply_change(&mut self.debts, event.kind, event.row)?,
            Table::Recurring => apply_change(&mut self.recurring, event.kind, event.row)?,
            Table::Budgets => apply_change(&mut self.budgets, event.kind, event.row)?,
            Table::SavingsGoals => apply_change(&mut self.savings_goals, event.kind, event.row)?,
        }
        self.persist();
        Ok(())
    }

    /// Record a transaction. A debt-kind transaction also creates its
    /// companion debt; that secondary creation runs the same contract
    /// independently and never rolls back the committed primary.
    pub fn add_transaction(&mut self, new: NewTransaction) -> SyncResult<Transaction> {
        let record = Transaction {
            id: local_id(),
            title: new.title,
            amount: new.amount,
            kind: new.kind,
            category: new.category,
            date: new.date,
            user_id: self.owner(),
        };
        let result = insert_synced(&mut self.transactions, self.remote.as_deref(), record);
        self.persist();
        let confirmed = result?;

        if confirmed.kind == TxKind::Debt {
            let companion = NewDebt {
                label: confirmed.title.clone(),
                total: confirmed.amount.abs(),
                paid: Decimal::ZERO,
                due_date: confirmed.date,
                is_overdue: false,
            };
            if let Err(err) = self.add_debt(companion) {
                warn!("companion debt for '{}' not synced: {err}", confirmed.title);
            }
        }
        Ok(confirmed)
    }

    /// Import a batch in one remote round trip. All rows are applied
    /// optimistically and rolled back together if the bulk insert fails.
    pub fn bulk_add_transactions(
        &mut self,
        new: Vec<NewTransaction>,
    ) -> SyncResult<Vec<Transaction>> {
        let owner = self.owner();
        let records: Vec<Transaction> = new
            .into_iter()
            .map(|n| Transaction {
                id: local_id(),
                title: n.title,
                amount: n.amount,
                kind: n.kind,
                category: n.category,
                date: n.date,
                user_id: owner.clone(),
            })
            .collect();

        let payload = records
            .iter()
            .map(outbound_row)
            .collect::<SyncResult<Vec<Value>>>()?;

        let before = self.transactions.clone();
        self.transactions.splice(0..0, records.iter().cloned());

        let Some(remote) = self.remote.as_deref() else {
            self.persist();
            return Ok(records);
        };

        match remote
            .insert_many(Table::Transactions, payload)
            .map_err(SyncError::from)
            .and_then(|rows| {
                rows.into_iter()
                    .map(|r| serde_json::from_value::<Transaction>(r).map_err(SyncError::from))
                    .collect::<SyncResult<Vec<Transaction>>>()
            }) {
            Ok(confirmed) => {
                for (temp, server) in records.iter().zip(confirmed.iter()) {
                    if let Some(slot) = self.transactions.iter_mut().find(|t| t.id == temp.id) {
                        *slot = server.clone();
                    }
                }
                self.persist();
                Ok(confirmed)
            }
            Err(err) => {
                self.transactions = before;
                self.persist();
                Err(err)
            }
        }
    }

    pub fn delete_transaction(&mut self, id: &str) -> SyncResult<()> {
        let result = delete_synced(&mut self.transactions, self.remote.as_deref(), id);
        self.persist();
        result
    }

    /// Wipe all five collections, locally and remotely.
    pub fn clear_all(&mut self) -> SyncResult<()> {
        let before = (
            std::mem::take(&mut self.transactions),
            std::mem::take(&mut self.debts),
            std::mem::take(&mut self.recurring),
            std::mem::take(&mut self.budgets),
            std::mem::take(&mut self.savings_goals),
        );
        if let Some(remote) = self.remote.as_deref() {
            for table in Table::ALL {
                if let Err(err) = remote.delete_owned(table) {
                    (
                        self.transactions,
                        self.debts,
                        self.recurring,
                        self.budgets,
                        self.savings_goals,
                    ) = before;
                    self.persist();
                    return Err(err.into());
                }
            }
        }
        self.persist();
        Ok(())
    }

    pub fn add_debt(&mut self, new: NewDebt) -> SyncResult<Debt> {
        let record = Debt {
            id: local_id(),
            label: new.label,
            total: new.total,
            paid: new.paid,
            due_date: new.due_date,
            is_overdue: new.is_overdue,
            user_id: self.owner(),
        };
        let result = insert_synced(&mut self.debts, self.remote.as_deref(), record);
        self.persist();
        result
    }

    /// Pay down a debt. The payment itself is the primary update; the
    /// matching expense entry is a secondary creation that does not roll
    /// back an already-committed payment if its own sync fails.
    pub fn pay_debt(&mut self, id: &str, amount: Decimal, date: NaiveDate) -> SyncResult<()> {
        let Some(debt) = self.debts.iter().find(|d| d.id == id).cloned() else {
            return Err(SyncError::NotFound("debt", id.to_string()));
        };
        let updated_paid = debt.paid + amount;
        let result = update_synced(
            &mut self.debts,
            self.remote.as_deref(),
            id,
            json!({ "paid": updated_paid }),
            |d| d.paid = updated_paid,
        );
        self.persist();
        result?;

        let receipt = NewTransaction {
            title: format!("Payment for {}", debt.label),
            amount: -amount,
            kind: TxKind::Expense,
            category: "Debt Repayment".to_string(),
            date,
        };
        if let Err(err) = self.add_transaction(receipt) {
            warn!("payment record for '{}' not synced: {err}", debt.label);
        }
        Ok(())
    }

    pub fn add_recurring(&mut self, new: NewRecurring) -> SyncResult<RecurringTransaction> {
        let record = RecurringTransaction {
            id: local_id(),
            title: new.title,
            amount: new.amount,
            kind: new.kind,
            category: new.category,
            frequency: new.frequency,
            start_date: new.start_date,
            next_occurrence: new.start_date,
            is_active: true,
            user_id: self.owner(),
        };
        let result = insert_synced(&mut self.recurring, self.remote.as_deref(), record);
        self.persist();
        result
    }

    pub fn toggle_recurring(&mut self, id: &str, active: bool) -> SyncResult<()> {
        let result = update_synced(
            &mut self.recurring,
            self.remote.as_deref(),
            id,
            json!({ "is_active": active }),
            |r| r.is_active = active,
        );
        self.persist();
        result
    }

    pub fn delete_recurring(&mut self, id: &str) -> SyncResult<()> {
        let result = delete_synced(&mut self.recurring, self.remote.as_deref(), id);
        self.persist();
        result
    }

    /// Advance a schedule's next occurrence. Only the recurrence processor
    /// calls this; occurrences move forward, never back.
    pub fn set_next_occurrence(&mut self, id: &str, next: NaiveDate) -> SyncResult<()> {
        let result = update_synced(
            &mut self.recurring,
            self.remote.as_deref(),
            id,
            json!({ "next_occurrence": next }),
            |r| r.next_occurrence = next,
        );
        self.persist();
        result
    }

    /// Upsert keyed by category: an existing budget for the category is
    /// updated in place, otherwise a new one is inserted.
    pub fn update_budget(&mut self, category: &str, amount: Decimal) -> SyncResult<Budget> {
        if let Some(existing) = self.budgets.iter().find(|b| b.category == category).cloned() {
            let result = update_synced(
                &mut self.budgets,
                self.remote.as_deref(),
                &existing.id,
                json!({ "limit_amount": amount }),
                |b| b.limit_amount = amount,
            );
            self.persist();
            result?;
            return Ok(Budget {
                limit_amount: amount,
                ..existing
            });
        }
        let record = Budget {
            id: local_id(),
            category: category.to_string(),
            limit_amount: amount,
            period: "monthly".to_string(),
            user_id: self.owner(),
        };
        let result = insert_synced(&mut self.budgets, self.remote.as_deref(), record);
        self.persist();
        result
    }

    pub fn delete_budget(&mut self, id: &str) -> SyncResult<()> {
        let result = delete_synced(&mut self.budgets, self.remote.as_deref(), id);
        self.persist();
        result
    }

    pub fn add_savings_goal(&mut self, new: NewSavingsGoal) -> SyncResult<SavingsGoal> {
        let record = SavingsGoal {
            id: local_id(),
            title: new.title,
            target_amount: new.target_amount,
            current_amount: Decimal::ZERO,
            deadline: new.deadline,
            color: new.color,
            icon: new.icon,
            user_id: self.owner(),
        };
        let result = insert_synced(&mut self.savings_goals, self.remote.as_deref(), record);
        self.persist();
        result
    }

    pub fn update_savings_goal(
        &mut self,
        id: &str,
        changes: SavingsGoalUpdate,
    ) -> SyncResult<()> {
        let mut patch = serde_json::Map::new();
        if let Some(v) = &changes.title {
            patch.insert("title".to_string(), json!(v));
        }
        if let Some(v) = &changes.target_amount {
            patch.insert("target_amount".to_string(), json!(v));
        }
        if let Some(v) = &changes.deadline {
            patch.insert("deadline".to_string(), json!(v));
        }
        if let Some(v) = &changes.color {
            patch.insert("color".to_string(), json!(v));
        }
        if let Some(v) = &changes.icon {
            patch.insert("icon".to_string(), json!(v));
        }
        let result = update_synced(
            &mut self.savings_goals,
            self.remote.as_deref(),
            id,
            Value::Object(patch),
            |g| {
                if let Some(v) = changes.title {
                    g.title = v;
                }
                if let Some(v) = changes.target_amount {
                    g.target_amount = v;
                }
                if let Some(v) = changes.deadline {
                    g.deadline = Some(v);
                }
                if let Some(v) = changes.color {
                    g.color = v;
                }
                if let Some(v) = changes.icon {
                    g.icon = v;
                }
            },
        );
        self.persist();
        result
    }

    /// Contribute toward a goal. Mirrors `pay_debt`: the balance update is
    /// primary, the matching expense entry secondary.
    pub fn contribute_to_goal(
        &mut self,
        id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> SyncResult<()> {
        let Some(goal) = self.savings_goals.iter().find(|g| g.id == id).cloned() else {
            return Err(SyncError::NotFound("savings goal", id.to_string()));
        };
        let updated = goal.current_amount + amount;
        let result = update_synced(
            &mut self.savings_goals,
            self.remote.as_deref(),
            id,
            json!({ "current_amount": updated }),
            |g| g.current_amount = updated,
        );
        self.persist();
        result?;

        let receipt = NewTransaction {
            title: format!("Contribution to {}", goal.title),
            amount: -amount,
            kind: TxKind::Expense,
            category: "Savings".to_string(),
            date,
        };
        if let Err(err) = self.add_transaction(receipt) {
            warn!("contribution record for '{}' not synced: {err}", goal.title);
        }
        Ok(())
    }

    pub fn delete_savings_goal(&mut self, id: &str) -> SyncResult<()> {
        let result = delete_synced(&mut self.savings_goals, self.remote.as_deref(), id);
        self.persist();
        result
    }
}
