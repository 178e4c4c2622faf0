// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote backend boundary. The hosted service exposes five row-oriented
//! collections behind a PostgREST-style REST surface; everything the rest of
//! the crate needs goes through the [`RemoteBackend`] trait so tests can
//! substitute a scripted fake.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::store::{LocalStore, keys};

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("insert returned no representation")]
    EmptyInsert,
}

impl RemoteError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// The five remote collections, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Transactions,
    Debts,
    Recurring,
    Budgets,
    SavingsGoals,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Transactions,
        Table::Debts,
        Table::Recurring,
        Table::Budgets,
        Table::SavingsGoals,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Transactions => "transactions",
            Table::Debts => "debts",
            Table::Recurring => "recurring_transactions",
            Table::Budgets => "budgets",
            Table::SavingsGoals => "savings_goals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One message from a per-collection realtime change feed. The transport
/// that delivers these is outside this crate; arrival order is preserved by
/// whoever feeds them to `FinanceData::apply_remote_change`.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
    pub row: Value,
}

/// Write/read surface of the hosted data store, filtered to the
/// authenticated owner. Inserts return the server-assigned record in the
/// same round trip.
pub trait RemoteBackend {
    fn user_id(&self) -> &str;
    fn fetch_owned(&self, table: Table) -> RemoteResult<Vec<Value>>;
    fn insert(&self, table: Table, row: Value) -> RemoteResult<Value>;
    fn insert_many(&self, table: Table, rows: Vec<Value>) -> RemoteResult<Vec<Value>>;
    fn update(&self, table: Table, id: &str, patch: Value) -> RemoteResult<()>;
    fn delete(&self, table: Table, id: &str) -> RemoteResult<()>;
    fn delete_owned(&self, table: Table) -> RemoteResult<()>;
}

/// Credentials for a hosted-backend session, persisted in the snapshot
/// store between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub base_url: String,
    pub api_key: String,
    pub access_token: String,
    pub user_id: String,
}

pub fn load_session(store: &LocalStore) -> Result<Option<Session>> {
    match store.get(keys::SESSION)? {
        Some(raw) => {
            let session = serde_json::from_str(&raw).context("Corrupt stored session")?;
            Ok(Some(session))
        }
        None => Ok(None),
    }
}

pub fn save_session(store: &LocalStore, session: &Session) -> Result<()> {
    let raw = serde_json::to_string(session)?;
    store.put(keys::SESSION, &raw)
}

pub fn clear_session(store: &LocalStore) -> Result<()> {
    store.delete(keys::SESSION)
}

/// PostgREST client for a Supabase-style hosted backend.
pub struct SupabaseRemote {
    client: reqwest::blocking::Client,
    session: Session,
}

impl SupabaseRemote {
    pub fn connect(session: Session) -> Result<Self> {
        let client = crate::utils::http_client()?;
        Ok(SupabaseRemote { client, session })
    }

    fn endpoint(&self, table: Table) -> String {
        format!(
            "{}/rest/v1/{}",
            self.session.base_url.trim_end_matches('/'),
            table.name()
        )
    }

    fn authed(&self, req: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        req.header("apikey", &self.session.api_key)
            .bearer_auth(&self.session.access_token)
    }

    fn check(resp: reqwest::blocking::Response) -> RemoteResult<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().unwrap_or_default();
        Err(RemoteError::api(status.as_u16(), message))
    }
}

impl RemoteBackend for SupabaseRemote {
    fn user_id(&self) -> &str {
        &self.session.user_id
    }

    fn fetch_owned(&self, table: Table) -> RemoteResult<Vec<Value>> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{}", self.session.user_id)),
        ];
        if table == Table::Transactions {
            query.push(("order".to_string(), "date.desc".to_string()));
        }
        let resp = self
            .authed(self.client.get(self.endpoint(table)).query(&query))
            .send()?;
        let rows = Self::check(resp)?.json()?;
        Ok(rows)
    }

    fn insert(&self, table: Table, row: Value) -> RemoteResult<Value> {
        let rows = self.insert_many(table, vec![row])?;
        rows.into_iter().next().ok_or(RemoteError::EmptyInsert)
    }

    fn insert_many(&self, table: Table, rows: Vec<Value>) -> RemoteResult<Vec<Value>> {
        let resp = self
            .authed(self.client.post(self.endpoint(table)))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()?;
        let inserted = Self::check(resp)?.json()?;
        Ok(inserted)
    }

    fn update(&self, table: Table, id: &str, patch: Value) -> RemoteResult<()> {
        let resp = self
            .authed(
                self.client
                    .patch(self.endpoint(table))
                    .query(&[("id", format!("eq.{}", id))]),
            )
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn delete(&self, table: Table, id: &str) -> RemoteResult<()> {
        let resp = self
            .authed(
                self.client
                    .delete(self.endpoint(table))
                    .query(&[("id", format!("eq.{}", id))]),
            )
            .send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn delete_owned(&self, table: Table) -> RemoteResult<()> {
        let resp = self
            .authed(
                self.client
                    .delete(self.endpoint(table))
                    .query(&[("user_id", format!("eq.{}", self.session.user_id))]),
            )
            .send()?;
        Self::check(resp)?;
        Ok(())
    }
}
