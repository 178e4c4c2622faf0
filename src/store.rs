// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.fluxbook", "Fluxbook", "fluxbook"));

/// Fixed keys of the snapshot store. One key per entity collection, each
/// holding a JSON array; a missing key reads as an empty collection. The
/// remaining keys sit outside the financial data model.
pub mod keys {
    pub const TRANSACTIONS: &str = "flux_transactions";
    pub const DEBTS: &str = "flux_debts";
    pub const RECURRING: &str = "flux_recurring";
    pub const BUDGETS: &str = "flux_budgets";
    pub const SAVINGS_GOALS: &str = "flux_savings_goals";
    pub const WHATS_NEW_VERSION: &str = "flux_whats_new_version";
    pub const SESSION: &str = "flux_session";
}

pub fn store_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fluxbook.sqlite"))
}

/// Durable key/value text store mirroring the in-memory collections.
/// Passive: never a source of truth while a cloud session is in progress.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn open_default() -> Result<Self> {
        let path = store_path()?;
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Open snapshot store at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(LocalStore { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory snapshot store")?;
        init_schema(&conn)?;
        Ok(LocalStore { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }

    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt snapshot under '{}'", key)),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.put(key, &raw)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}
