// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bank statement CSV import: column auto-detection, amount and date
//! normalization, keyword categorization, duplicate flagging, and the
//! selection step that feeds the bulk-add operation. Validation failures are
//! rejected here, before anything reaches the sync layer.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::categorize::auto_categorize;
use crate::models::{NewTransaction, Transaction, TxKind};

pub const DATE_HINTS: &[&str] = &["date", "time", "day"];
pub const TITLE_HINTS: &[&str] = &["description", "title", "memo", "name", "payee"];
pub const AMOUNT_HINTS: &[&str] = &["amount", "price", "total", "value", "charge"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d", "%d-%m-%Y"];

/// User-facing column mapping, by header name. Empty entries mean
/// "not mapped yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: String,
    pub title: String,
    pub amount: String,
}

/// Guess a mapping from header names by keyword containment; the user can
/// override any entry before resolving.
pub fn detect_mapping(headers: &csv::StringRecord) -> ColumnMapping {
    let find = |hints: &[&str]| {
        headers
            .iter()
            .find(|h| {
                let h = h.to_lowercase();
                hints.iter().any(|k| h.contains(k))
            })
            .unwrap_or("")
            .to_string()
    };
    ColumnMapping {
        date: find(DATE_HINTS),
        title: find(TITLE_HINTS),
        amount: find(AMOUNT_HINTS),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMapping {
    pub date: usize,
    pub title: usize,
    pub amount: usize,
}

impl ColumnMapping {
    pub fn resolve(&self, headers: &csv::StringRecord) -> Result<ResolvedMapping> {
        if self.date.is_empty() || self.title.is_empty() || self.amount.is_empty() {
            return Err(anyhow!("date, title and amount columns must all be mapped"));
        }
        let position = |name: &str, field: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("{} column '{}' not found in CSV header", field, name))
        };
        Ok(ResolvedMapping {
            date: position(&self.date, "date")?,
            title: position(&self.title, "title")?,
            amount: position(&self.amount, "amount")?,
        })
    }
}

/// Normalize a statement amount: strips currency symbols and thousands
/// separators, and reads parenthetical negatives like `(15.00)`.
pub fn clean_amount(raw: &str) -> Result<Decimal> {
    let mut s = raw.trim().replace(['$', ','], "");
    if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        s = format!("-{}", &s[1..s.len() - 1]);
    }
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", raw))
}

/// Best-effort statement date parsing across common bank formats, falling
/// back to `fallback` when nothing fits.
pub fn parse_statement_date(raw: &str, fallback: NaiveDate) -> NaiveDate {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date;
        }
    }
    // ISO datetimes keep their date prefix
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return date;
        }
    }
    fallback
}

/// A parsed statement row awaiting confirmation. `selected` defaults to
/// "yes unless flagged as a duplicate"; the user may edit the title or
/// category and flip the selection before committing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedTransaction {
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TxKind,
    pub category: String,
    pub duplicate: bool,
    pub selected: bool,
}

impl ProposedTransaction {
    pub fn into_new(self) -> NewTransaction {
        NewTransaction {
            title: self.title,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
        }
    }
}

/// Duplicate heuristic: exact date, exact amount, and an existing title
/// containing the first five characters of the incoming one.
pub fn is_duplicate(
    title: &str,
    amount: Decimal,
    date: NaiveDate,
    existing: &[Transaction],
) -> bool {
    let needle: String = title.to_lowercase().chars().take(5).collect();
    existing
        .iter()
        .any(|t| t.date == date && t.amount == amount && t.title.to_lowercase().contains(&needle))
}

pub fn propose_row(
    record: &csv::StringRecord,
    mapping: &ResolvedMapping,
    flip_signs: bool,
    fallback_date: NaiveDate,
    existing: &[Transaction],
) -> Result<ProposedTransaction> {
    let title = record
        .get(mapping.title)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Untitled")
        .to_string();
    let mut amount = clean_amount(record.get(mapping.amount).unwrap_or(""))
        .with_context(|| format!("Row for '{}'", title))?;
    if flip_signs {
        amount = -amount;
    }
    let date = parse_statement_date(record.get(mapping.date).unwrap_or(""), fallback_date);
    let kind = if amount > Decimal::ZERO {
        TxKind::Income
    } else {
        TxKind::Expense
    };
    let duplicate = is_duplicate(&title, amount, date, existing);

    Ok(ProposedTransaction {
        category: auto_categorize(&title).to_string(),
        selected: !duplicate,
        title,
        amount,
        date,
        kind,
        duplicate,
    })
}

/// Run every data row of a statement through the proposal pipeline.
pub fn build_preview<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    mapping: &ColumnMapping,
    flip_signs: bool,
    fallback_date: NaiveDate,
    existing: &[Transaction],
) -> Result<Vec<ProposedTransaction>> {
    let headers = reader.headers()?.clone();
    let resolved = mapping.resolve(&headers)?;
    let mut preview = Vec::new();
    for record in reader.records() {
        let record = record?;
        preview.push(propose_row(
            &record,
            &resolved,
            flip_signs,
            fallback_date,
            existing,
        )?);
    }
    Ok(preview)
}

/// Rows still selected at confirmation, ready for the bulk-add operation.
pub fn selected_transactions(preview: Vec<ProposedTransaction>) -> Vec<NewTransaction> {
    preview
        .into_iter()
        .filter(|p| p.selected)
        .map(ProposedTransaction::into_new)
        .collect()
}
