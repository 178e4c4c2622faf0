// Copyright (c) Fluxbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Release-notes gate: a single stored version string decides whether the
//! current release's notes still need surfacing. Not part of the financial
//! data model.

use anyhow::Result;

use crate::store::{LocalStore, keys};

#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ReleaseNote {
    pub version: &'static str,
    pub date: &'static str,
    pub title: &'static str,
    pub features: &'static [Feature],
}

pub static RELEASES: &[ReleaseNote] = &[ReleaseNote {
    version: "2.0.0",
    date: "2026-02-15",
    title: "The \"Supercharged\" Update",
    features: &[
        Feature {
            title: "Interactive Analytics",
            description: "Visualize your spending with daily, category, and monthly breakdowns.",
        },
        Feature {
            title: "Auto-Recurring Flows",
            description: "Set your bills and salary once. Fluxbook handles the rest automatically.",
        },
        Feature {
            title: "Smart CSV Import",
            description: "Upload bank statements. We auto-categorize and detect duplicates for you.",
        },
        Feature {
            title: "Live Financial Health",
            description: "Real-time analysis of your savings and debt with personalized insights.",
        },
        Feature {
            title: "Cloud Sync",
            description: "Sign in once and your ledger follows you across devices.",
        },
        Feature {
            title: "Hardened Security",
            description: "Row-level ownership keeps your financial data private.",
        },
    ],
}];

pub fn current_version() -> &'static str {
    RELEASES[0].version
}

/// The newest release if it has not been acknowledged yet.
pub fn pending_release(store: &LocalStore) -> Result<Option<&'static ReleaseNote>> {
    let seen = store.get(keys::WHATS_NEW_VERSION)?;
    if seen.as_deref() == Some(current_version()) {
        Ok(None)
    } else {
        Ok(Some(&RELEASES[0]))
    }
}

pub fn acknowledge(store: &LocalStore) -> Result<()> {
    store.put(keys::WHATS_NEW_VERSION, current_version())
}
