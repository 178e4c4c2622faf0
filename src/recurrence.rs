// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Catch-up for scheduled flows. Runs once per session load and whenever the
//! signed-in identity changes; replays every missed period of every active
//! schedule as ordinary transactions, then advances the schedule.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::NewTransaction;
use crate::sync::FinanceData;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatchUpReport {
    pub generated: usize,
    pub failed: usize,
}

/// Replay all due occurrences up to and including `today`.
///
/// A schedule far in the past replays each missed period in sequence; there
/// is no batching or cap. A generated transaction that fails to sync is
/// rolled back by the sync layer, counted here, and skipped - the run keeps
/// going and the occurrence still advances, so the same period is not
/// retried on the next load.
pub fn process_due(data: &mut FinanceData, today: NaiveDate) -> CatchUpReport {
    let mut report = CatchUpReport::default();
    let due: Vec<_> = data
        .recurring()
        .iter()
        .filter(|r| r.is_active && r.next_occurrence <= today)
        .cloned()
        .collect();

    for item in due {
        let mut occurrence = item.next_occurrence;
        while occurrence <= today {
            let generated = NewTransaction {
                title: item.title.clone(),
                amount: item.amount,
                kind: item.kind,
                category: item.category.clone(),
                date: occurrence,
            };
            match data.add_transaction(generated) {
                Ok(_) => report.generated += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!("recurring '{}' on {}: {}", item.title, occurrence, err);
                }
            }
            occurrence = item.frequency.advance(occurrence);
        }
        if let Err(err) = data.set_next_occurrence(&item.id, occurrence) {
            warn!("advancing schedule '{}' failed: {}", item.title, err);
        }
    }
    report
}
