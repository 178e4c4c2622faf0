// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::{NewRecurring, TxKind};
use crate::recurrence;
use crate::sync::FinanceData;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_frequency, parse_kind,
    pretty_table, today,
};

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(data, sub)?,
        Some(("list", sub)) => list(data, sub)?,
        Some(("toggle", sub)) => toggle(data, sub)?,
        Some(("rm", sub)) => rm(data, sub)?,
        Some(("run", _)) => run(data)?,
        _ => {}
    }
    Ok(())
}

fn add(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().clone();
    let frequency = parse_frequency(sub.get_one::<String>("frequency").unwrap())?;
    let start_date = match sub.get_one::<String>("start") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let amount = match kind {
        TxKind::Income => amount.abs(),
        _ => -amount.abs(),
    };

    let created = data.add_recurring(NewRecurring {
        title,
        amount,
        kind,
        category,
        frequency,
        start_date,
    })?;
    println!(
        "Scheduled '{}' {} every {} starting {}",
        created.title,
        fmt_money(&created.amount),
        created.frequency.as_str(),
        created.start_date
    );
    Ok(())
}

fn list(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data.recurring())? {
        let rows: Vec<Vec<String>> = data
            .recurring()
            .iter()
            .map(|r| {
                vec![
                    r.title.clone(),
                    fmt_money(&r.amount),
                    r.kind.as_str().to_string(),
                    r.frequency.as_str().to_string(),
                    r.next_occurrence.to_string(),
                    if r.is_active { "active" } else { "paused" }.to_string(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Title", "Amount", "Kind", "Frequency", "Next", "State", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn toggle(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let active = data
        .recurring()
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.is_active)
        .ok_or_else(|| anyhow!("Recurring transaction '{}' not found", id))?;
    data.toggle_recurring(id, !active)?;
    println!(
        "Schedule {} is now {}",
        id,
        if active { "paused" } else { "active" }
    );
    Ok(())
}

fn rm(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    data.delete_recurring(id)?;
    println!("Removed schedule {}", id);
    Ok(())
}

fn run(data: &mut FinanceData) -> Result<()> {
    let report = recurrence::process_due(data, today());
    if report.generated == 0 && report.failed == 0 {
        println!("No occurrences due");
    } else {
        println!(
            "Generated {} transaction(s), {} failed",
            report.generated, report.failed
        );
    }
    Ok(())
}
