// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::categorize::auto_categorize;
use crate::models::{NewTransaction, Transaction, TxKind};
use crate::sync::FinanceData;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_kind, pretty_table, today,
};

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(data, sub)?,
        Some(("list", sub)) => list(data, sub)?,
        Some(("rm", sub)) => rm(data, sub)?,
        Some(("clear", sub)) => clear(data, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    // Signs follow kind: income is an inflow, everything else an outflow.
    let amount = match kind {
        TxKind::Income => amount.abs(),
        TxKind::Expense | TxKind::Debt => -amount.abs(),
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.clone(),
        None if kind == TxKind::Debt => "Debt".to_string(),
        None => auto_categorize(&title).to_string(),
    };

    let recorded = data.add_transaction(NewTransaction {
        title,
        amount,
        kind,
        category,
        date,
    })?;
    println!(
        "Recorded {} '{}' on {} [{}]",
        fmt_money(&recorded.amount),
        recorded.title,
        recorded.date,
        recorded.category
    );
    if recorded.kind == TxKind::Debt {
        println!(
            "Debt '{}' created for {}",
            recorded.title,
            fmt_money(&recorded.amount.abs())
        );
    }
    Ok(())
}

fn list(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub.get_one::<String>("month");
    let kind = sub
        .get_one::<String>("kind")
        .map(|k| parse_kind(k))
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let rows: Vec<&Transaction> = data
        .transactions()
        .iter()
        .filter(|t| month.is_none_or(|m| t.date.format("%Y-%m").to_string() == *m))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category.is_none_or(|c| t.category == *c))
        .take(limit)
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let table_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.title.clone(),
                    fmt_money(&t.amount),
                    t.kind.as_str().to_string(),
                    t.category.clone(),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Title", "Amount", "Kind", "Category", "ID"],
                table_rows,
            )
        );
    }
    Ok(())
}

fn rm(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    data.delete_transaction(id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn clear(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        return Err(anyhow!(
            "This wipes every collection, locally and in the cloud; pass --yes to confirm"
        ));
    }
    data.clear_all()?;
    println!("All data cleared");
    Ok(())
}
