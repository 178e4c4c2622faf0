// Copyright (c) Fluxbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::charts::month_spending_by_category;
use crate::sync::FinanceData;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_month, pretty_table, today};

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(data, sub)?,
        Some(("list", sub)) => list(data, sub)?,
        Some(("rm", sub)) => rm(data, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?.abs();
    let budget = data.update_budget(category, amount)?;
    println!(
        "Budget set: {} = {}/month",
        budget.category,
        fmt_money(&budget.limit_amount)
    );
    Ok(())
}

fn list(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => today().format("%Y-%m").to_string(),
    };

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data.budgets())? {
        return Ok(());
    }

    let spending = month_spending_by_category(data.transactions(), &month);
    let rows: Vec<Vec<String>> = data
        .budgets()
        .iter()
        .map(|b| {
            let spent = spending.get(&b.category).copied().unwrap_or(Decimal::ZERO);
            vec![
                b.category.clone(),
                fmt_money(&b.limit_amount),
                fmt_money(&spent),
                fmt_money(&(b.limit_amount - spent)),
                b.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Limit", &format!("Spent ({})", month), "Left", "ID"],
            rows,
        )
    );
    Ok(())
}

fn rm(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    data.delete_budget(id)?;
    println!("Removed budget {}", id);
    Ok(())
}
