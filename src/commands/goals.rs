// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{NewSavingsGoal, SavingsGoalUpdate};
use crate::sync::FinanceData;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, today};

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(data, sub)?,
        Some(("list", sub)) => list(data, sub)?,
        Some(("update", sub)) => update(data, sub)?,
        Some(("contribute", sub)) => contribute(data, sub)?,
        Some(("rm", sub)) => rm(data, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let target_amount = parse_decimal(sub.get_one::<String>("target").unwrap())?.abs();
    let deadline = sub
        .get_one::<String>("deadline")
        .map(|d| parse_date(d))
        .transpose()?;
    let color = sub.get_one::<String>("color").unwrap().clone();
    let icon = sub.get_one::<String>("icon").unwrap().clone();

    let goal = data.add_savings_goal(NewSavingsGoal {
        title,
        target_amount,
        deadline,
        color,
        icon,
    })?;
    println!(
        "Goal '{}' created, target {}",
        goal.title,
        fmt_money(&goal.target_amount)
    );
    Ok(())
}

fn list(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &data.savings_goals(),
    )? {
        let rows: Vec<Vec<String>> = data
            .savings_goals()
            .iter()
            .map(|g| {
                let progress = if g.target_amount > Decimal::ZERO {
                    (g.current_amount / g.target_amount * Decimal::from(100))
                        .min(Decimal::from(100))
                } else {
                    Decimal::ZERO
                };
                vec![
                    g.title.clone(),
                    fmt_money(&g.current_amount),
                    fmt_money(&g.target_amount),
                    format!("{:.0}%", progress),
                    g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                    g.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Title", "Saved", "Target", "Progress", "Deadline", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn update(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let changes = SavingsGoalUpdate {
        title: sub.get_one::<String>("title").map(|s| s.trim().to_string()),
        target_amount: sub
            .get_one::<String>("target")
            .map(|s| parse_decimal(s))
            .transpose()?
            .map(|d| d.abs()),
        deadline: sub
            .get_one::<String>("deadline")
            .map(|d| parse_date(d))
            .transpose()?,
        color: sub.get_one::<String>("color").cloned(),
        icon: sub.get_one::<String>("icon").cloned(),
    };
    data.update_savings_goal(id, changes)?;
    println!("Updated goal {}", id);
    Ok(())
}

fn contribute(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?.abs();
    data.contribute_to_goal(id, amount, today())?;
    println!("Added {} to goal {}", fmt_money(&amount), id);
    Ok(())
}

fn rm(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    data.delete_savings_goal(id)?;
    println!("Removed goal {}", id);
    Ok(())
}
