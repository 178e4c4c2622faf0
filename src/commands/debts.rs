// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::sync::FinanceData;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, today};

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(data, sub)?,
        Some(("pay", sub)) => pay(data, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data.debts())? {
        let rows: Vec<Vec<String>> = data
            .debts()
            .iter()
            .map(|d| {
                vec![
                    d.label.clone(),
                    fmt_money(&d.total),
                    fmt_money(&d.paid),
                    fmt_money(&d.remaining()),
                    d.due_date.to_string(),
                    if d.is_overdue { "yes" } else { "" }.to_string(),
                    d.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Label", "Total", "Paid", "Remaining", "Due", "Overdue", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn pay(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?.abs();
    data.pay_debt(id, amount, today())?;
    println!("Paid {} toward debt {}", fmt_money(&amount), id);
    Ok(())
}
