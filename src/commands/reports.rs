// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::charts::{category_breakdown, daily_series, monthly_series};
use crate::health;
use crate::sync::FinanceData;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(data: &FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(data, sub)?,
        Some(("daily", sub)) => daily(data, sub)?,
        Some(("categories", sub)) => categories(data, sub)?,
        Some(("monthly", sub)) => monthly(data, sub)?,
        Some(("health", sub)) => health_report(data, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let stats = data.stats();
    let verdict = health::assess(stats.income, stats.expenses, stats.total_debt, stats.balance);

    let combined = serde_json::json!({ "stats": stats, "health": verdict });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &combined)? {
        let rows = vec![vec![
            fmt_money(&stats.balance),
            fmt_money(&stats.income),
            fmt_money(&stats.expenses),
            fmt_money(&stats.total_debt),
        ]];
        println!(
            "{}",
            pretty_table(&["Balance", "Income", "Expenses", "Outstanding Debt"], rows)
        );
        println!(
            "Health: {} ({}/100) - {}",
            verdict.status.label(),
            verdict.score,
            verdict.insight
        );
    }
    Ok(())
}

fn daily(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let series = daily_series(data.transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        let rows: Vec<Vec<String>> = series
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    fmt_money(&p.income),
                    fmt_money(&p.expenses),
                    fmt_money(&p.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expenses", "Balance"], rows)
        );
    }
    Ok(())
}

fn categories(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let slices = category_breakdown(data.transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slices)? {
        let rows: Vec<Vec<String>> = slices
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_money(&s.amount),
                    format!("{:.1}%", s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn monthly(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let series = monthly_series(data.transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        let rows: Vec<Vec<String>> = series
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    fmt_money(&p.income),
                    fmt_money(&p.expenses),
                    fmt_money(&p.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn health_report(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let stats = data.stats();
    let verdict = health::assess(stats.income, stats.expenses, stats.total_debt, stats.balance);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &verdict)? {
        println!("{} ({}/100)", verdict.status.label(), verdict.score);
        println!("{}", verdict.insight);
    }
    Ok(())
}
