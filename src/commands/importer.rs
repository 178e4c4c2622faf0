// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::import::{self, ProposedTransaction};
use crate::sync::FinanceData;
use crate::utils::{fmt_money, pretty_table, today};

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(data, sub),
        _ => Ok(()),
    }
}

fn import_transactions(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut mapping = import::detect_mapping(rdr.headers()?);
    if let Some(col) = sub.get_one::<String>("date-col") {
        mapping.date = col.clone();
    }
    if let Some(col) = sub.get_one::<String>("title-col") {
        mapping.title = col.clone();
    }
    if let Some(col) = sub.get_one::<String>("amount-col") {
        mapping.amount = col.clone();
    }

    let preview = import::build_preview(
        &mut rdr,
        &mapping,
        sub.get_flag("flip-signs"),
        today(),
        data.transactions(),
    )?;
    let total = preview.len();
    let duplicates = preview.iter().filter(|p| p.duplicate).count();

    if sub.get_flag("dry-run") {
        let rows: Vec<Vec<String>> = preview
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    p.title.clone(),
                    fmt_money(&p.amount),
                    p.category.clone(),
                    if p.duplicate { "duplicate?" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Amount", "Category", ""], rows)
        );
        println!("{} row(s), {} flagged as potential duplicates", total, duplicates);
        return Ok(());
    }

    let to_import = if sub.get_flag("include-duplicates") {
        preview
            .into_iter()
            .map(ProposedTransaction::into_new)
            .collect()
    } else {
        import::selected_transactions(preview)
    };
    if to_import.is_empty() {
        println!("Nothing to import from {}", path);
        return Ok(());
    }

    let imported = data.bulk_add_transactions(to_import)?;
    println!(
        "Imported {} of {} row(s) from {} ({} skipped as duplicates)",
        imported.len(),
        total,
        path,
        total - imported.len()
    );
    Ok(())
}
