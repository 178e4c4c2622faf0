// Copyright (c) Fluxbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};

use crate::sync::FinanceData;

pub fn handle(data: &FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(data, sub),
        _ => Ok(()),
    }
}

fn export_transactions(data: &FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path");
    let out: Box<dyn Write> = match path {
        Some(p) => Box::new(File::create(p).with_context(|| format!("Create {}", p))?),
        None => Box::new(io::stdout()),
    };

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["id", "date", "title", "amount", "type", "category"])?;
    for t in data.transactions() {
        wtr.write_record([
            t.id.as_str(),
            &t.date.to_string(),
            &t.title,
            &t.amount.to_string(),
            t.kind.as_str(),
            &t.category,
        ])?;
    }
    wtr.flush()?;

    if let Some(p) = path {
        println!("Exported {} transaction(s) to {}", data.transactions().len(), p);
    }
    Ok(())
}
