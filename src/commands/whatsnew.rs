// Copyright (c) Fluxbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::release;
use crate::sync::FinanceData;

pub fn handle(data: &FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match release::pending_release(data.store())? {
        Some(note) => {
            println!("v{} - {} ({})", note.version, note.title, note.date);
            for feature in note.features {
                println!("  * {}: {}", feature.title, feature.description);
            }
        }
        None => println!("You're up to date (v{})", release::current_version()),
    }
    if m.get_flag("ack") {
        release::acknowledge(data.store())?;
        println!("Marked v{} as seen", release::current_version());
    }
    Ok(())
}
