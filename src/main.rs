// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use fluxbook::{cli, commands, recurrence, remote, store, sync, utils};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fluxbook=warn")),
        )
        .with_target(false)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let local = store::LocalStore::open_default()?;
    let remote_client = match remote::load_session(&local)? {
        Some(session) => Some(Box::new(remote::SupabaseRemote::connect(session)?)
            as Box<dyn remote::RemoteBackend>),
        None => None,
    };
    let mut data = sync::FinanceData::load(local, remote_client)?;

    // Session-load sequence: pull the authoritative cloud state, then catch
    // up scheduled flows before handling the command.
    data.refresh_from_remote();
    recurrence::process_due(&mut data, utils::today());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store initialized at {}", store::store_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut data, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&mut data, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut data, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut data, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut data, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut data, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&data, sub)?,
        Some(("report", sub)) => commands::reports::handle(&data, sub)?,
        Some(("cloud", sub)) => commands::cloud::handle(&mut data, sub)?,
        Some(("whatsnew", sub)) => commands::whatsnew::handle(&data, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
