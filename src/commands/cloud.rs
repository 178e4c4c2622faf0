// Copyright (c) 2026 Fluxbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::remote::{self, Session, SupabaseRemote};
use crate::sync::FinanceData;

pub fn handle(data: &mut FinanceData, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(data, sub)?,
        Some(("logout", _)) => logout(data)?,
        Some(("status", _)) => status(data)?,
        Some(("pull", _)) => pull(data)?,
        _ => {}
    }
    Ok(())
}

fn login(data: &mut FinanceData, sub: &clap::ArgMatches) -> Result<()> {
    let session = Session {
        base_url: sub.get_one::<String>("url").unwrap().trim().to_string(),
        api_key: sub.get_one::<String>("api-key").unwrap().trim().to_string(),
        access_token: sub.get_one::<String>("token").unwrap().trim().to_string(),
        user_id: sub.get_one::<String>("user-id").unwrap().trim().to_string(),
    };
    remote::save_session(data.store(), &session)?;
    let client = SupabaseRemote::connect(session)?;
    data.attach_remote(Box::new(client));
    data.refresh_from_remote();
    println!(
        "Signed in as {}; {} transaction(s) synced",
        data.user_id().unwrap_or("?"),
        data.transactions().len()
    );
    Ok(())
}

fn logout(data: &mut FinanceData) -> Result<()> {
    remote::clear_session(data.store())?;
    data.detach_remote();
    println!("Signed out; the local snapshot remains on this machine");
    Ok(())
}

fn status(data: &FinanceData) -> Result<()> {
    match remote::load_session(data.store())? {
        Some(s) => println!("Signed in as {} ({})", s.user_id, s.base_url),
        None => println!("Offline: using the local snapshot only"),
    }
    Ok(())
}

fn pull(data: &mut FinanceData) -> Result<()> {
    if !data.online() {
        return Err(anyhow!("No session; run `fluxbook cloud login` first"));
    }
    data.refresh_from_remote();
    println!(
        "Pulled {} transaction(s), {} debt(s), {} schedule(s), {} budget(s), {} goal(s)",
        data.transactions().len(),
        data.debts().len(),
        data.recurring().len(),
        data.budgets().len(),
        data.savings_goals().len()
    );
    Ok(())
}
