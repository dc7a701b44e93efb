//! Remote vault sync command implementations

use std::path::Path;

use anyhow::{Context, Result};
use kharch_core::{SyncClient, Syncer};

use super::{load_ledger, open_vault};

fn open_syncer(data_dir: Option<&Path>) -> Result<(Syncer, kharch_core::FileVault)> {
    let vault = open_vault(data_dir)?;
    let client = SyncClient::from_env();
    Ok((Syncer::new(client, vault.clone()), vault))
}

pub async fn cmd_sync_login(data_dir: Option<&Path>, email: &str) -> Result<()> {
    anyhow::ensure!(!email.trim().is_empty(), "Email cannot be empty");

    let (syncer, vault) = open_syncer(data_dir)?;
    let mut ledger = load_ledger(&vault)?;

    println!("🔄 Logging in as {}...", email.trim());

    let remote = syncer
        .login(email, &ledger.snapshot())
        .await
        .context("Sync login failed")?;

    match remote {
        Some(snapshot) => {
            let expenses = snapshot.expenses.len();
            ledger.restore(snapshot);
            ledger.persist(&vault)?;
            println!("✅ Logged in. Adopted remote vault ({} expenses).", expenses);
        }
        None => {
            println!("✅ Logged in. Created a remote vault from local data.");
        }
    }

    Ok(())
}

pub fn cmd_sync_logout(data_dir: Option<&Path>) -> Result<()> {
    let (syncer, _vault) = open_syncer(data_dir)?;

    if !syncer.is_logged_in()? {
        println!("Not logged in.");
        return Ok(());
    }

    syncer.logout().context("Sync logout failed")?;
    println!("✅ Logged out. Local data is kept.");

    Ok(())
}

pub async fn cmd_sync_push(data_dir: Option<&Path>) -> Result<()> {
    let (syncer, vault) = open_syncer(data_dir)?;
    anyhow::ensure!(
        syncer.is_logged_in()?,
        "Not logged in. Run: kharch sync login <email>"
    );

    let ledger = load_ledger(&vault)?;
    println!("🔄 Pushing local snapshot...");
    syncer
        .push_snapshot(&ledger.snapshot())
        .await
        .context("Push to remote vault failed")?;
    println!("✅ Pushed {} expenses.", ledger.expenses().len());

    Ok(())
}

pub async fn cmd_sync_pull(data_dir: Option<&Path>) -> Result<()> {
    let (syncer, vault) = open_syncer(data_dir)?;
    anyhow::ensure!(
        syncer.is_logged_in()?,
        "Not logged in. Run: kharch sync login <email>"
    );

    println!("🔄 Pulling remote snapshot...");
    let remote = syncer
        .pull_snapshot()
        .await
        .context("Pull from remote vault failed")?;

    match remote {
        Some(snapshot) => {
            let expenses = snapshot.expenses.len();
            let mut ledger = load_ledger(&vault)?;
            ledger.restore(snapshot);
            ledger.persist(&vault)?;
            println!("✅ Restored remote snapshot ({} expenses).", expenses);
        }
        None => {
            println!("Remote vault is empty (nothing to restore).");
        }
    }

    Ok(())
}

pub fn cmd_sync_status(data_dir: Option<&Path>) -> Result<()> {
    let (syncer, _vault) = open_syncer(data_dir)?;

    match syncer.email()? {
        Some(email) => {
            println!("Logged in as: {}", email);
            if let Some(id) = syncer.sync_id()? {
                println!("Vault key:    {}", id);
            }
            match syncer.remote_id()? {
                Some(remote) => println!("Remote vault: {}", remote),
                None => println!("Remote vault: not created yet (push to create)"),
            }
        }
        None => {
            println!("Not logged in. Run: kharch sync login <email>");
        }
    }

    Ok(())
}
