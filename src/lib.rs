// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod util;

use anyhow::{Context, Result};
use application::{CardNotifier, Notifier, RunOutcome};
use infrastructure::{AnkiConnectClient, Config, DryRunNotifier, PushPlusClient};
use std::time::Duration;
use tracing::{debug, info};

use crate::cli::args::Args;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting ankinotify with arguments");

    let config_path = Config::locate(args.config.as_deref())?;
    let config = Config::load(&config_path)?;
    info!(?config_path, deck = %config.anki.deck, "Using config");

    let outcome = notify_random_card(&config, args.dry_run)?;
    debug!(?outcome, "Run finished");
    Ok(())
}

/// One full run against the configured services.
///
/// Only client construction can fail here; everything after that is folded
/// into the returned outcome.
pub fn notify_random_card(config: &Config, dry_run: bool) -> Result<RunOutcome> {
    let source = AnkiConnectClient::new(
        &config.anki.url,
        config.anki.timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to build AnkiConnect client")?;

    if dry_run {
        return Ok(run_with(source, DryRunNotifier, config));
    }

    let notifier = PushPlusClient::new(
        &config.pushplus.url,
        config.pushplus.timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to build PushPlus client")?;
    Ok(run_with(source, notifier, config))
}

fn run_with<N: Notifier>(source: AnkiConnectClient, notifier: N, config: &Config) -> RunOutcome {
    let mut card_notifier =
        CardNotifier::new(source, notifier, rand::thread_rng(), config.run_options());
    card_notifier.run()
}
