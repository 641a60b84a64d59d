//! Watch mode: reload the history when it changes and reprint the
//! leaderboard after every stats publication.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use tracing::{debug, info, warn};
use yams_core::export::format_leaderboard;
use yams_core::{CancelSignal, History, RefreshOutcome, StatsStore, YamsConfig};

fn modified(config: &YamsConfig) -> Option<SystemTime> {
    fs::metadata(&config.history_path)
        .and_then(|m| m.modified())
        .ok()
}

pub fn run(config: &YamsConfig, interval_ms: u64) -> Result<()> {
    let shutdown = Arc::new(CancelSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        shutdown_ctrlc.cancel();
    })?;

    let store = StatsStore::from_config(config);
    let published = store.subscribe();
    let interval = Duration::from_millis(interval_ms.max(1));
    let mut last_seen: Option<Option<SystemTime>> = None;

    println!(
        "Watching {} (Ctrl+C to quit)",
        config.history_path.display()
    );

    while !shutdown.is_cancelled() {
        let stamp = modified(config);
        if last_seen != Some(stamp) {
            last_seen = Some(stamp);
            match History::load_or_default(&config.history_path) {
                Ok(history) => {
                    if store.refresh(&history.players, &history.games) == RefreshOutcome::Skipped {
                        debug!("History touched but stats inputs unchanged");
                    }
                }
                Err(e) => warn!("Failed to reload history: {}", e),
            }
        }

        for snapshot in published.try_iter() {
            println!();
            println!("{}", format_leaderboard(&snapshot.app));
        }

        if shutdown.wait(interval) {
            break;
        }
    }

    store.cancel();
    store.wait_idle();
    Ok(())
}
