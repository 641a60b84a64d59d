//! Statistics command.

use anyhow::Result;
use yams_core::export::{format_leaderboard, generate_stats_json};
use yams_core::{StatsService, YamsConfig};

use super::load_history;

pub fn run(config: &YamsConfig, json: bool) -> Result<()> {
    let history = load_history(config)?;
    let (players, app) = StatsService::compute(&history.players, &history.games);

    if json {
        println!("{}", generate_stats_json(&players, &app, chrono::Utc::now())?);
        return Ok(());
    }

    println!("{}", format_leaderboard(&app));
    if players.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "{:<20} {:>5} {:>5} {:>8} {:>5} {:>5} {:>6}",
        "player", "games", "wins", "average", "best", "worst", "yams"
    );
    for stats in &players {
        let best = stats.best.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        let worst = stats.worst.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:>5} {:>5} {:>8.1} {:>5} {:>5} {:>5.0}%",
            stats.name,
            stats.games_played,
            stats.wins,
            stats.average,
            best,
            worst,
            stats.yams_rate * 100.0
        );
    }
    Ok(())
}
