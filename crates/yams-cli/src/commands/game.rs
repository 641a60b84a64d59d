//! Game listing and detail command.

use anyhow::Result;
use yams_core::export::format_game_summary;
use yams_core::score::column_totals;
use yams_core::{YamsConfig, player_name};

use super::load_history;

pub fn run(config: &YamsConfig, id: Option<u32>) -> Result<()> {
    let history = load_history(config)?;

    let Some(id) = id else {
        if history.games.is_empty() {
            println!("No games in {}", config.history_path.display());
        }
        for game in &history.games {
            println!(
                "#{:<4} {:<24} {:<12} {:<12} {}",
                game.id,
                game.name,
                game.status.to_string(),
                game.snapshot.name,
                game.last_activity().format("%Y-%m-%d %H:%M")
            );
        }
        return Ok(());
    };

    let game = history.game(id)?;
    println!("{}", format_game_summary(game, &history.players));

    for card in &game.scorecards {
        println!();
        println!("{}", player_name(&history.players, card.player_id));
        for column in 0..card.columns() {
            let totals = column_totals(card, column, &game.snapshot, None);
            println!(
                "  column {}: upper {} (bonus {}), middle {}, bottom {}, straights {}/{}, extra {} = {}",
                column + 1,
                totals.upper,
                totals.upper_bonus,
                totals.middle,
                totals.bottom,
                totals.small_straight,
                totals.big_straight,
                totals.extra_yams_bonus,
                totals.total
            );
        }
        println!(
            "  filled {}/{}",
            game.filled_count(card.player_id),
            game.required_cells_per_player()
        );
    }

    if let Some(outcome) = game.outcome(&history.players) {
        println!();
        println!("Winner: {}", outcome.winners.join(", "));
    }
    Ok(())
}
