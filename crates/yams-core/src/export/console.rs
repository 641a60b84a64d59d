//! Colored console output

use owo_colors::OwoColorize;

use crate::game::{Game, Player};
use crate::stats::AppStats;

/// Leaderboard by personal best, with the record holders underneath.
pub fn format_leaderboard(app: &AppStats) -> String {
    let mut lines = vec![format!(
        "{} ({} players, {}/{} games completed)",
        "Leaderboard".bold(),
        app.total_players,
        app.completed_games,
        app.total_games
    )];

    if app.leaderboard.is_empty() {
        lines.push(format!("  {}", "no completed games".dimmed()));
        return lines.join("\n");
    }

    for (rank, entry) in app.leaderboard.iter().enumerate() {
        let line = format!("{:>3}. {:<20} {:>5}", rank + 1, entry.name, entry.best);
        lines.push(if rank == 0 {
            line.yellow().to_string()
        } else {
            line
        });
    }

    if let Some(best) = &app.best_score_ever {
        lines.push(format!(
            "Best score ever: {} by {}",
            best.score.green(),
            best.name
        ));
    }
    if let Some(most) = &app.most_wins {
        lines.push(format!("Most wins: {} ({})", most.name, most.wins.cyan()));
    }
    lines.join("\n")
}

/// One game: status, then every player's total, highest first.
pub fn format_game_summary(game: &Game, players: &[Player]) -> String {
    let mut lines = vec![format!(
        "#{} {} [{}] ({})",
        game.id,
        game.name.bold(),
        game.status,
        game.snapshot.name
    )];

    let winners = if game.is_completed() {
        game.winners()
    } else {
        Vec::new()
    };
    for ranked in game.ranking(players) {
        let line = format!("  {:<20} {:>5}", ranked.name, ranked.score);
        lines.push(if winners.contains(&ranked.player_id) {
            line.green().to_string()
        } else {
            line
        });
    }

    if let Some(active) = game.active_player_id() {
        lines.push(format!(
            "  turn: {}",
            crate::game::player_name(players, active).cyan()
        ));
    }
    if !game.comment.is_empty() {
        lines.push(format!("  {}", game.comment.dimmed()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CellKey, Notation};
    use crate::stats::{BestScore, LeaderboardEntry};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_leaderboard_lists_players_in_order() {
        let app = AppStats {
            total_players: 2,
            total_games: 3,
            completed_games: 2,
            best_score_ever: Some(BestScore {
                player_id: 1,
                name: "Ana".to_string(),
                score: 240,
            }),
            leaderboard: vec![
                LeaderboardEntry {
                    player_id: 1,
                    name: "Ana".to_string(),
                    best: 240,
                },
                LeaderboardEntry {
                    player_id: 2,
                    name: "Bo".to_string(),
                    best: 199,
                },
            ],
            most_wins: None,
        };
        let text = format_leaderboard(&app);
        let ana = text.find("Ana").unwrap();
        let bo = text.find("Bo").unwrap();
        assert!(ana < bo);
        assert!(text.contains("2/3 games completed"));
        assert!(!text.contains("Most wins"));
    }

    #[test]
    fn test_empty_leaderboard() {
        let text = format_leaderboard(&AppStats::default());
        assert!(text.contains("no completed games"));
    }

    #[test]
    fn test_game_summary() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
        let mut game = Game::with_participants(2, "Friday", &Notation::default(), &[1, 2], 1, now);
        game.scorecard_mut(2).unwrap().set_value(CellKey::Chance, 0, 24);
        game.set_turn_order(&[1, 2], now);

        let players = vec![Player::new(1, "Ana"), Player::new(2, "Bo")];
        let text = format_game_summary(&game, &players);
        assert!(text.contains("in progress"));
        assert!(text.contains("classic"));
        assert!(text.find("Bo").unwrap() < text.find("Ana").unwrap());
        assert!(text.contains("turn:"));
    }
}
