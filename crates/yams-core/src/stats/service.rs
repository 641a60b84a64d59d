//! Per-player and app-wide statistics over the game history.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::game::{Game, Player, PlayerId, player_name};
use crate::rules::CellKey;

/// Derived statistics for one player. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub name: String,
    pub games_played: usize,
    pub wins: usize,
    pub average: f64,
    pub best: Option<i32>,
    pub worst: Option<i32>,
    /// Fraction of games with a scored yams in the first column
    pub yams_rate: f64,
    /// Totals in chronological order
    pub score_history: Vec<i32>,
}

impl PlayerStats {
    fn empty(player: &Player) -> Self {
        Self {
            player_id: player.id,
            name: player.name.clone(),
            games_played: 0,
            wins: 0,
            average: 0.0,
            best: None,
            worst: None,
            yams_rate: 0.0,
            score_history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestScore {
    pub player_id: PlayerId,
    pub name: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub best: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostWins {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: usize,
}

/// App-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStats {
    pub total_players: usize,
    pub total_games: usize,
    pub completed_games: usize,
    pub best_score_ever: Option<BestScore>,
    /// Personal bests, highest first
    pub leaderboard: Vec<LeaderboardEntry>,
    pub most_wins: Option<MostWins>,
}

/// Stateless aggregation. Every call recomputes from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsService;

#[derive(Default)]
struct Tally {
    scores: Vec<i32>,
    wins: usize,
    yams_games: usize,
}

impl StatsService {
    /// Aggregate completed games only; running and paused games are ignored.
    pub fn compute(players: &[Player], games: &[Game]) -> (Vec<PlayerStats>, AppStats) {
        let mut completed: Vec<&Game> = games.iter().filter(|g| g.is_completed()).collect();
        completed.sort_by_key(|g| g.last_activity());

        let mut tallies: HashMap<PlayerId, Tally> = HashMap::new();
        let mut best_score_ever: Option<(PlayerId, i32)> = None;

        for game in &completed {
            for (player_id, total) in game.totals() {
                let tally = tallies.entry(player_id).or_default();
                tally.scores.push(total);
                let yams = game
                    .scorecard(player_id)
                    .map(|c| c.value(CellKey::Yams, 0))
                    .unwrap_or(0);
                if yams > 0 {
                    tally.yams_games += 1;
                }
                if best_score_ever.is_none_or(|(_, best)| total > best) {
                    best_score_ever = Some((player_id, total));
                }
            }
            for winner in game.winners() {
                tallies.entry(winner).or_default().wins += 1;
            }
        }

        let player_stats: Vec<PlayerStats> = players
            .iter()
            .map(|player| match tallies.get(&player.id) {
                Some(tally) => player_stats(player, tally),
                None => PlayerStats::empty(player),
            })
            .collect();

        let mut leaderboard: Vec<LeaderboardEntry> = player_stats
            .iter()
            .filter_map(|s| {
                s.best.map(|best| LeaderboardEntry {
                    player_id: s.player_id,
                    name: s.name.clone(),
                    best,
                })
            })
            .collect();
        leaderboard.sort_by(|a, b| b.best.cmp(&a.best));

        let mut most_wins: Option<MostWins> = None;
        for stats in &player_stats {
            let better = match &most_wins {
                Some(current) => stats.wins > current.wins,
                None => stats.wins > 0,
            };
            if better {
                most_wins = Some(MostWins {
                    player_id: stats.player_id,
                    name: stats.name.clone(),
                    wins: stats.wins,
                });
            }
        }

        let app = AppStats {
            total_players: players.len(),
            total_games: games.len(),
            completed_games: completed.len(),
            best_score_ever: best_score_ever.map(|(player_id, score)| BestScore {
                player_id,
                name: player_name(players, player_id),
                score,
            }),
            leaderboard,
            most_wins,
        };

        debug!(
            "Aggregated {} completed games for {} players",
            app.completed_games, app.total_players
        );
        (player_stats, app)
    }
}

fn player_stats(player: &Player, tally: &Tally) -> PlayerStats {
    let played = tally.scores.len();
    let sum: i64 = tally.scores.iter().map(|&s| i64::from(s)).sum();
    let (average, yams_rate) = if played == 0 {
        (0.0, 0.0)
    } else {
        (
            sum as f64 / played as f64,
            tally.yams_games as f64 / played as f64,
        )
    };

    PlayerStats {
        player_id: player.id,
        name: player.name.clone(),
        games_played: played,
        wins: tally.wins,
        average,
        best: tally.scores.iter().copied().max(),
        worst: tally.scores.iter().copied().min(),
        yams_rate,
        score_history: tally.scores.clone(),
    }
}
