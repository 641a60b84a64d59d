use serde::Serialize;

use crate::game::{Game, Player, PlayerId, player_name};

/// One line of a final ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub score: i32,
}

/// What gets announced when a game ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub game_name: String,
    /// Every player sharing the top score
    pub winners: Vec<String>,
    pub ranking: Vec<RankedPlayer>,
}

impl Game {
    /// Players by total, highest first. Equal totals keep scorecard order.
    pub fn ranking(&self, players: &[Player]) -> Vec<RankedPlayer> {
        let mut ranking: Vec<RankedPlayer> = self
            .totals()
            .into_iter()
            .map(|(player_id, score)| RankedPlayer {
                player_id,
                name: player_name(players, player_id),
                score,
            })
            .collect();
        ranking.sort_by(|a, b| b.score.cmp(&a.score));
        ranking
    }

    /// Final result, available once the game is completed
    pub fn outcome(&self, players: &[Player]) -> Option<GameOutcome> {
        if !self.is_completed() {
            return None;
        }
        let winners = self
            .winners()
            .into_iter()
            .map(|id| player_name(players, id))
            .collect();
        Some(GameOutcome {
            game_name: self.name.clone(),
            winners,
            ranking: self.ranking(players),
        })
    }
}
