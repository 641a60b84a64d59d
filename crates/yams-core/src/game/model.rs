use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::error::{Error, Result};
use crate::game::{PlayerId, Scorecard};
use crate::rules::{Notation, NotationSnapshot};
use crate::score;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    #[strum(serialize = "in progress")]
    InProgress,
    #[strum(serialize = "paused")]
    Paused,
    #[strum(serialize = "completed")]
    Completed,
}

/// A game and everything needed to score it later.
///
/// The notation is frozen at creation; editing the source notation
/// afterwards never changes this game's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u32,
    pub name: String,
    pub snapshot: NotationSnapshot,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub turn_order: Vec<PlayerId>,
    #[serde(default)]
    pub current_turn_index: usize,
    /// Players allowed in the turn order
    #[serde(default)]
    pub participant_ids: Vec<PlayerId>,
    /// Filled-cell count per player at the start of their current turn
    #[serde(default)]
    pub last_filled_count_by_player: HashMap<PlayerId, usize>,
    #[serde(default)]
    pub scorecards: Vec<Scorecard>,
}

impl Game {
    /// New in-progress game with no participants yet
    pub fn new(id: u32, name: impl Into<String>, notation: &Notation, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            snapshot: notation.snapshot(),
            created_at: now,
            started_at: None,
            ended_at: None,
            comment: String::new(),
            status: GameStatus::InProgress,
            turn_order: Vec::new(),
            current_turn_index: 0,
            participant_ids: Vec::new(),
            last_filled_count_by_player: HashMap::new(),
            scorecards: Vec::new(),
        }
    }

    /// New game with a scorecard attached for each participant
    pub fn with_participants(
        id: u32,
        name: impl Into<String>,
        notation: &Notation,
        participants: &[PlayerId],
        columns: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let mut game = Self::new(id, name, notation, now);
        for &player_id in participants {
            game.add_participant(player_id, columns);
        }
        game
    }

    /// Register a participant and attach an empty scorecard. No-op if present.
    pub fn add_participant(&mut self, player_id: PlayerId, columns: usize) {
        if self.participant_ids.contains(&player_id) {
            return;
        }
        self.participant_ids.push(player_id);
        self.scorecards.push(Scorecard::new(player_id, columns));
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub fn scorecard(&self, player_id: PlayerId) -> Option<&Scorecard> {
        self.scorecards.iter().find(|c| c.player_id == player_id)
    }

    pub fn scorecard_mut(&mut self, player_id: PlayerId) -> Option<&mut Scorecard> {
        self.scorecards.iter_mut().find(|c| c.player_id == player_id)
    }

    /// Scoring columns per scorecard
    pub fn columns(&self) -> usize {
        self.scorecards.first().map(|c| c.columns()).unwrap_or(1)
    }

    /// Cells a player must fill for the game to complete
    pub fn required_cells_per_player(&self) -> usize {
        self.snapshot.required_keys.len() * self.columns()
    }

    /// Required cells a player has filled so far
    pub fn filled_count(&self, player_id: PlayerId) -> usize {
        self.scorecard(player_id)
            .map(|c| c.filled_count(&self.snapshot.required_keys))
            .unwrap_or(0)
    }

    /// Every scorecard must be well formed and share the same column count.
    pub fn check_shape(&self) -> Result<()> {
        let expected = self.columns();
        for card in &self.scorecards {
            card.check_shape()?;
            if card.columns() != expected {
                return Err(Error::ShapeMismatch {
                    field: format!("game {} scorecard {}", self.id, card.player_id),
                    expected,
                    actual: card.columns(),
                });
            }
        }
        Ok(())
    }

    /// Grand total for a player, using the frozen snapshot and the ace
    /// counts recorded on the scorecard
    pub fn total_for(&self, player_id: PlayerId) -> Option<i32> {
        self.scorecard(player_id)
            .map(|c| score::scorecard_total(c, &self.snapshot, None))
    }

    /// (player, total) for every scorecard, in scorecard order
    pub fn totals(&self) -> Vec<(PlayerId, i32)> {
        self.scorecards
            .iter()
            .map(|c| (c.player_id, score::scorecard_total(c, &self.snapshot, None)))
            .collect()
    }

    /// Players sharing the highest total. Empty when there are no scorecards.
    pub fn winners(&self) -> Vec<PlayerId> {
        let totals = self.totals();
        let Some(best) = totals.iter().map(|&(_, t)| t).max() else {
            return Vec::new();
        };
        totals
            .into_iter()
            .filter(|&(_, t)| t == best)
            .map(|(id, _)| id)
            .collect()
    }

    /// Most recent lifecycle timestamp
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.ended_at
            .or(self.started_at)
            .unwrap_or(self.created_at)
    }
}
