//! Turn order and game lifecycle.
//!
//! Invalid requests (unknown player, empty order, wrong state) are silent
//! no-ops; callers check `active_player_id` or the returned flag instead of
//! handling errors.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::game::{Game, GameStatus, PlayerId};

impl Game {
    /// Replace the turn order and restart from its first player.
    ///
    /// Ids outside `participant_ids` (when that list is non-empty) and
    /// duplicates are dropped. Completed games are left as they are.
    pub fn set_turn_order(&mut self, ids: &[PlayerId], now: DateTime<Utc>) {
        if self.status == GameStatus::Completed {
            debug!("Game {} is completed, turn order unchanged", self.id);
            return;
        }

        let mut order = Vec::with_capacity(ids.len());
        for &id in ids {
            let allowed = self.participant_ids.is_empty() || self.participant_ids.contains(&id);
            if allowed && !order.contains(&id) {
                order.push(id);
            }
        }

        debug!("Game {} turn order: {:?}", self.id, order);
        self.turn_order = order;
        self.current_turn_index = 0;
        self.last_filled_count_by_player.clear();
        self.status = GameStatus::InProgress;
        self.started_at = Some(now);
        self.ended_at = None;
    }

    /// Player whose turn it is, if the game is running
    pub fn active_player_id(&self) -> Option<PlayerId> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        self.turn_order.get(self.current_turn_index).copied()
    }

    /// Record the filled-cell count at the start of `player_id`'s turn.
    /// Only the first call of a turn counts.
    pub fn begin_turn_snapshot(&mut self, player_id: PlayerId, fillable_count: usize) {
        self.last_filled_count_by_player
            .entry(player_id)
            .or_insert(fillable_count);
    }

    /// A turn may end only after exactly one new cell was filled.
    pub fn can_end_turn(&self, player_id: PlayerId, fillable_count: usize) -> bool {
        match self.last_filled_count_by_player.get(&player_id) {
            Some(&start) => fillable_count.checked_sub(start) == Some(1),
            None => false,
        }
    }

    /// Move the turn snapshot forward after a turn legitimately ended
    pub fn end_turn_commit(&mut self, player_id: PlayerId, fillable_count: usize) {
        self.last_filled_count_by_player
            .insert(player_id, fillable_count);
    }

    pub fn advance_to_next_player(&mut self) {
        if self.turn_order.is_empty() {
            return;
        }
        self.current_turn_index = (self.current_turn_index + 1) % self.turn_order.len();
    }

    /// Hand the turn to `player_id` directly, bypassing the one-cell rule.
    pub fn jump_to(&mut self, player_id: PlayerId) {
        if let Some(index) = self.turn_order.iter().position(|&id| id == player_id) {
            self.current_turn_index = index;
        }
    }

    /// End the active player's turn if the one-cell rule allows it.
    ///
    /// Returns `true` when the turn passed to the next player.
    pub fn end_turn(&mut self, player_id: PlayerId, fillable_count: usize) -> bool {
        if self.active_player_id() != Some(player_id) || !self.can_end_turn(player_id, fillable_count)
        {
            return false;
        }
        self.end_turn_commit(player_id, fillable_count);
        self.advance_to_next_player();
        true
    }

    /// Complete the game once every player in the turn order reached
    /// `required_cells_per_player`. Returns `true` on the transition only.
    pub fn complete_if_finished<F>(
        &mut self,
        required_cells_per_player: usize,
        filled_count: F,
        now: DateTime<Utc>,
    ) -> bool
    where
        F: Fn(PlayerId) -> usize,
    {
        if self.status == GameStatus::Completed || self.turn_order.is_empty() {
            return false;
        }
        let finished = self
            .turn_order
            .iter()
            .all(|&id| filled_count(id) >= required_cells_per_player);
        if !finished {
            return false;
        }

        self.status = GameStatus::Completed;
        self.ended_at = Some(now);
        info!("Game {} ({}) completed", self.id, self.name);
        true
    }

    /// Completion check against this game's own scorecards
    pub fn complete_if_all_filled(&mut self, now: DateTime<Utc>) -> bool {
        let required = self.required_cells_per_player();
        let counts: HashMap<PlayerId, usize> = self
            .turn_order
            .iter()
            .map(|&id| (id, self.filled_count(id)))
            .collect();
        self.complete_if_finished(required, |id| counts.get(&id).copied().unwrap_or(0), now)
    }

    /// Suspend a running game, keeping its position
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::InProgress;
        true
    }
}
