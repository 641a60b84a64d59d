use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::error::{Error, Result};
use crate::game::PlayerId;
use crate::rules::{CellKey, EMPTY, NotationSnapshot};
use crate::validate::{self, MiddleField, MiddlePair};

/// One player's sheet in one game.
///
/// Every field holds one slot per scoring column; index `col` refers to the
/// same column in all of them. `-1` is empty, `0` is crossed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub player_id: PlayerId,
    pub ones: Vec<i32>,
    pub twos: Vec<i32>,
    pub threes: Vec<i32>,
    pub fours: Vec<i32>,
    pub fives: Vec<i32>,
    pub sixes: Vec<i32>,
    pub max: Vec<i32>,
    pub min: Vec<i32>,
    pub brelan: Vec<i32>,
    pub chance: Vec<i32>,
    pub full: Vec<i32>,
    pub small_straight: Vec<i32>,
    pub big_straight: Vec<i32>,
    pub carre: Vec<i32>,
    pub yams: Vec<i32>,
    pub extra_yams_awarded: Vec<bool>,
    /// Confirmed cells, keyed by `"{column}.{cellKey}"`
    #[serde(default)]
    pub locks: BTreeMap<String, bool>,
    /// Aces rolled for the multiplier middle section, by column
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aces: BTreeMap<usize, i32>,
}

impl Scorecard {
    pub fn new(player_id: PlayerId, columns: usize) -> Self {
        let columns = columns.max(1);
        let empty = vec![EMPTY; columns];
        Self {
            player_id,
            ones: empty.clone(),
            twos: empty.clone(),
            threes: empty.clone(),
            fours: empty.clone(),
            fives: empty.clone(),
            sixes: empty.clone(),
            max: empty.clone(),
            min: empty.clone(),
            brelan: empty.clone(),
            chance: empty.clone(),
            full: empty.clone(),
            small_straight: empty.clone(),
            big_straight: empty.clone(),
            carre: empty.clone(),
            yams: empty,
            extra_yams_awarded: vec![false; columns],
            locks: BTreeMap::new(),
            aces: BTreeMap::new(),
        }
    }

    /// Number of scoring columns
    pub fn columns(&self) -> usize {
        self.ones.len()
    }

    pub fn field(&self, key: CellKey) -> &[i32] {
        match key {
            CellKey::Ones => &self.ones,
            CellKey::Twos => &self.twos,
            CellKey::Threes => &self.threes,
            CellKey::Fours => &self.fours,
            CellKey::Fives => &self.fives,
            CellKey::Sixes => &self.sixes,
            CellKey::Max => &self.max,
            CellKey::Min => &self.min,
            CellKey::Brelan => &self.brelan,
            CellKey::Chance => &self.chance,
            CellKey::Full => &self.full,
            CellKey::SmallStraight => &self.small_straight,
            CellKey::BigStraight => &self.big_straight,
            CellKey::Carre => &self.carre,
            CellKey::Yams => &self.yams,
        }
    }

    pub fn field_mut(&mut self, key: CellKey) -> &mut Vec<i32> {
        match key {
            CellKey::Ones => &mut self.ones,
            CellKey::Twos => &mut self.twos,
            CellKey::Threes => &mut self.threes,
            CellKey::Fours => &mut self.fours,
            CellKey::Fives => &mut self.fives,
            CellKey::Sixes => &mut self.sixes,
            CellKey::Max => &mut self.max,
            CellKey::Min => &mut self.min,
            CellKey::Brelan => &mut self.brelan,
            CellKey::Chance => &mut self.chance,
            CellKey::Full => &mut self.full,
            CellKey::SmallStraight => &mut self.small_straight,
            CellKey::BigStraight => &mut self.big_straight,
            CellKey::Carre => &mut self.carre,
            CellKey::Yams => &mut self.yams,
        }
    }

    /// Stored value, or empty for an unknown column
    pub fn value(&self, key: CellKey, column: usize) -> i32 {
        self.field(key).get(column).copied().unwrap_or(EMPTY)
    }

    pub fn set_value(&mut self, key: CellKey, column: usize, value: i32) {
        if let Some(slot) = self.field_mut(key).get_mut(column) {
            *slot = value;
        }
    }

    pub fn is_filled(&self, key: CellKey, column: usize) -> bool {
        self.value(key, column) != EMPTY
    }

    pub fn extra_yams_awarded(&self, column: usize) -> bool {
        self.extra_yams_awarded.get(column).copied().unwrap_or(false)
    }

    pub fn set_extra_yams_awarded(&mut self, column: usize, awarded: bool) {
        if let Some(slot) = self.extra_yams_awarded.get_mut(column) {
            *slot = awarded;
        }
    }

    /// Grant the repeated-yams bonus for a column that already holds a yams.
    pub fn award_extra_yams(&mut self, column: usize, snapshot: &NotationSnapshot) -> bool {
        if !snapshot.extra_yams_bonus_enabled || self.value(CellKey::Yams, column) <= 0 {
            return false;
        }
        if self.extra_yams_awarded(column) || column >= self.columns() {
            return false;
        }
        self.set_extra_yams_awarded(column, true);
        true
    }

    pub fn aces(&self, column: usize) -> Option<i32> {
        self.aces.get(&column).copied()
    }

    /// Record (or clear with `None`) the ace count of a column.
    pub fn set_aces(&mut self, column: usize, aces: Option<i32>) {
        if column >= self.columns() {
            return;
        }
        match aces {
            Some(count) => self.aces.insert(column, count.max(0)),
            None => self.aces.remove(&column),
        };
    }

    pub fn is_locked(&self, key: CellKey, column: usize) -> bool {
        self.locks
            .get(&key.lock_key(column))
            .copied()
            .unwrap_or(false)
    }

    pub fn lock(&mut self, key: CellKey, column: usize) {
        self.locks.insert(key.lock_key(column), true);
    }

    pub fn unlock(&mut self, key: CellKey, column: usize) {
        self.locks.remove(&key.lock_key(column));
    }

    /// Filled cells among `keys`, across every column
    pub fn filled_count(&self, keys: &[CellKey]) -> usize {
        (0..self.columns())
            .map(|col| keys.iter().filter(|&&k| self.is_filled(k, col)).count())
            .sum()
    }

    /// Validate and store a raw entry, returning the stored value.
    ///
    /// Locked cells are left untouched. A max/min edit that would have to
    /// nudge a locked counterpart is refused as well.
    pub fn commit(
        &mut self,
        key: CellKey,
        column: usize,
        raw: Option<i32>,
        snapshot: &NotationSnapshot,
    ) -> i32 {
        if column >= self.columns() {
            return EMPTY;
        }
        if self.is_locked(key, column) {
            debug!("Cell {} is locked, ignoring entry", key.lock_key(column));
            return self.value(key, column);
        }

        if key.is_middle() {
            return self.commit_middle(key, column, raw, snapshot);
        }

        let stored = if let Some(face) = key.face() {
            validate::upper(raw, face)
        } else if let Some(figure) = key.figure() {
            validate::figure(raw, figure, snapshot)
        } else {
            EMPTY
        };
        self.set_value(key, column, stored);
        stored
    }

    fn commit_middle(
        &mut self,
        key: CellKey,
        column: usize,
        raw: Option<i32>,
        snapshot: &NotationSnapshot,
    ) -> i32 {
        let (field, counterpart) = if key == CellKey::Max {
            (MiddleField::Max, CellKey::Min)
        } else {
            (MiddleField::Min, CellKey::Max)
        };
        let current = MiddlePair::new(
            self.value(CellKey::Max, column),
            self.value(CellKey::Min, column),
        );
        let pair = validate::middle(raw, field, current, snapshot.middle_mode);

        let (edited, other) = match field {
            MiddleField::Max => (pair.max, pair.min),
            MiddleField::Min => (pair.min, pair.max),
        };
        if other != self.value(counterpart, column) && self.is_locked(counterpart, column) {
            debug!(
                "Entry for {} would change locked {}, ignoring",
                key.lock_key(column),
                counterpart.lock_key(column)
            );
            return self.value(key, column);
        }

        self.set_value(CellKey::Max, column, pair.max);
        self.set_value(CellKey::Min, column, pair.min);
        edited
    }

    /// Check that there is at least one column and every field has one
    /// slot per column.
    pub fn check_shape(&self) -> Result<()> {
        let expected = self.columns();
        if expected == 0 {
            return Err(Error::ShapeMismatch {
                field: CellKey::Ones.name().to_string(),
                expected: 1,
                actual: 0,
            });
        }
        for key in CellKey::iter() {
            let actual = self.field(key).len();
            if actual != expected {
                return Err(Error::ShapeMismatch {
                    field: key.name().to_string(),
                    expected,
                    actual,
                });
            }
        }
        if self.extra_yams_awarded.len() != expected {
            return Err(Error::ShapeMismatch {
                field: "extraYamsAwarded".to_string(),
                expected,
                actual: self.extra_yams_awarded.len(),
            });
        }
        Ok(())
    }
}
