//! Totals computed from stored cell values and a frozen notation.
//!
//! Pure functions only: statistics recompute these for every historical
//! game, so nothing here reads or writes shared state. Rule values are user
//! data, so every sum saturates instead of overflowing.

use serde::Serialize;

use crate::game::Scorecard;
use crate::rules::{CellKey, Figure, MiddleMode, NotationSnapshot, SuiteBigMode};

/// Figures summed as the bottom section; the straights are added separately.
const BOTTOM_FIGURES: [Figure; 5] = [
    Figure::Brelan,
    Figure::Chance,
    Figure::Full,
    Figure::Carre,
    Figure::Yams,
];

/// Empty (-1) and barred (0) both count as zero.
pub fn normalize(value: i32) -> i32 {
    value.max(0)
}

fn saturating_sum(values: impl IntoIterator<Item = i32>) -> i32 {
    values.into_iter().fold(0, i32::saturating_add)
}

/// Sum of the six faces, without bonus
pub fn upper_base(faces: &[i32]) -> i32 {
    saturating_sum(faces.iter().map(|&v| normalize(v)))
}

/// Upper bonus earned by `base`
pub fn upper_bonus(base: i32, snapshot: &NotationSnapshot) -> i32 {
    if base >= snapshot.upper_bonus_threshold {
        snapshot.upper_bonus_value
    } else {
        0
    }
}

pub fn upper_total(faces: &[i32], snapshot: &NotationSnapshot) -> i32 {
    let base = upper_base(faces);
    base.saturating_add(upper_bonus(base, snapshot))
}

/// Middle section total.
///
/// `aces` is the number of ones rolled. `None` counts as zero, which makes
/// multiplier mode score nothing.
pub fn middle_total(max: i32, min: i32, aces: Option<i32>, snapshot: &NotationSnapshot) -> i32 {
    let (max, min) = (normalize(max), normalize(min));
    match snapshot.middle_mode {
        MiddleMode::Multiplier => {
            if max == 0 || min == 0 {
                return 0;
            }
            (max - min).saturating_mul(normalize(aces.unwrap_or(0)))
        }
        MiddleMode::BonusGate => {
            let sum = max.saturating_add(min);
            if max > min && sum >= snapshot.middle_bonus_sum_threshold {
                sum.saturating_add(snapshot.middle_bonus_value)
            } else {
                sum
            }
        }
    }
}

/// Big straight, looked up from the configured values.
pub fn big_straight_points(stored: i32, snapshot: &NotationSnapshot) -> i32 {
    if stored <= 0 {
        return 0;
    }
    match snapshot.suite_big_mode {
        SuiteBigMode::SingleFixed => snapshot.suite_big_fixed,
        SuiteBigMode::SplitFixed => {
            if stored == snapshot.suite_big_fixed_2to6 {
                snapshot.suite_big_fixed_2to6
            } else {
                snapshot.suite_big_fixed_1to5
            }
        }
    }
}

/// Points for a bottom figure's stored value under the snapshot's rule.
pub fn figure_points(stored: i32, figure: Figure, snapshot: &NotationSnapshot) -> i32 {
    if stored <= 0 {
        return 0;
    }
    match figure {
        // Stored already combined with its rule
        Figure::Yams => stored,
        Figure::BigStraight => big_straight_points(stored, snapshot),
        _ => snapshot.rule(figure).apply(stored),
    }
}

/// Breakdown of one scoring column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTotals {
    pub upper_base: i32,
    pub upper_bonus: i32,
    pub upper: i32,
    pub middle: i32,
    pub bottom: i32,
    pub small_straight: i32,
    pub big_straight: i32,
    pub extra_yams_bonus: i32,
    pub total: i32,
}

/// Totals of one column.
///
/// `aces` overrides the count recorded on the scorecard for that column.
pub fn column_totals(
    card: &Scorecard,
    column: usize,
    snapshot: &NotationSnapshot,
    aces: Option<i32>,
) -> ColumnTotals {
    let faces: Vec<i32> = CellKey::UPPER
        .iter()
        .map(|&key| card.value(key, column))
        .collect();
    let upper_base = upper_base(&faces);
    let upper_bonus = upper_bonus(upper_base, snapshot);
    let upper = upper_base.saturating_add(upper_bonus);

    let middle = middle_total(
        card.value(CellKey::Max, column),
        card.value(CellKey::Min, column),
        aces.or_else(|| card.aces(column)),
        snapshot,
    );

    let bottom = saturating_sum(
        BOTTOM_FIGURES
            .iter()
            .map(|&f| figure_points(card.value(f.cell(), column), f, snapshot)),
    );

    let small_straight = figure_points(
        card.value(CellKey::SmallStraight, column),
        Figure::SmallStraight,
        snapshot,
    );
    let big_straight = big_straight_points(card.value(CellKey::BigStraight, column), snapshot);

    let extra_yams_bonus =
        if snapshot.extra_yams_bonus_enabled && card.extra_yams_awarded(column) {
            snapshot.extra_yams_bonus_value
        } else {
            0
        };

    ColumnTotals {
        upper_base,
        upper_bonus,
        upper,
        middle,
        bottom,
        small_straight,
        big_straight,
        extra_yams_bonus,
        total: saturating_sum([
            upper,
            middle,
            bottom,
            small_straight,
            big_straight,
            extra_yams_bonus,
        ]),
    }
}

/// Grand total of a scorecard across all its columns
pub fn scorecard_total(card: &Scorecard, snapshot: &NotationSnapshot, aces: Option<i32>) -> i32 {
    saturating_sum((0..card.columns()).map(|col| column_totals(card, col, snapshot, aces).total))
}
