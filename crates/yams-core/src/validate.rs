//! Sanitizing of raw cell entries.
//!
//! Every function here is total: out-of-range or disallowed input is clamped
//! or turned into [`EMPTY`], never reported as an error. `None` stands for an
//! empty submission.

use crate::rules::{
    BARRED, EMPTY, Figure, FigureMode, FigureRule, MAX_DICE_SUM, MIN_DICE_SUM, MiddleMode,
    NotationSnapshot, SuiteBigMode,
};
use crate::score;

/// Which middle-section cell is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddleField {
    Max,
    Min,
}

/// Stored max/min pair after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiddlePair {
    pub max: i32,
    pub min: i32,
}

impl MiddlePair {
    pub fn new(max: i32, min: i32) -> Self {
        Self { max, min }
    }
}

impl Default for MiddlePair {
    fn default() -> Self {
        Self::new(EMPTY, EMPTY)
    }
}

fn clamp_dice_sum(value: i32) -> i32 {
    value.clamp(MIN_DICE_SUM, MAX_DICE_SUM)
}

fn in_dice_range(value: i32) -> bool {
    (MIN_DICE_SUM..=MAX_DICE_SUM).contains(&value)
}

/// Upper-section face: multiples of `face` between 0 and five dice.
pub fn upper(raw: Option<i32>, face: i32) -> i32 {
    let Some(value) = raw else {
        return EMPTY;
    };
    if face <= 0 {
        return EMPTY;
    }
    if (0..=face * 5).contains(&value) && value % face == 0 {
        value
    } else {
        EMPTY
    }
}

/// Max/min entry, clamped to a five-dice sum and cross-checked against the
/// other cell. The counterpart is nudged so that max > min (strict) or
/// max >= min; when no legal value exists it is cleared.
pub fn middle(
    raw: Option<i32>,
    field: MiddleField,
    current: MiddlePair,
    mode: MiddleMode,
) -> MiddlePair {
    let mut pair = current;
    let Some(value) = raw else {
        match field {
            MiddleField::Max => pair.max = EMPTY,
            MiddleField::Min => pair.min = EMPTY,
        }
        return pair;
    };

    let value = clamp_dice_sum(value);
    let gap = if mode.is_strict() { 1 } else { 0 };

    match field {
        MiddleField::Max => {
            pair.max = value;
            if pair.min != EMPTY && pair.min > value - gap {
                let nudged = value - gap;
                pair.min = if in_dice_range(nudged) { nudged } else { EMPTY };
            }
        }
        MiddleField::Min => {
            pair.min = value;
            if pair.max != EMPTY && pair.max < value + gap {
                let nudged = value + gap;
                pair.max = if in_dice_range(nudged) { nudged } else { EMPTY };
            }
        }
    }
    pair
}

/// Generic bottom-figure entry. `0` crosses the figure out.
///
/// Modes that combine with a fixed value or multiplier store the dice sum
/// only; the combination happens at scoring time.
pub fn bottom(raw: Option<i32>, rule: &FigureRule) -> i32 {
    match raw {
        None => EMPTY,
        Some(BARRED) => BARRED,
        Some(value) => match rule.mode {
            FigureMode::Fixed => rule.fixed_value,
            FigureMode::Raw | FigureMode::RawPlusFixed | FigureMode::RawTimes => {
                clamp_dice_sum(value)
            }
        },
    }
}

/// Chance keeps any sum in `[0, 30]`, zero included.
pub fn chance(raw: Option<i32>) -> i32 {
    match raw {
        None => EMPTY,
        Some(value) => value.clamp(0, MAX_DICE_SUM),
    }
}

/// Stored values a yams cell may hold under `rule`.
///
/// Five equal faces sum to 5, 10, ... 30; the rule is applied to each.
pub fn allowed_yams_values(rule: &FigureRule) -> Vec<i32> {
    let mut values: Vec<i32> = (1..=6).map(|face| rule.apply(face * 5)).collect();
    values.sort_unstable();
    values.dedup();
    values
}

/// Yams stores the combined value; anything outside the allowed set is
/// rejected to empty.
pub fn yams(raw: Option<i32>, rule: &FigureRule) -> i32 {
    match raw {
        None => EMPTY,
        Some(BARRED) => BARRED,
        Some(value) if allowed_yams_values(rule).contains(&value) => value,
        Some(_) => EMPTY,
    }
}

/// Big straight: single mode snaps to its value, split mode accepts one of
/// the two configured values.
pub fn big_straight(raw: Option<i32>, snapshot: &NotationSnapshot) -> i32 {
    match raw {
        None => EMPTY,
        Some(BARRED) => BARRED,
        Some(value) => match snapshot.suite_big_mode {
            SuiteBigMode::SingleFixed => snapshot.suite_big_fixed,
            SuiteBigMode::SplitFixed => {
                if value == snapshot.suite_big_fixed_1to5 || value == snapshot.suite_big_fixed_2to6
                {
                    value
                } else {
                    EMPTY
                }
            }
        },
    }
}

/// Route a bottom-figure entry to its validator.
pub fn figure(raw: Option<i32>, figure: Figure, snapshot: &NotationSnapshot) -> i32 {
    match figure {
        Figure::Chance => chance(raw),
        Figure::Yams => yams(raw, snapshot.rule(figure)),
        Figure::BigStraight => big_straight(raw, snapshot),
        _ => bottom(raw, snapshot.rule(figure)),
    }
}

/// Text shown in a bottom-figure cell.
pub fn display_for_bottom(stored: i32, figure: Figure, snapshot: &NotationSnapshot) -> String {
    match stored {
        s if s < 0 => "-".to_string(),
        BARRED => "0".to_string(),
        _ => score::figure_points(stored, figure, snapshot).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Notation, Preset};

    #[test]
    fn test_empty_submission_is_sentinel() {
        let snap = NotationSnapshot::default();
        assert_eq!(upper(None, 3), EMPTY);
        assert_eq!(chance(None), EMPTY);
        assert_eq!(figure(None, Figure::Full, &snap), EMPTY);
        assert_eq!(figure(None, Figure::Yams, &snap), EMPTY);
        assert_eq!(figure(None, Figure::BigStraight, &snap), EMPTY);
    }

    #[test]
    fn test_upper_multiples_only() {
        assert_eq!(upper(Some(12), 4), 12);
        assert_eq!(upper(Some(0), 4), 0);
        assert_eq!(upper(Some(13), 4), EMPTY);
        assert_eq!(upper(Some(24), 4), EMPTY);
        assert_eq!(upper(Some(-4), 4), EMPTY);
    }

    #[test]
    fn test_middle_clamped() {
        let pair = middle(Some(42), MiddleField::Max, MiddlePair::default(), MiddleMode::Multiplier);
        assert_eq!(pair, MiddlePair::new(30, EMPTY));
        let pair = middle(Some(1), MiddleField::Min, MiddlePair::default(), MiddleMode::Multiplier);
        assert_eq!(pair, MiddlePair::new(EMPTY, 5));
    }

    #[test]
    fn test_middle_strict_nudges_counterpart() {
        let current = MiddlePair::new(EMPTY, 20);
        let pair = middle(Some(20), MiddleField::Max, current, MiddleMode::BonusGate);
        assert_eq!(pair, MiddlePair::new(20, 19));

        let current = MiddlePair::new(22, EMPTY);
        let pair = middle(Some(25), MiddleField::Min, current, MiddleMode::BonusGate);
        assert_eq!(pair, MiddlePair::new(26, 25));
    }

    #[test]
    fn test_middle_strict_clears_impossible_counterpart() {
        let current = MiddlePair::new(EMPTY, 12);
        let pair = middle(Some(5), MiddleField::Max, current, MiddleMode::BonusGate);
        assert_eq!(pair, MiddlePair::new(5, EMPTY));

        let current = MiddlePair::new(18, EMPTY);
        let pair = middle(Some(30), MiddleField::Min, current, MiddleMode::BonusGate);
        assert_eq!(pair, MiddlePair::new(EMPTY, 30));
    }

    #[test]
    fn test_middle_non_strict_allows_equal() {
        let current = MiddlePair::new(EMPTY, 20);
        let pair = middle(Some(20), MiddleField::Max, current, MiddleMode::Multiplier);
        assert_eq!(pair, MiddlePair::new(20, 20));

        let pair = middle(Some(15), MiddleField::Max, current, MiddleMode::Multiplier);
        assert_eq!(pair, MiddlePair::new(15, 15));
    }

    #[test]
    fn test_middle_clear_keeps_counterpart() {
        let current = MiddlePair::new(25, 10);
        let pair = middle(None, MiddleField::Max, current, MiddleMode::BonusGate);
        assert_eq!(pair, MiddlePair::new(EMPTY, 10));
    }

    #[test]
    fn test_bottom_modes() {
        assert_eq!(bottom(Some(0), &FigureRule::raw()), 0);
        assert_eq!(bottom(Some(2), &FigureRule::raw()), 5);
        assert_eq!(bottom(Some(40), &FigureRule::raw()), 30);
        assert_eq!(bottom(Some(22), &FigureRule::raw_plus_fixed(30)), 22);
        assert_eq!(bottom(Some(10), &FigureRule::raw_times(3)), 10);
        assert_eq!(bottom(Some(7), &FigureRule::fixed(25)), 25);
        assert_eq!(bottom(Some(0), &FigureRule::fixed(25)), 0);
    }

    #[test]
    fn test_chance_keeps_zero_and_clamps() {
        assert_eq!(chance(Some(0)), 0);
        assert_eq!(chance(Some(3)), 3);
        assert_eq!(chance(Some(31)), 30);
        assert_eq!(chance(Some(-2)), 0);
    }

    #[test]
    fn test_allowed_yams_values() {
        let rule = FigureRule::raw_plus_fixed(50);
        assert_eq!(allowed_yams_values(&rule), vec![55, 60, 65, 70, 75, 80]);
        assert_eq!(allowed_yams_values(&FigureRule::fixed(50)), vec![50]);
        assert_eq!(
            allowed_yams_values(&FigureRule::raw_times(2)),
            vec![10, 20, 30, 40, 50, 60]
        );
        assert_eq!(
            allowed_yams_values(&FigureRule::raw_times(100_000_000)),
            vec![500_000_000, 1_000_000_000, 1_500_000_000, 2_000_000_000, i32::MAX]
        );
    }

    #[test]
    fn test_yams_rejects_values_outside_set() {
        let rule = FigureRule::raw_plus_fixed(50);
        assert_eq!(yams(Some(57), &rule), EMPTY);
        assert_eq!(yams(Some(65), &rule), 65);
        assert_eq!(yams(Some(0), &rule), 0);
        assert_eq!(yams(Some(25), &rule), EMPTY);
    }

    #[test]
    fn test_big_straight_single_snaps() {
        let snap = Notation::default().snapshot();
        assert_eq!(big_straight(Some(1), &snap), 40);
        assert_eq!(big_straight(Some(0), &snap), 0);
    }

    #[test]
    fn test_big_straight_split() {
        let snap = Preset::BonusGate.notation().snapshot();
        assert_eq!(big_straight(Some(15), &snap), 15);
        assert_eq!(big_straight(Some(20), &snap), 20);
        assert_eq!(big_straight(Some(17), &snap), EMPTY);
    }

    #[test]
    fn test_display_for_bottom() {
        let mut notation = Notation::default();
        notation.bottom.carre = FigureRule::raw_times(3);
        let snap = notation.snapshot();

        assert_eq!(display_for_bottom(EMPTY, Figure::Full, &snap), "-");
        assert_eq!(display_for_bottom(0, Figure::Full, &snap), "0");
        assert_eq!(display_for_bottom(22, Figure::Full, &snap), "52");
        assert_eq!(display_for_bottom(10, Figure::Carre, &snap), "30");
        assert_eq!(display_for_bottom(65, Figure::Yams, &snap), "65");
        assert_eq!(display_for_bottom(30, Figure::SmallStraight, &snap), "30");
    }
}
