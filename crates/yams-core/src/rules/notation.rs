use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{CellKey, Figure, FigureRule};

/// Scoring of the max/min section
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MiddleMode {
    /// (max - min) x number of aces
    #[default]
    Multiplier,
    /// max + min, plus a bonus when max > min and the sum reaches the threshold
    BonusGate,
}

impl MiddleMode {
    /// Whether max must be strictly greater than min
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::BonusGate)
    }
}

/// Big-straight valuation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SuiteBigMode {
    /// One value for any big straight
    #[default]
    SingleFixed,
    /// 1-2-3-4-5 and 2-3-4-5-6 score differently
    SplitFixed,
}

/// Keep the first occurrence of each key; a repeated key would count twice
/// towards completion.
pub fn unique_keys(keys: &[CellKey]) -> Vec<CellKey> {
    let mut unique = Vec::with_capacity(keys.len());
    for &key in keys {
        if !unique.contains(&key) {
            unique.push(key);
        }
    }
    unique
}

fn deserialize_required_keys<'de, D>(deserializer: D) -> Result<Vec<CellKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys = Vec::<CellKey>::deserialize(deserializer)?;
    Ok(unique_keys(&keys))
}

/// One rule per bottom figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BottomRules {
    pub brelan: FigureRule,
    pub chance: FigureRule,
    pub full: FigureRule,
    pub small_straight: FigureRule,
    pub big_straight: FigureRule,
    pub carre: FigureRule,
    pub yams: FigureRule,
}

impl BottomRules {
    pub fn get(&self, figure: Figure) -> &FigureRule {
        match figure {
            Figure::Brelan => &self.brelan,
            Figure::Chance => &self.chance,
            Figure::Full => &self.full,
            Figure::SmallStraight => &self.small_straight,
            Figure::BigStraight => &self.big_straight,
            Figure::Carre => &self.carre,
            Figure::Yams => &self.yams,
        }
    }

    pub fn get_mut(&mut self, figure: Figure) -> &mut FigureRule {
        match figure {
            Figure::Brelan => &mut self.brelan,
            Figure::Chance => &mut self.chance,
            Figure::Full => &mut self.full,
            Figure::SmallStraight => &mut self.small_straight,
            Figure::BigStraight => &mut self.big_straight,
            Figure::Carre => &mut self.carre,
            Figure::Yams => &mut self.yams,
        }
    }
}

impl Default for BottomRules {
    fn default() -> Self {
        Self {
            brelan: FigureRule::raw(),
            chance: FigureRule::raw(),
            full: FigureRule::raw_plus_fixed(30),
            small_straight: FigureRule::fixed(30),
            big_straight: FigureRule::fixed(40),
            carre: FigureRule::raw_plus_fixed(40),
            yams: FigureRule::raw_plus_fixed(50),
        }
    }
}

/// Editable scoring variant.
///
/// Games never read a `Notation` directly: they freeze a [`NotationSnapshot`]
/// at creation so later edits cannot rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notation {
    pub name: String,
    pub tooltip_upper: Option<String>,
    pub tooltip_middle: Option<String>,
    pub tooltip_bottom: Option<String>,

    pub upper_bonus_threshold: i32,
    pub upper_bonus_value: i32,

    pub middle_mode: MiddleMode,
    pub middle_bonus_sum_threshold: i32,
    pub middle_bonus_value: i32,

    pub bottom: BottomRules,

    pub suite_big_mode: SuiteBigMode,
    pub suite_big_fixed: i32,
    pub suite_big_fixed_1to5: i32,
    pub suite_big_fixed_2to6: i32,

    pub extra_yams_bonus_enabled: bool,
    pub extra_yams_bonus_value: i32,

    /// Cells that must be filled for a game to complete
    #[serde(deserialize_with = "deserialize_required_keys")]
    pub required_keys: Vec<CellKey>,
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            tooltip_upper: Some("35 bonus points at 63 or more".to_string()),
            tooltip_middle: Some("(max - min) x number of aces".to_string()),
            tooltip_bottom: None,
            upper_bonus_threshold: 63,
            upper_bonus_value: 35,
            middle_mode: MiddleMode::Multiplier,
            middle_bonus_sum_threshold: 50,
            middle_bonus_value: 30,
            bottom: BottomRules::default(),
            suite_big_mode: SuiteBigMode::SingleFixed,
            suite_big_fixed: 40,
            suite_big_fixed_1to5: 15,
            suite_big_fixed_2to6: 20,
            extra_yams_bonus_enabled: false,
            extra_yams_bonus_value: 100,
            required_keys: CellKey::all(),
        }
    }
}

impl Notation {
    pub fn rule(&self, figure: Figure) -> &FigureRule {
        self.bottom.get(figure)
    }

    /// Freeze every rule field into a value that games keep forever.
    pub fn snapshot(&self) -> NotationSnapshot {
        // Exhaustive destructuring: a field added to `Notation` must be
        // handled here or this stops compiling.
        let Notation {
            name,
            tooltip_upper,
            tooltip_middle,
            tooltip_bottom,
            upper_bonus_threshold,
            upper_bonus_value,
            middle_mode,
            middle_bonus_sum_threshold,
            middle_bonus_value,
            bottom,
            suite_big_mode,
            suite_big_fixed,
            suite_big_fixed_1to5,
            suite_big_fixed_2to6,
            extra_yams_bonus_enabled,
            extra_yams_bonus_value,
            required_keys,
        } = self;

        NotationSnapshot {
            name: name.clone(),
            tooltip_upper: tooltip_upper.clone(),
            tooltip_middle: tooltip_middle.clone(),
            tooltip_bottom: tooltip_bottom.clone(),
            upper_bonus_threshold: *upper_bonus_threshold,
            upper_bonus_value: *upper_bonus_value,
            middle_mode: *middle_mode,
            middle_bonus_sum_threshold: *middle_bonus_sum_threshold,
            middle_bonus_value: *middle_bonus_value,
            bottom: bottom.clone(),
            suite_big_mode: *suite_big_mode,
            suite_big_fixed: *suite_big_fixed,
            suite_big_fixed_1to5: *suite_big_fixed_1to5,
            suite_big_fixed_2to6: *suite_big_fixed_2to6,
            extra_yams_bonus_enabled: *extra_yams_bonus_enabled,
            extra_yams_bonus_value: *extra_yams_bonus_value,
            required_keys: unique_keys(required_keys),
        }
    }
}

/// Immutable copy of a [`Notation`] stored inside a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotationSnapshot {
    pub name: String,
    pub tooltip_upper: Option<String>,
    pub tooltip_middle: Option<String>,
    pub tooltip_bottom: Option<String>,
    pub upper_bonus_threshold: i32,
    pub upper_bonus_value: i32,
    pub middle_mode: MiddleMode,
    pub middle_bonus_sum_threshold: i32,
    pub middle_bonus_value: i32,
    pub bottom: BottomRules,
    pub suite_big_mode: SuiteBigMode,
    pub suite_big_fixed: i32,
    pub suite_big_fixed_1to5: i32,
    pub suite_big_fixed_2to6: i32,
    pub extra_yams_bonus_enabled: bool,
    pub extra_yams_bonus_value: i32,
    #[serde(deserialize_with = "deserialize_required_keys")]
    pub required_keys: Vec<CellKey>,
}

impl Default for NotationSnapshot {
    fn default() -> Self {
        Notation::default().snapshot()
    }
}

impl NotationSnapshot {
    pub fn rule(&self, figure: Figure) -> &FigureRule {
        self.bottom.get(figure)
    }
}

/// Built-in notations
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    Classic,
    BonusGate,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn notation(&self) -> Notation {
        match self {
            Self::Classic => Notation::default(),
            Self::BonusGate => Notation {
                name: self.name().to_string(),
                tooltip_middle: Some("max + min, 30 bonus points at 50 when max > min".to_string()),
                middle_mode: MiddleMode::BonusGate,
                suite_big_mode: SuiteBigMode::SplitFixed,
                extra_yams_bonus_enabled: true,
                ..Notation::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_snapshot_copies_every_field() {
        let mut notation = Preset::BonusGate.notation();
        notation.tooltip_bottom = Some("bottom".to_string());
        notation.bottom.carre = FigureRule::raw_times(2);
        notation.required_keys = vec![CellKey::Yams];

        let snap = notation.snapshot();
        // Both types serialize to the same document when in sync
        let a = serde_json::to_value(&notation).unwrap();
        let b = serde_json::to_value(&snap).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut notation = Notation::default();
        let snap = notation.snapshot();
        notation.upper_bonus_value = 50;
        notation.bottom.yams = FigureRule::fixed(99);

        assert_eq!(snap.upper_bonus_value, 35);
        assert_eq!(snap.rule(Figure::Yams), &FigureRule::raw_plus_fixed(50));
    }

    #[test]
    fn test_presets() {
        for preset in Preset::iter() {
            assert_eq!(Preset::from_str(preset.name()).unwrap(), preset);
            assert_eq!(preset.notation().name, preset.name());
        }
        let gate = Preset::BonusGate.notation();
        assert!(gate.middle_mode.is_strict());
        assert_eq!(gate.suite_big_mode, SuiteBigMode::SplitFixed);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let notation: Notation = serde_json::from_str(r#"{"name":"house","upperBonusValue":50}"#).unwrap();
        assert_eq!(notation.name, "house");
        assert_eq!(notation.upper_bonus_value, 50);
        assert_eq!(notation.upper_bonus_threshold, 63);
        assert_eq!(notation.required_keys.len(), 15);
    }

    #[test]
    fn test_required_keys_deduplicated() {
        let mut notation = Notation::default();
        notation.required_keys = vec![CellKey::Yams, CellKey::Ones, CellKey::Yams];
        assert_eq!(
            notation.snapshot().required_keys,
            vec![CellKey::Yams, CellKey::Ones]
        );

        let json = r#"{"requiredKeys":["chance","chance","full"]}"#;
        let snap: NotationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.required_keys, vec![CellKey::Chance, CellKey::Full]);
        let notation: Notation = serde_json::from_str(json).unwrap();
        assert_eq!(notation.required_keys, vec![CellKey::Chance, CellKey::Full]);
    }

    #[test]
    fn test_field_names() {
        let value = serde_json::to_value(Notation::default()).unwrap();
        assert!(value.get("suiteBigFixed1to5").is_some());
        assert!(value.get("extraYamsBonusEnabled").is_some());
        assert_eq!(value["middleMode"], "multiplier");
    }
}
