use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How a figure's stored value turns into points
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FigureMode {
    /// Dice sum as entered
    #[default]
    Raw,
    /// Flat value, whatever was rolled
    Fixed,
    /// Dice sum plus the fixed value
    RawPlusFixed,
    /// Dice sum times the multiplier
    RawTimes,
}

/// Scoring rule for one bottom-section figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FigureRuleRepr", rename_all = "camelCase")]
pub struct FigureRule {
    pub mode: FigureMode,
    pub fixed_value: i32,
    pub multiplier: i32,
    pub tooltip: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FigureRuleRepr {
    #[serde(default)]
    mode: FigureMode,
    #[serde(default)]
    fixed_value: i32,
    #[serde(default = "default_multiplier")]
    multiplier: i32,
    #[serde(default)]
    tooltip: Option<String>,
}

fn default_multiplier() -> i32 {
    1
}

impl From<FigureRuleRepr> for FigureRule {
    fn from(r: FigureRuleRepr) -> Self {
        Self::new(r.mode, r.fixed_value, r.multiplier, r.tooltip)
    }
}

impl FigureRule {
    /// Build a rule; `multiplier` is clamped to at least 1.
    pub fn new(mode: FigureMode, fixed_value: i32, multiplier: i32, tooltip: Option<String>) -> Self {
        Self {
            mode,
            fixed_value,
            multiplier: multiplier.max(1),
            tooltip,
        }
    }

    pub fn raw() -> Self {
        Self::new(FigureMode::Raw, 0, 1, None)
    }

    pub fn fixed(value: i32) -> Self {
        Self::new(FigureMode::Fixed, value, 1, None)
    }

    pub fn raw_plus_fixed(value: i32) -> Self {
        Self::new(FigureMode::RawPlusFixed, value, 1, None)
    }

    pub fn raw_times(multiplier: i32) -> Self {
        Self::new(FigureMode::RawTimes, 0, multiplier, None)
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Combine a positive dice sum with this rule.
    ///
    /// Rule values come from user-edited notations, so the result saturates
    /// at the `i32` bounds.
    pub fn apply(&self, base: i32) -> i32 {
        match self.mode {
            FigureMode::Raw => base,
            FigureMode::Fixed => self.fixed_value,
            FigureMode::RawPlusFixed => base.saturating_add(self.fixed_value),
            FigureMode::RawTimes => base.saturating_mul(self.multiplier),
        }
    }
}

impl Default for FigureRule {
    fn default() -> Self {
        Self::raw()
    }
}
