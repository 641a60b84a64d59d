use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Every cell of a scorecard column, in sheet order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CellKey {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    Max,
    Min,
    Brelan,
    Chance,
    Full,
    SmallStraight,
    BigStraight,
    Carre,
    Yams,
}

impl CellKey {
    pub const UPPER: [CellKey; 6] = [
        Self::Ones,
        Self::Twos,
        Self::Threes,
        Self::Fours,
        Self::Fives,
        Self::Sixes,
    ];

    pub fn all() -> Vec<CellKey> {
        Self::iter().collect()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Die face for upper-section cells (1..=6)
    pub fn face(&self) -> Option<i32> {
        Self::UPPER
            .iter()
            .position(|k| k == self)
            .map(|i| i as i32 + 1)
    }

    pub fn is_middle(&self) -> bool {
        matches!(self, Self::Max | Self::Min)
    }

    pub fn figure(&self) -> Option<Figure> {
        match self {
            Self::Brelan => Some(Figure::Brelan),
            Self::Chance => Some(Figure::Chance),
            Self::Full => Some(Figure::Full),
            Self::SmallStraight => Some(Figure::SmallStraight),
            Self::BigStraight => Some(Figure::BigStraight),
            Self::Carre => Some(Figure::Carre),
            Self::Yams => Some(Figure::Yams),
            _ => None,
        }
    }

    /// Key used in the scorecard lock map
    pub fn lock_key(&self, column: usize) -> String {
        format!("{}.{}", column, self.name())
    }
}

/// Bottom-section scoring combination
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Figure {
    Brelan,
    Chance,
    Full,
    SmallStraight,
    BigStraight,
    Carre,
    Yams,
}

impl Figure {
    pub fn cell(&self) -> CellKey {
        match self {
            Self::Brelan => CellKey::Brelan,
            Self::Chance => CellKey::Chance,
            Self::Full => CellKey::Full,
            Self::SmallStraight => CellKey::SmallStraight,
            Self::BigStraight => CellKey::BigStraight,
            Self::Carre => CellKey::Carre,
            Self::Yams => CellKey::Yams,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Brelan => "Three of a kind",
            Self::Chance => "Chance",
            Self::Full => "Full house",
            Self::SmallStraight => "Small straight",
            Self::BigStraight => "Big straight",
            Self::Carre => "Four of a kind",
            Self::Yams => "Yams",
        }
    }
}
