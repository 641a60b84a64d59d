//! Prelude module for convenient imports
//!
//! ```ignore
//! use yams_core::prelude::*;
//! ```
//!
//! Brings in the rule model, games, statistics, storage and the export
//! trait.

pub use crate::config::{YamsConfig, YamsConfigBuilder};
pub use crate::error::{Error, Result};

pub use crate::rules::{CellKey, Figure, FigureRule, Notation, NotationSnapshot, Preset};

pub use crate::game::{Game, GameOutcome, GameStatus, Player, PlayerId, Scorecard};

pub use crate::stats::{AppStats, PlayerStats, RefreshOutcome, StatsService, StatsStore};

pub use crate::storage::History;

pub use crate::export::ExportFormat;
