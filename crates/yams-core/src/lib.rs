//! # yams-core
//!
//! Scoring rules and statistics for Yams, a dice game of the Yahtzee family.
//!
//! This crate provides:
//! - Configurable scoring variants (notations) frozen into each game
//! - Validation of raw cell entries and score computation
//! - The turn engine: turn order, one cell per turn, completion
//! - Per-player and app-wide statistics with a debounced store
//! - A versioned JSON history file and stats export

pub mod config;
pub mod error;
pub mod export;
pub mod game;
pub mod prelude;
pub mod rules;
pub mod score;
pub mod signal;
pub mod stats;
pub mod storage;
pub mod validate;

pub use config::{YamsConfig, YamsConfigBuilder};
pub use error::{Error, Result};
pub use game::{
    Game, GameOutcome, GameStatus, Player, PlayerId, RankedPlayer, Scorecard, player_name,
};
pub use rules::{
    BottomRules, CellKey, Figure, FigureMode, FigureRule, MiddleMode, Notation, NotationSnapshot,
    Preset, SuiteBigMode,
};
pub use score::ColumnTotals;
pub use signal::CancelSignal;
pub use stats::{
    AppStats, PlayerStats, RefreshOutcome, StatsFingerprint, StatsService, StatsSnapshot,
    StatsStore,
};
pub use storage::History;
