//! Statistics derived from the game history.
//!
//! [`StatsService`] aggregates from scratch; [`StatsStore`] decides when to
//! run it and publishes the result.

mod fingerprint;
mod service;
mod store;

pub use fingerprint::StatsFingerprint;
pub use service::{AppStats, BestScore, LeaderboardEntry, MostWins, PlayerStats, StatsService};
pub use store::{DEFAULT_DEBOUNCE, RefreshOutcome, StatsSnapshot, StatsStore};
