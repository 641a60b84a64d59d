//! Games, players and scorecards.
//!
//! - **Game**: frozen notation snapshot, lifecycle status and scorecards
//! - **Turn engine**: turn order, one-cell-per-turn rule, completion
//! - **Outcome**: ranking and winners handed to notification layers

mod model;
mod outcome;
mod player;
mod scorecard;
mod turn;

pub use model::*;
pub use outcome::*;
pub use player::*;
pub use scorecard::*;
