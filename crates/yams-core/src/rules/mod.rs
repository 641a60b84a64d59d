//! Scoring variants ("notations").
//!
//! A [`Notation`] describes how a sheet is scored: upper bonus, middle
//! section mode, one [`FigureRule`] per bottom figure, big-straight values
//! and the extra yams bonus. Games keep a [`NotationSnapshot`] so that later
//! edits never change historical totals.

mod cell;
mod figure;
mod notation;

pub use cell::*;
pub use figure::*;
pub use notation::*;

/// Lowest dice sum for five dice
pub const MIN_DICE_SUM: i32 = 5;
/// Highest dice sum for five dice
pub const MAX_DICE_SUM: i32 = 30;
/// Stored value of an unfilled cell
pub const EMPTY: i32 = -1;
/// Stored value of a crossed-out cell
pub const BARRED: i32 = 0;
