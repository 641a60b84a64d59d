//! Persistent storage of players, notations and games.
//!
//! The whole history lives in one pretty-printed JSON document. See
//! [`History`] for the versioning rules.

mod history;

pub use history::{CURRENT_VERSION, History, migrate_v1};
