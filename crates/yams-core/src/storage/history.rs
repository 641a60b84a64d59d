//! Versioned history file.
//!
//! Version 2 stores every scorecard field as a JSON array of integers.
//! Version 1 stored the same arrays as JSON-encoded strings; those are
//! decoded once on load and any malformed blob rejects the whole file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::game::{Game, Player};
use crate::rules::{CellKey, Notation, Preset};

pub const CURRENT_VERSION: u32 = 2;

/// Scorecard keys that version 1 stored as encoded strings
const EXTRA_BLOB_FIELDS: [&str; 2] = ["extraYamsAwarded", "locks"];

/// Everything the application persists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub version: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub notations: Vec<Notation>,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            players: Vec::new(),
            notations: Vec::new(),
            games: Vec::new(),
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let history = Self::from_json(&content)?;
        debug!(
            "Loaded history from {}: {} players, {} games",
            path.display(),
            history.players.len(),
            history.games.len()
        );
        Ok(history)
    }

    /// Like [`History::load`], but a missing file yields an empty history.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path) {
            Err(e) if e.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse any supported version and upgrade it in memory.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(content)?;

        // Files written before versioning are version 1
        let version = match value.get("version") {
            None => 1,
            Some(v) => v
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| Error::decode("version", format!("not a version number: {v}")))?,
        };

        match version {
            1 => {
                migrate_v1(&mut value)?;
                info!("Migrated history from version 1");
            }
            CURRENT_VERSION => {}
            other => return Err(Error::UnsupportedVersion(other)),
        }

        let history: History = serde_json::from_value(value)?;
        history.check_shape()?;
        Ok(history)
    }

    pub fn to_json(&self) -> Result<String> {
        let mut out = self.clone();
        out.version = CURRENT_VERSION;
        Ok(serde_json::to_string_pretty(&out)?)
    }

    /// Write as the current version, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        info!("Saved history to {}", path.display());
        Ok(())
    }

    /// Every game's scorecards must have at least one column, the same
    /// count in all of them, and one slot per column in every field.
    pub fn check_shape(&self) -> Result<()> {
        self.games.iter().try_for_each(Game::check_shape)
    }

    /// Stored notation by name, falling back to the built-in presets.
    pub fn notation(&self, name: &str) -> Result<Notation> {
        if let Some(notation) = self.notations.iter().find(|n| n.name == name) {
            return Ok(notation.clone());
        }
        Preset::iter()
            .find(|p| p.name() == name)
            .map(|p| p.notation())
            .ok_or_else(|| Error::NotationNotFound(name.to_string()))
    }

    pub fn game(&self, id: u32) -> Result<&Game> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .ok_or(Error::GameNotFound(id))
    }

    pub fn game_mut(&mut self, id: u32) -> Result<&mut Game> {
        self.games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(Error::GameNotFound(id))
    }

    pub fn next_game_id(&self) -> u32 {
        self.games.iter().map(|g| g.id).max().map_or(1, |id| id + 1)
    }
}

/// Decode version 1 string blobs into plain JSON values, in place.
pub fn migrate_v1(value: &mut Value) -> Result<()> {
    let Some(root) = value.as_object_mut() else {
        return Err(Error::decode("history", "not a JSON object"));
    };
    root.insert("version".to_string(), Value::from(CURRENT_VERSION));
    let Some(games) = root.get_mut("games").and_then(Value::as_array_mut) else {
        return Ok(());
    };

    for game in games.iter_mut() {
        let game_id = game.get("id").and_then(Value::as_u64).unwrap_or(0);
        let Some(cards) = game.get_mut("scorecards").and_then(Value::as_array_mut) else {
            continue;
        };
        for card in cards.iter_mut() {
            let Some(card) = card.as_object_mut() else {
                return Err(Error::decode(
                    "scorecards",
                    format!("game {game_id}: scorecard is not an object"),
                ));
            };
            let fields = CellKey::iter()
                .map(|k| k.name())
                .chain(EXTRA_BLOB_FIELDS);
            for field in fields {
                let Some(slot) = card.get_mut(field) else {
                    continue;
                };
                if let Value::String(blob) = slot {
                    let decoded: Value = serde_json::from_str(blob).map_err(|e| {
                        Error::decode(field, format!("game {game_id}: {e}"))
                    })?;
                    *slot = decoded;
                }
            }
        }
    }
    Ok(())
}
