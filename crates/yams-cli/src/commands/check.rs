//! Entry check command: runs a raw value through validation.

use anyhow::Result;
use yams_core::rules::EMPTY;
use yams_core::validate::{allowed_yams_values, display_for_bottom};
use yams_core::{CellKey, Figure, Scorecard, YamsConfig};

use super::load_history;

pub fn run(
    config: &YamsConfig,
    key: CellKey,
    value: Option<i32>,
    notation: Option<&str>,
    counterpart: Option<i32>,
) -> Result<()> {
    let history = load_history(config)?;
    let name = notation.unwrap_or(config.default_notation.as_str());
    let snapshot = history.notation(name)?.snapshot();

    let mut card = Scorecard::new(0, 1);
    let other = match key {
        CellKey::Max => Some(CellKey::Min),
        CellKey::Min => Some(CellKey::Max),
        _ => None,
    };
    if let (Some(other), Some(current)) = (other, counterpart) {
        card.set_value(other, 0, current);
    }

    let stored = card.commit(key, 0, value, &snapshot);
    let shown = match key.figure() {
        Some(figure) => display_for_bottom(stored, figure, &snapshot),
        None if stored == EMPTY => "-".to_string(),
        None => stored.to_string(),
    };

    println!("notation: {}", snapshot.name);
    println!("{}: stored {} (shown as {})", key, stored, shown);
    if let Some(other) = other {
        println!("{}: {}", other, card.value(other, 0));
    }
    if key == CellKey::Yams {
        let allowed: Vec<String> = allowed_yams_values(snapshot.rule(Figure::Yams))
            .iter()
            .map(|v| v.to_string())
            .collect();
        println!("allowed: 0, {}", allowed.join(", "));
    }
    Ok(())
}
