//! Notation listing command.

use anyhow::Result;
use strum::IntoEnumIterator;
use yams_core::{Figure, Notation, Preset, YamsConfig};

use super::load_history;

fn describe(notation: &Notation, source: &str) {
    println!("{} ({})", notation.name, source);
    println!(
        "  upper: {} bonus at {}",
        notation.upper_bonus_value, notation.upper_bonus_threshold
    );
    println!("  middle: {}", notation.middle_mode);
    for figure in Figure::iter() {
        let rule = notation.rule(figure);
        println!(
            "  {:<16} {} fixed={} x{}",
            figure.label(),
            rule.mode,
            rule.fixed_value,
            rule.multiplier
        );
    }
    println!(
        "  big straight: {} ({} / {} / {})",
        notation.suite_big_mode,
        notation.suite_big_fixed,
        notation.suite_big_fixed_1to5,
        notation.suite_big_fixed_2to6
    );
    if notation.extra_yams_bonus_enabled {
        println!("  extra yams bonus: {}", notation.extra_yams_bonus_value);
    }
}

pub fn run(config: &YamsConfig) -> Result<()> {
    let history = load_history(config)?;

    for preset in Preset::iter() {
        describe(&preset.notation(), "built-in");
    }
    for notation in &history.notations {
        describe(notation, "stored");
    }
    println!();
    println!("Default for new games: {}", config.default_notation);
    Ok(())
}
