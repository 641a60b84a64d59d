use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use yams_core::prelude::*;
use yams_core::rules::EMPTY;

fn sample_history() -> History {
    let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
    let notation = Preset::BonusGate.notation();
    let mut history = History::new();
    history.players = vec![Player::new(1, "Ana"), Player::new(2, "Bo")];
    history.notations.push(notation.clone());

    let mut game = Game::with_participants(1, "Friday", &notation, &[1, 2], 2, t0);
    game.set_turn_order(&[1, 2], t0);
    let snapshot = game.snapshot.clone();
    let card = game.scorecard_mut(1).unwrap();
    card.commit(CellKey::Yams, 1, Some(60), &snapshot);
    card.commit(CellKey::Max, 0, Some(28), &snapshot);
    card.lock(CellKey::Max, 0);
    game.begin_turn_snapshot(1, 2);
    history.games.push(game);
    history
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("history.json");

    let history = sample_history();
    history.save(&path).unwrap();
    let loaded = History::load(&path).unwrap();

    assert_eq!(loaded, history);
    let card = loaded.games[0].scorecard(1).unwrap();
    assert_eq!(card.value(CellKey::Yams, 1), 60);
    assert!(card.is_locked(CellKey::Max, 0));
    assert!(loaded.games[0].can_end_turn(1, 3));
}

#[test]
fn test_saved_fields_are_plain_arrays() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    sample_history().save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], 2);
    let card = &raw["games"][0]["scorecards"][0];
    assert_eq!(card["yams"], serde_json::json!([EMPTY, 60]));
    assert_eq!(card["max"], serde_json::json!([28, EMPTY]));
}

/// A version 2 file rewritten with version 1 string blobs.
fn as_v1(history: &History) -> String {
    let mut value = serde_json::to_value(history).unwrap();
    value["version"] = 1.into();
    for card in value["games"][0]["scorecards"].as_array_mut().unwrap() {
        let card = card.as_object_mut().unwrap();
        for key in CellKey::all() {
            let blob = card[key.name()].to_string();
            card.insert(key.name().to_string(), blob.into());
        }
        let blob = card["extraYamsAwarded"].to_string();
        card.insert("extraYamsAwarded".to_string(), blob.into());
    }
    value.to_string()
}

#[test]
fn test_v1_file_is_migrated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");
    let history = sample_history();
    std::fs::write(&path, as_v1(&history)).unwrap();

    let loaded = History::load(&path).unwrap();
    assert_eq!(loaded.games, history.games);
    assert_eq!(loaded.version, 2);

    // Saving upgrades the file
    loaded.save(&path).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], 2);
    assert!(raw["games"][0]["scorecards"][0]["ones"].is_array());
}

#[test]
fn test_corrupt_blob_rejects_whole_file() {
    let history = sample_history();
    let mut value: serde_json::Value = serde_json::from_str(&as_v1(&history)).unwrap();
    value["games"][0]["scorecards"][1]["chance"] = "[12,oops]".into();

    let err = History::from_json(&value.to_string()).unwrap_err();
    match err {
        Error::Decode { field, .. } => assert_eq!(field, "chance"),
        other => panic!("expected decode error, got {other}"),
    }
}

#[test]
fn test_ragged_scorecard_is_rejected() {
    let history = sample_history();
    let mut value = serde_json::to_value(&history).unwrap();
    value["games"][0]["scorecards"][0]["brelan"] = serde_json::json!([12]);

    let err = History::from_json(&value.to_string()).unwrap_err();
    match err {
        Error::ShapeMismatch {
            field,
            expected,
            actual,
        } => {
            assert_eq!(field, "brelan");
            assert_eq!((expected, actual), (2, 1));
        }
        other => panic!("expected shape mismatch, got {other}"),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(History::load(&path).unwrap_err().is_not_found());
    assert_eq!(History::load_or_default(&path).unwrap(), History::new());
}

#[test]
fn test_zero_column_scorecards_are_rejected() {
    let history = sample_history();
    let mut value = serde_json::to_value(&history).unwrap();
    for card in value["games"][0]["scorecards"].as_array_mut().unwrap() {
        let card = card.as_object_mut().unwrap();
        for key in CellKey::all() {
            card.insert(key.name().to_string(), serde_json::json!([]));
        }
        card.insert("extraYamsAwarded".to_string(), serde_json::json!([]));
    }

    match History::from_json(&value.to_string()).unwrap_err() {
        Error::ShapeMismatch {
            expected, actual, ..
        } => assert_eq!((expected, actual), (1, 0)),
        other => panic!("expected shape mismatch, got {other}"),
    }
}

#[test]
fn test_scorecards_must_share_column_count() {
    let mut history = sample_history();
    let card = &mut history.games[0].scorecards[1];
    for key in CellKey::all() {
        card.field_mut(key).push(EMPTY);
    }
    card.extra_yams_awarded.push(false);

    match History::from_json(&history.to_json().unwrap()).unwrap_err() {
        Error::ShapeMismatch {
            expected, actual, ..
        } => assert_eq!((expected, actual), (2, 3)),
        other => panic!("expected shape mismatch, got {other}"),
    }
}
