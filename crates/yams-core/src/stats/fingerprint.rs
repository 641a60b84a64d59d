use chrono::{DateTime, Utc};

use crate::game::{Game, Player};

/// Cheap change detector for the player and game collections.
///
/// Not a hash: edits that keep every count and the latest timestamp equal
/// go unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsFingerprint {
    pub players: usize,
    pub games: usize,
    pub completed: usize,
    /// Most recent end (or start) time across all games
    pub latest: Option<DateTime<Utc>>,
}

impl StatsFingerprint {
    pub fn of(players: &[Player], games: &[Game]) -> Self {
        Self {
            players: players.len(),
            games: games.len(),
            completed: games.iter().filter(|g| g.is_completed()).count(),
            latest: games.iter().filter_map(|g| g.ended_at.or(g.started_at)).max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Notation;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_fingerprint_tracks_counts_and_latest() {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
        let players = vec![Player::new(1, "Ana")];
        let mut game = Game::with_participants(1, "g", &Notation::default(), &[1], 1, t0);

        let before = StatsFingerprint::of(&players, std::slice::from_ref(&game));
        assert_eq!(before.latest, None);
        assert_eq!(before.completed, 0);

        game.set_turn_order(&[1], t0);
        game.complete_if_finished(0, |_| 0, t0 + Duration::hours(1));
        let after = StatsFingerprint::of(&players, std::slice::from_ref(&game));
        assert_ne!(before, after);
        assert_eq!(after.completed, 1);
        assert_eq!(after.latest, Some(t0 + Duration::hours(1)));

        assert_eq!(after, StatsFingerprint::of(&players, &[game]));
    }
}
