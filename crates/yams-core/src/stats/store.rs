//! Debounced, cancel-on-change statistics publication.
//!
//! At most one recomputation is pending per store. A refresh with a new
//! fingerprint cancels the previous one, waits out the debounce window and
//! aggregates on a worker thread. Superseded results are dropped, never
//! published.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::YamsConfig;
use crate::game::{Game, Player};
use crate::signal::CancelSignal;
use crate::stats::{AppStats, PlayerStats, StatsFingerprint, StatsService};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Both derived values, published together
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub players: Vec<PlayerStats>,
    pub app: AppStats,
    pub fingerprint: StatsFingerprint,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fingerprint unchanged, nothing scheduled
    Skipped,
    /// A recomputation was scheduled (superseding any pending one)
    Scheduled,
}

#[derive(Default)]
struct Published {
    current: Option<Arc<StatsSnapshot>>,
    subscribers: Vec<Sender<Arc<StatsSnapshot>>>,
}

#[derive(Default)]
struct Pending {
    fingerprint: Option<StatsFingerprint>,
    cancel: Option<Arc<CancelSignal>>,
    workers: Vec<JoinHandle<()>>,
}

impl Pending {
    fn is_current(&self, cancel: &Arc<CancelSignal>) -> bool {
        self.cancel.as_ref().is_some_and(|c| Arc::ptr_eq(c, cancel))
    }
}

type ComputeFn = dyn Fn(&[Player], &[Game]) -> (Vec<PlayerStats>, AppStats) + Send + Sync;

pub struct StatsStore {
    debounce: Duration,
    compute: Arc<ComputeFn>,
    published: Arc<Mutex<Published>>,
    pending: Arc<Mutex<Pending>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StatsStore {
    pub fn new(debounce: Duration) -> Self {
        Self::with_compute(debounce, StatsService::compute)
    }

    /// Store that aggregates with `compute` instead of [`StatsService::compute`].
    pub(crate) fn with_compute<F>(debounce: Duration, compute: F) -> Self
    where
        F: Fn(&[Player], &[Game]) -> (Vec<PlayerStats>, AppStats) + Send + Sync + 'static,
    {
        Self {
            debounce,
            compute: Arc::new(compute),
            published: Arc::new(Mutex::new(Published::default())),
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    pub fn from_config(config: &YamsConfig) -> Self {
        Self::new(Duration::from_millis(config.debounce_ms))
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Latest published snapshot, if any
    pub fn snapshot(&self) -> Option<Arc<StatsSnapshot>> {
        lock(&self.published).current.clone()
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> Receiver<Arc<StatsSnapshot>> {
        let (tx, rx) = mpsc::channel();
        lock(&self.published).subscribers.push(tx);
        rx
    }

    /// Schedule a recomputation if the collections changed since the last
    /// scheduled one.
    pub fn refresh(&self, players: &[Player], games: &[Game]) -> RefreshOutcome {
        let fingerprint = StatsFingerprint::of(players, games);
        let mut pending = lock(&self.pending);

        if pending.fingerprint == Some(fingerprint) {
            debug!("Stats fingerprint unchanged, skipping recomputation");
            return RefreshOutcome::Skipped;
        }

        if let Some(previous) = pending.cancel.take() {
            // Under the publication lock so a worker cannot publish between
            // its own cancellation check and this cancel.
            let _published = lock(&self.published);
            previous.cancel();
            debug!("Superseded pending stats recomputation");
        }

        let cancel = Arc::new(CancelSignal::new());
        pending.fingerprint = Some(fingerprint);
        pending.cancel = Some(Arc::clone(&cancel));
        pending.workers.retain(|w| !w.is_finished());

        let players = players.to_vec();
        let games = games.to_vec();
        let published = Arc::clone(&self.published);
        let pending_slot = Arc::clone(&self.pending);
        let compute = Arc::clone(&self.compute);
        let debounce = self.debounce;

        let handle = thread::spawn(move || {
            if cancel.wait(debounce) {
                return;
            }

            let computed = panic::catch_unwind(AssertUnwindSafe(|| compute(&players, &games)));
            let Ok((player_stats, app)) = computed else {
                // Forget the fingerprint so the same inputs can be retried
                let mut pending = lock(&pending_slot);
                if pending.is_current(&cancel) {
                    pending.fingerprint = None;
                    pending.cancel = None;
                }
                warn!("Stats aggregation failed, nothing published");
                return;
            };

            let mut published = lock(&published);
            if cancel.is_cancelled() {
                debug!("Discarding superseded stats");
                return;
            }
            let snapshot = Arc::new(StatsSnapshot {
                players: player_stats,
                app,
                fingerprint,
                computed_at: Utc::now(),
            });
            published.current = Some(Arc::clone(&snapshot));
            published
                .subscribers
                .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
            info!(
                "Published stats: {} players, {} completed games",
                snapshot.app.total_players, snapshot.app.completed_games
            );
        });
        pending.workers.push(handle);

        RefreshOutcome::Scheduled
    }

    /// Cancel the pending recomputation without scheduling a new one.
    ///
    /// The fingerprint is forgotten so the next refresh always schedules.
    pub fn cancel(&self) {
        let mut pending = lock(&self.pending);
        if let Some(cancel) = pending.cancel.take() {
            let _published = lock(&self.published);
            cancel.cancel();
        }
        pending.fingerprint = None;
    }

    /// Block until every scheduled worker has finished.
    pub fn wait_idle(&self) {
        let workers = std::mem::take(&mut lock(&self.pending).workers);
        for worker in workers {
            if worker.join().is_err() {
                warn!("Stats worker panicked");
            }
        }
    }
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for StatsStore {
    fn drop(&mut self) {
        if let Some(cancel) = lock(&self.pending).cancel.take() {
            cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CellKey, FigureRule, Notation};
    use chrono::TimeZone;

    fn history(completed_games: usize) -> (Vec<Player>, Vec<Game>) {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
        let players = vec![Player::new(1, "Ana"), Player::new(2, "Bo")];
        let games = (0..completed_games)
            .map(|i| {
                let id = i as u32 + 1;
                let mut game =
                    Game::with_participants(id, format!("g{id}"), &Notation::default(), &[1, 2], 1, t0);
                game.scorecard_mut(1)
                    .unwrap()
                    .set_value(CellKey::Chance, 0, 20 + id as i32);
                game.set_turn_order(&[1, 2], t0);
                game.complete_if_finished(0, |_| 0, t0 + chrono::Duration::hours(i as i64 + 1));
                game
            })
            .collect();
        (players, games)
    }

    #[test]
    fn test_refresh_publishes_after_debounce() {
        let store = StatsStore::new(Duration::from_millis(10));
        assert!(store.snapshot().is_none());

        let (players, games) = history(2);
        assert_eq!(store.refresh(&players, &games), RefreshOutcome::Scheduled);
        store.wait_idle();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.app.completed_games, 2);
        assert_eq!(snapshot.players[0].score_history, vec![21, 22]);
    }

    #[test]
    fn test_identical_fingerprint_is_skipped() {
        let store = StatsStore::new(Duration::from_millis(10));
        let rx = store.subscribe();
        let (players, games) = history(1);

        assert_eq!(store.refresh(&players, &games), RefreshOutcome::Scheduled);
        store.wait_idle();
        let first = store.snapshot().unwrap();

        assert_eq!(store.refresh(&players, &games), RefreshOutcome::Skipped);
        store.wait_idle();
        assert!(Arc::ptr_eq(&first, &store.snapshot().unwrap()));
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_superseded_refresh_never_publishes() {
        let store = StatsStore::new(Duration::from_millis(200));
        let rx = store.subscribe();

        let (players, games) = history(1);
        store.refresh(&players, &games);
        let (players, games) = history(3);
        store.refresh(&players, &games);
        store.wait_idle();

        let published: Vec<_> = rx.try_iter().collect();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].app.completed_games, 3);
    }

    #[test]
    fn test_cancel_drops_pending_and_forgets_fingerprint() {
        let store = StatsStore::new(Duration::from_millis(200));
        let (players, games) = history(1);

        store.refresh(&players, &games);
        store.cancel();
        store.wait_idle();
        assert!(store.snapshot().is_none());

        assert_eq!(store.refresh(&players, &games), RefreshOutcome::Scheduled);
    }

    #[test]
    fn test_cancel_after_aggregation_started_discards_result() {
        let (started_tx, started_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel::<()>();
        let resume_rx = Mutex::new(resume_rx);
        let store = StatsStore::with_compute(Duration::ZERO, move |players, games| {
            started_tx.send(()).unwrap();
            lock(&resume_rx).recv().unwrap();
            StatsService::compute(players, games)
        });
        let rx = store.subscribe();

        let (players, games) = history(2);
        store.refresh(&players, &games);
        started_rx.recv().unwrap();
        store.cancel();
        resume_tx.send(()).unwrap();
        store.wait_idle();

        assert!(store.snapshot().is_none());
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_supersede_during_aggregation_publishes_only_latest() {
        let (started_tx, started_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel::<()>();
        let resume_rx = Mutex::new(resume_rx);
        let store = StatsStore::with_compute(Duration::ZERO, move |players, games| {
            started_tx.send(()).unwrap();
            lock(&resume_rx).recv().unwrap();
            StatsService::compute(players, games)
        });
        let rx = store.subscribe();

        let (players, games) = history(1);
        store.refresh(&players, &games);
        started_rx.recv().unwrap();

        let (players, games) = history(3);
        store.refresh(&players, &games);
        // Release the superseded worker, then the current one
        resume_tx.send(()).unwrap();
        started_rx.recv().unwrap();
        resume_tx.send(()).unwrap();
        store.wait_idle();

        let published: Vec<_> = rx.try_iter().collect();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].app.completed_games, 3);
    }

    #[test]
    fn test_failed_aggregation_can_be_retried() {
        let store = StatsStore::with_compute(Duration::ZERO, |_, _| panic!("aggregation failed"));
        let (players, games) = history(1);

        assert_eq!(store.refresh(&players, &games), RefreshOutcome::Scheduled);
        store.wait_idle();
        assert!(store.snapshot().is_none());

        assert_eq!(store.refresh(&players, &games), RefreshOutcome::Scheduled);
        store.wait_idle();
    }

    #[test]
    fn test_huge_rule_values_still_publish() {
        let store = StatsStore::new(Duration::ZERO);
        let (players, mut games) = history(1);
        games[0].snapshot.bottom.chance = FigureRule::raw_times(1_000_000_000);

        store.refresh(&players, &games);
        store.wait_idle();
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.players[0].best, Some(i32::MAX));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let store = StatsStore::new(Duration::from_millis(1));
        drop(store.subscribe());
        let (players, games) = history(1);
        store.refresh(&players, &games);
        store.wait_idle();
        assert!(store.snapshot().is_some());
        assert!(lock(&store.published).subscribers.is_empty());
    }
}
