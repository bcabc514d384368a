//! In-memory paging sessions with sliding idle expiry.
//!
//! One mutex guards the whole map. Every operation, including the periodic
//! sweep, holds it for a bounded amount of pure computation and never awaits
//! while holding it. Sessions live in memory only and are lost on restart.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::id::SessionId;
use super::state::PagingState;
use crate::config::PaginationConfig;
use crate::error::PaginationError;

struct Session {
    state: PagingState,
    last_active_at: Instant,
}

type SessionMap = Arc<Mutex<HashMap<SessionId, Session>>>;

struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

pub struct SessionStore {
    sessions: SessionMap,
    ttl: Duration,
    sweeper: tokio::sync::Mutex<Option<Sweeper>>,
}

impl SessionStore {
    /// Create the store and start its sweep task on the current runtime.
    pub fn new(config: &PaginationConfig) -> Self {
        Self::with_timing(config.idle_ttl(), config.sweep_interval())
    }

    pub fn with_timing(ttl: Duration, sweep_interval: Duration) -> Self {
        let sessions: SessionMap = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_sweep_loop(
            Arc::clone(&sessions),
            ttl,
            sweep_interval,
            shutdown_rx,
        ));

        Self {
            sessions,
            ttl,
            sweeper: tokio::sync::Mutex::new(Some(Sweeper { shutdown, handle })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        lock_sessions(&self.sessions)
    }

    /// Insert a new session. Never replaces an existing one.
    pub fn put(&self, id: SessionId, state: PagingState) -> Result<(), PaginationError> {
        let mut sessions = self.lock();
        if sessions.contains_key(&id) {
            return Err(PaginationError::IdCollision(id));
        }
        sessions.insert(
            id,
            Session {
                state,
                last_active_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Snapshot of a session's state. Refreshes its idle timer.
    pub fn get(&self, id: &SessionId) -> Option<PagingState> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id)?;
        session.last_active_at = Instant::now();
        Some(session.state.clone())
    }

    /// Move the page index by `delta`, clamped to the valid range, in one
    /// critical section. Refreshes the idle timer.
    pub fn update_page_index(&self, id: &SessionId, delta: isize) -> Option<PagingState> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id)?;
        session.state.step(delta);
        session.last_active_at = Instant::now();
        Some(session.state.clone())
    }

    pub fn remove(&self, id: &SessionId) {
        self.lock().remove(id);
    }

    /// Presence check that leaves the idle timer untouched.
    pub fn contains(&self, id: &SessionId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Evict every session idle for longer than the TTL. Returns how many
    /// were dropped.
    pub fn sweep_expired(&self) -> usize {
        sweep(&self.sessions, self.ttl)
    }

    /// Stop the periodic sweep and wait for it to exit.
    ///
    /// Safe to call more than once. The store keeps working afterwards; only
    /// automatic eviction ends.
    pub async fn stop(&self) {
        let mut sweeper = self.sweeper.lock().await;
        let Some(Sweeper { shutdown, handle }) = sweeper.take() else {
            return;
        };
        let _ = shutdown.send(true);
        if let Err(e) = handle.await {
            tracing::warn!("session sweep task ended abnormally: {e}");
        }
        tracing::debug!("session sweep stopped");
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn lock_sessions(sessions: &SessionMap) -> MutexGuard<'_, HashMap<SessionId, Session>> {
    sessions.lock().unwrap_or_else(PoisonError::into_inner)
}

fn sweep(sessions: &SessionMap, ttl: Duration) -> usize {
    let now = Instant::now();
    let mut sessions = lock_sessions(sessions);
    let before = sessions.len();
    sessions.retain(|_, session| now.saturating_duration_since(session.last_active_at) <= ttl);
    before - sessions.len()
}

async fn run_sweep_loop(
    sessions: SessionMap,
    ttl: Duration,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A failed pass must not end the loop; the next tick retries.
                match catch_unwind(AssertUnwindSafe(|| sweep(&sessions, ttl))) {
                    Ok(0) => {}
                    Ok(evicted) => tracing::debug!(evicted, "evicted idle paging sessions"),
                    Err(_) => tracing::error!("session sweep pass panicked; continuing"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
