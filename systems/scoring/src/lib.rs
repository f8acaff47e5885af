#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Best-score tracking system backed by a pluggable persistence port.
//!
//! The world already compares the running score against the best it was
//! constructed with; this system's sole job is carrying new records across
//! sessions. Persistence failures are swallowed on the write path so a broken
//! store can never stall a game in progress.

use twenty48_core::Event;

/// Durable storage for the best score achieved across sessions.
pub trait BestScoreStore {
    /// Loads the previously recorded best score.
    fn load(&self) -> anyhow::Result<u32>;

    /// Records a new best score.
    fn save(&mut self, best: u32) -> anyhow::Result<()>;
}

/// Pure system that persists best-score records as the world reports them.
#[derive(Debug)]
pub struct Scoring<S> {
    store: S,
    best: u32,
}

impl<S: BestScoreStore> Scoring<S> {
    /// Creates a scoring system seeded from the store, falling back to zero
    /// when nothing was recorded yet or the store cannot be read.
    #[must_use]
    pub fn new(store: S) -> Self {
        let best = store.load().unwrap_or(0);
        Self { store, best }
    }

    /// Best score currently known to the system.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Consumes world events, persisting every new best-score record.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::BestScoreChanged { best } = event {
                self.best = *best;
                // A failed write keeps the in-memory record authoritative.
                let _ = self.store.save(*best);
            }
        }
    }
}

/// Volatile store useful for tests and sessions without persistence.
#[derive(Clone, Copy, Debug, Default)]
pub struct InMemoryStore {
    best: u32,
}

impl InMemoryStore {
    /// Creates a store seeded with a previously achieved best score.
    #[must_use]
    pub const fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for InMemoryStore {
    fn load(&self) -> anyhow::Result<u32> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> anyhow::Result<()> {
        self.best = best;
        Ok(())
    }
}
