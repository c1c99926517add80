//! Query generations and cooperative cancellation.
//!
//! Every query gets a fresh [`Generation`]. Starting a new query or cancelling
//! advances the shared counter, which flips every older [`CancelToken`] to
//! cancelled. Workers poll their token between round-trips; nothing is
//! interrupted preemptively.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cookie identifying the query an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::Acquire))
    }

    /// Move to a new generation, cancelling all earlier ones.
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn token(&self, generation: Generation) -> CancelToken {
        CancelToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }
}

/// Cancellation signal for one generation.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: Generation,
    current: Arc<AtomicU64>,
}

impl CancelToken {
    /// A token nothing can cancel.
    pub fn never() -> Self {
        GenerationCounter::new().token(Generation(0))
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation.0
    }
}
