//! The merged, generation-tagged result stream.

use std::collections::BTreeMap;

use futures::Stream;
use tokio::sync::mpsc;

use super::cancel::{Generation, GenerationCounter};
use crate::core::record::CardRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateEvent {
    /// A fixed listing.
    Record { source: String, record: CardRecord },
    Progress { source: String, fraction: f32 },
    /// The storefront failed; records already delivered stay valid.
    Failed {
        source: String,
        error: String,
        records_yielded: usize,
    },
    Finished {
        source: String,
        records_yielded: usize,
    },
}

impl AggregateEvent {
    pub fn source(&self) -> &str {
        match self {
            Self::Record { source, .. }
            | Self::Progress { source, .. }
            | Self::Failed { source, .. }
            | Self::Finished { source, .. } => source,
        }
    }
}

/// An event and the query generation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    pub generation: Generation,
    pub event: T,
}

/// Consumer end of an [`Aggregator`](super::Aggregator).
///
/// Ends once the aggregator and all of its workers are gone.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<Tagged<AggregateEvent>>,
    counter: GenerationCounter,
}

impl ResultStream {
    pub(crate) fn new(rx: mpsc::Receiver<Tagged<AggregateEvent>>, counter: GenerationCounter) -> Self {
        Self { rx, counter }
    }

    /// Generation of the most recent query.
    pub fn current(&self) -> Generation {
        self.counter.current()
    }

    /// Next event of any generation.
    pub async fn next(&mut self) -> Option<Tagged<AggregateEvent>> {
        self.rx.recv().await
    }

    /// Next event of the current generation. Events from superseded queries
    /// still draining are dropped.
    pub async fn next_current(&mut self) -> Option<Tagged<AggregateEvent>> {
        loop {
            let tagged = self.rx.recv().await?;
            if tagged.generation == self.counter.current() {
                return Some(tagged);
            }
            log::trace!(
                "Discarding stale event from {} query {}",
                tagged.event.source(),
                tagged.generation
            );
        }
    }

    /// Current-generation events as a `Stream`.
    pub fn into_current(mut self) -> impl Stream<Item = Tagged<AggregateEvent>> {
        async_stream::stream! {
            while let Some(tagged) = self.next_current().await {
                yield tagged;
            }
        }
    }
}

/// Completion of one query across its storefronts.
#[derive(Debug, Clone)]
pub struct QueryProgress {
    generation: Generation,
    /// source -> (fraction, done)
    sources: BTreeMap<String, (f32, bool)>,
}

impl QueryProgress {
    pub fn new<I, S>(generation: Generation, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            generation,
            sources: sources.into_iter().map(|s| (s.into(), (0.0, false))).collect(),
        }
    }

    /// Fold one event in; events of other generations are ignored.
    pub fn apply(&mut self, tagged: &Tagged<AggregateEvent>) {
        if tagged.generation != self.generation {
            return;
        }
        let entry = self
            .sources
            .entry(tagged.event.source().to_string())
            .or_insert((0.0, false));
        match &tagged.event {
            AggregateEvent::Progress { fraction, .. } => entry.0 = entry.0.max(*fraction),
            AggregateEvent::Failed { .. } | AggregateEvent::Finished { .. } => *entry = (1.0, true),
            AggregateEvent::Record { .. } => {}
        }
    }

    pub fn source(&self, name: &str) -> Option<f32> {
        self.sources.get(name).map(|(fraction, _)| *fraction)
    }

    /// Mean completion over all storefronts.
    pub fn overall(&self) -> f32 {
        if self.sources.is_empty() {
            return 1.0;
        }
        let total: f32 = self.sources.values().map(|(fraction, _)| fraction).sum();
        total / self.sources.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        self.sources.values().all(|(_, done)| *done)
    }
}
