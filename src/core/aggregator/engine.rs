//! Fan-out over storefronts, fan-in into one tagged stream.

use futures::StreamExt;
use tokio::sync::mpsc;

use super::cancel::{CancelToken, Generation, GenerationCounter};
use super::events::{AggregateEvent, ResultStream, Tagged};
use super::source::{SourceEvent, Storefront};
use crate::core::fixer::CardFixer;

/// Runs queries against every storefront concurrently.
///
/// Each query spawns one tokio task per storefront. Workers fix listings as
/// they arrive and push them, tagged with the query generation, into the
/// shared [`ResultStream`].
#[derive(Debug)]
pub struct Aggregator {
    sources: Vec<Storefront>,
    fixer: CardFixer,
    counter: GenerationCounter,
    tx: mpsc::Sender<Tagged<AggregateEvent>>,
}

impl Aggregator {
    pub fn new(sources: Vec<Storefront>, fixer: CardFixer, capacity: usize) -> (Self, ResultStream) {
        let counter = GenerationCounter::new();
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let aggregator = Self {
            sources,
            fixer,
            counter: counter.clone(),
            tx,
        };
        (aggregator, ResultStream::new(rx, counter))
    }

    pub fn sources(&self) -> &[Storefront] {
        &self.sources
    }

    pub fn current(&self) -> Generation {
        self.counter.current()
    }

    /// Start a query, superseding any running one. Must be called inside a
    /// tokio runtime.
    pub fn start(&self, query: &str) -> Generation {
        let generation = self.counter.advance();
        log::info!(
            "Starting query {} {:?} on {} storefronts",
            generation,
            query,
            self.sources.len()
        );

        for source in &self.sources {
            let worker = Worker {
                source: source.clone(),
                fixer: self.fixer.clone(),
                tx: self.tx.clone(),
                cancel: self.counter.token(generation),
                query: query.to_string(),
            };
            tokio::spawn(worker.run());
        }
        generation
    }

    /// Cancel the running query. Workers stop at their next poll.
    pub fn cancel(&self) {
        let superseded = self.counter.current();
        self.counter.advance();
        log::info!("Cancelled query {}", superseded);
    }
}

struct Worker {
    source: Storefront,
    fixer: CardFixer,
    tx: mpsc::Sender<Tagged<AggregateEvent>>,
    cancel: CancelToken,
    query: String,
}

impl Worker {
    async fn run(self) {
        let name = self.source.name().to_string();
        let mut stream = self.source.search(&self.query, self.cancel.clone());
        let mut records_yielded = 0;

        while let Some(item) = stream.next().await {
            if self.cancel.is_cancelled() {
                log::debug!(
                    "{}: query {} cancelled after {} records",
                    name,
                    self.cancel.generation(),
                    records_yielded
                );
                return;
            }

            let event = match item {
                Ok(SourceEvent::Listing(raw)) => {
                    records_yielded += 1;
                    AggregateEvent::Record {
                        source: name.clone(),
                        record: self.fixer.fix(&raw),
                    }
                }
                Ok(SourceEvent::Progress(fraction)) => AggregateEvent::Progress {
                    source: name.clone(),
                    fraction: fraction.clamp(0.0, 1.0),
                },
                Err(e) => {
                    log::warn!("{}: storefront failed after {} records: {}", name, records_yielded, e);
                    self.send(AggregateEvent::Failed {
                        source: name,
                        error: e.to_string(),
                        records_yielded,
                    })
                    .await;
                    return;
                }
            };

            if !self.send(event).await {
                return;
            }
        }

        if !self.cancel.is_cancelled() {
            log::debug!("{}: finished with {} records", name, records_yielded);
            self.send(AggregateEvent::Finished {
                source: name,
                records_yielded,
            })
            .await;
        }
    }

    /// False once the consumer is gone.
    async fn send(&self, event: AggregateEvent) -> bool {
        let tagged = Tagged {
            generation: self.cancel.generation(),
            event,
        };
        self.tx.send(tagged).await.is_ok()
    }
}
