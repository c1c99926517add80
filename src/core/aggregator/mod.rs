//! Storefront Aggregation
//!
//! Queries many storefronts at once and merges their fixed listings into a
//! single consumer stream.
//!
//! ```text
//!  Storefront A --stream--> worker --fix--+
//!  Storefront B --stream--> worker --fix--+--> mpsc --> ResultStream
//!  Storefront C --stream--> worker --fix--+
//! ```
//!
//! Every event is tagged with the [`Generation`] of its query. A new query
//! does not wait for the old one to drain; the consumer drops stale events
//! with [`ResultStream::next_current`]. One failing storefront only produces
//! an [`AggregateEvent::Failed`] for itself.

pub mod cancel;
pub mod engine;
pub mod error;
pub mod events;
pub mod source;

pub use cancel::{CancelToken, Generation, GenerationCounter};
pub use engine::Aggregator;
pub use error::{AdapterError, Result};
pub use events::{AggregateEvent, QueryProgress, ResultStream, Tagged};
pub use source::{FixtureSource, JsonFeedSource, SourceEvent, SourceStream, Storefront};
