//! Storefront adapters.
//!
//! Each adapter turns a query into a lazy, finite stream of raw listings
//! interleaved with progress estimates. Streams are single-use and check their
//! [`CancelToken`] before every page.

use std::path::Path;
use std::sync::Arc;

use futures::stream::BoxStream;
use serde::Deserialize;

use super::cancel::CancelToken;
use super::error::{AdapterError, Result};
use crate::core::names::to_lookup_key;
use crate::core::record::{CardRecord, SourceRef};

const DEFAULT_PAGE_SIZE: usize = 25;
const DEFAULT_MAX_PAGES: u32 = 20;

/// What a storefront stream produces.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    Listing(CardRecord),
    /// Estimated completion of this query on this storefront, `0.0..=1.0`.
    Progress(f32),
}

pub type SourceStream = BoxStream<'static, Result<SourceEvent>>;

/// Closed set of storefront adapters.
#[derive(Debug, Clone)]
pub enum Storefront {
    Fixture(FixtureSource),
    JsonFeed(JsonFeedSource),
}

impl Storefront {
    pub fn name(&self) -> &str {
        match self {
            Self::Fixture(source) => &source.name,
            Self::JsonFeed(source) => &source.name,
        }
    }

    pub fn search(&self, query: &str, cancel: CancelToken) -> SourceStream {
        match self {
            Self::Fixture(source) => source.search(query, cancel),
            Self::JsonFeed(source) => source.search(query, cancel),
        }
    }
}

impl From<FixtureSource> for Storefront {
    fn from(source: FixtureSource) -> Self {
        Self::Fixture(source)
    }
}

impl From<JsonFeedSource> for Storefront {
    fn from(source: JsonFeedSource) -> Self {
        Self::JsonFeed(source)
    }
}

/// Listings without a storefront caption get this adapter's.
fn stamp(mut record: CardRecord, name: &str, url: &str) -> CardRecord {
    if record.source.caption.is_empty() {
        record.source = SourceRef::new(name, url);
    }
    record
}

// ============================================================================
// Fixture
// ============================================================================

/// In-memory storefront, served page by page.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    name: String,
    url: String,
    listings: Arc<Vec<CardRecord>>,
    page_size: usize,
}

impl FixtureSource {
    pub fn new(name: impl Into<String>, listings: Vec<CardRecord>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
            listings: Arc::new(listings),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Read a JSON array of listings.
    pub fn from_file(name: impl Into<String>, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AdapterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let listings: Vec<CardRecord> = serde_json::from_str(&contents)?;
        let mut source = Self::new(name, listings);
        source.url = path.display().to_string();
        Ok(source)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings whose caption key contains the query key. An empty query
    /// matches everything.
    fn search(&self, query: &str, cancel: CancelToken) -> SourceStream {
        let name = self.name.clone();
        let url = self.url.clone();
        let listings = Arc::clone(&self.listings);
        let page_size = self.page_size;
        let key = to_lookup_key(query);

        Box::pin(async_stream::stream! {
            let matching: Vec<&CardRecord> = listings
                .iter()
                .filter(|record| key.is_empty() || to_lookup_key(&record.name.caption).contains(&key))
                .collect();
            let pages = matching.len().div_ceil(page_size).max(1);

            for (index, page) in matching.chunks(page_size).enumerate() {
                if cancel.is_cancelled() {
                    log::debug!("{}: stopped after {} of {} pages", name, index, pages);
                    break;
                }
                tokio::task::yield_now().await;
                for record in page {
                    yield Ok(SourceEvent::Listing(stamp((*record).clone(), &name, &url)));
                }
                yield Ok(SourceEvent::Progress((index + 1) as f32 / pages as f32));
            }

            if matching.is_empty() {
                yield Ok(SourceEvent::Progress(1.0));
            }
        })
    }
}

// ============================================================================
// JSON Feed
// ============================================================================

/// One page of a JSON search endpoint.
#[derive(Debug, Deserialize)]
struct FeedPage {
    #[serde(default)]
    items: Vec<CardRecord>,
    /// Total page count for the query.
    #[serde(default = "one_page")]
    pages: u32,
}

fn one_page() -> u32 {
    1
}

/// Storefront behind a paginated JSON endpoint:
/// `GET <url>?q=<query>&page=<n>` returning `{"items": [...], "pages": N}`.
#[derive(Debug, Clone)]
pub struct JsonFeedSource {
    name: String,
    url: String,
    client: reqwest::Client,
    max_pages: u32,
}

impl JsonFeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client: reqwest::Client::new(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    fn search(&self, query: &str, cancel: CancelToken) -> SourceStream {
        let name = self.name.clone();
        let url = self.url.clone();
        let client = self.client.clone();
        let max_pages = self.max_pages;
        let query = query.to_string();

        Box::pin(async_stream::stream! {
            let mut page: u32 = 1;
            loop {
                if cancel.is_cancelled() {
                    log::debug!("{}: stopped before page {}", name, page);
                    break;
                }

                let fetched = fetch_page(&client, &url, &query, page).await;
                let body = match fetched {
                    Ok(body) => body,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };

                let pages = body.pages.clamp(1, max_pages);
                for record in body.items {
                    yield Ok(SourceEvent::Listing(stamp(record, &name, &url)));
                }
                yield Ok(SourceEvent::Progress(page.min(pages) as f32 / pages as f32));

                if page >= pages {
                    break;
                }
                page += 1;
            }
        })
    }
}

async fn fetch_page(client: &reqwest::Client, url: &str, query: &str, page: u32) -> Result<FeedPage> {
    let page_param = page.to_string();
    let response = client
        .get(url)
        .query(&[("q", query), ("page", page_param.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AdapterError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
