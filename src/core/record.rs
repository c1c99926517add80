//! Card Record
//!
//! The unit flowing through the pipeline. Raw records from storefronts carry
//! free text in `set`, `language` and `condition`; fixed records carry codes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Card name as listed, plus any free-text note the storefront attached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardName {
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stock as reported: an exact count, or only in/out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Exact(u32),
    InStock(bool),
}

impl Default for Count {
    fn default() -> Self {
        Self::InStock(true)
    }
}

impl Count {
    pub fn is_available(&self) -> bool {
        match self {
            Self::Exact(n) => *n > 0,
            Self::InStock(available) => *available,
        }
    }
}

/// Storefront a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceRef {
    pub caption: String,
    #[serde(default)]
    pub url: String,
}

impl SourceRef {
    pub fn new(caption: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            url: url.into(),
        }
    }
}

/// One for-sale listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: CardName,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub foilness: Option<bool>,
    #[serde(default)]
    pub count: Count,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub source: SourceRef,
    /// Collector number within `set`.
    #[serde(default)]
    pub id: Option<u32>,
}

impl CardRecord {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            name: CardName {
                caption: caption.into(),
                description: None,
            },
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.name.description = Some(description.into());
        self
    }

    pub fn with_set(mut self, set: impl Into<String>) -> Self {
        self.set = Some(set.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_foilness(mut self, foil: bool) -> Self {
        self.foilness = Some(foil);
        self
    }

    pub fn with_count(mut self, count: Count) -> Self {
        self.count = count;
        self
    }

    pub fn with_price(mut self, price: Decimal, currency: impl Into<String>) -> Self {
        self.price = Some(price);
        self.currency = Some(currency.into());
        self
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = source;
        self
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }
}
