use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PriceError;

/// A price/size cell of an order book level. The exchange sends prices as
/// strings but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl PriceField {
    pub fn to_price(&self) -> Result<f64, PriceError> {
        let value = match self {
            PriceField::Number(n) => *n,
            PriceField::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| PriceError::NotNumeric(s.clone()))?,
            PriceField::Other(v) => return Err(PriceError::Unsupported(v.to_string())),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(PriceError::NotNumeric(value.to_string()))
        }
    }
}

/// `[price, size, num_orders]`
pub type BookLevel = Vec<PriceField>;

// {"sequence":4655738901,"bids":[["14080.13","5.81923144",8]],"asks":[["14080.14","2.89340088",1]]}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub sequence: i64,
    #[serde(default)]
    pub bids: Vec<BookLevel>,
    #[serde(default)]
    pub asks: Vec<BookLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&PriceField> {
        self.bids.first().and_then(|level| level.first())
    }
}

/// Current price of one instrument, alive for a single evaluation pass.
#[derive(Debug, Clone)]
pub struct PriceSample {
    pub symbol: String,
    pub price: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSample {
    /// `None` when the book has no bids at all.
    pub fn from_book(symbol: &str, book: &OrderBook) -> Option<Self> {
        if book.bids.is_empty() {
            return None;
        }

        let price = match book.best_bid() {
            Some(field) => match field.to_price() {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::debug!(symbol, error = %e, "unusable best bid");
                    None
                }
            },
            None => None,
        };

        Some(Self {
            symbol: symbol.to_string(),
            price,
            fetched_at: Utc::now(),
        })
    }

    /// Price handed to the evaluator. Zero means "no valid price".
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}
