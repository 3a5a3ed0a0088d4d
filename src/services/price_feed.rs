use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{error::FeedError, models::OrderBook};

/// Top of book for one instrument per call.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch(&self, symbol: &str) -> Result<OrderBook, FeedError>;
}

#[derive(Clone)]
pub struct GdaxClient {
    http: Client,
    base: String,
}

impl GdaxClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bidwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(http, base))
    }

    pub fn with_client(http: Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn book_url(&self, symbol: &str) -> String {
        format!("{}/products/{}/book", self.base, symbol)
    }
}

#[async_trait]
impl PriceFeed for GdaxClient {
    async fn fetch(&self, symbol: &str) -> Result<OrderBook, FeedError> {
        let url = self.book_url(symbol);

        let res = self.http.get(&url).send().await.map_err(|e| {
            tracing::debug!(%url, error = %e, "order book request failed");
            e
        })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                symbol: symbol.to_string(),
                status,
                body,
            });
        }

        Ok(res.json::<OrderBook>().await?)
    }
}
