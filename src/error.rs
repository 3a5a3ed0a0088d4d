use thiserror::Error;

/// Connection or query level failure of the alert store. Fatal at startup.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// A single alert row that could not be turned into an `Alert`.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("malformed alert row: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("alert {alert_id} has no currency code")]
    MissingCurrency { alert_id: i64 },
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("order book request for {symbol} failed: {status} {body}")]
    Status {
        symbol: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum PriceError {
    #[error("price is not numeric: {0:?}")]
    NotNumeric(String),

    #[error("unsupported price encoding: {0}")]
    Unsupported(String),
}
