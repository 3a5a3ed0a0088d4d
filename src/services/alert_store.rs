use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::{AggregateOptions, ClientOptions},
    Client, Database,
};

use crate::{
    config::Settings,
    error::{RowError, StoreError},
    models::{Alert, AlertRow, Direction},
};

/// Source of alert definitions, read once at startup.
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn get_alerts(&self) -> Result<Vec<Alert>, StoreError>;
}

#[derive(Clone)]
pub struct MongoAlertStore {
    db: Database,
}

impl MongoAlertStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Builds the client with the configured pool and pings the server so a
    /// bad connection fails here instead of on first use.
    pub async fn connect(settings: &Settings) -> Result<Self, StoreError> {
        let mut opts = ClientOptions::parse(&settings.mongodb_uri).await?;
        opts.app_name = Some("bidwatch".to_string());
        opts.max_pool_size = Some(settings.mongodb_max_pool_size);
        opts.min_pool_size = Some(settings.mongodb_min_pool_size);
        opts.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(opts)?;
        let db = client.database(&settings.mongodb_db);
        db.run_command(doc! { "ping": 1 }, None).await?;

        Ok(Self::new(db))
    }
}

#[async_trait]
impl AlertStore for MongoAlertStore {
    async fn get_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.db.collection::<Document>("alerts");

        let pipeline = vec![
            doc! { "$lookup": {
                "from": "currencies",
                "localField": "currency_id",
                "foreignField": "_id",
                "as": "currency",
            } },
            doc! { "$project": {
                "_id": 1,
                "currency_id": 1,
                "price": 1,
                "less": 1,
                "code": { "$arrayElemAt": ["$currency.code", 0] },
            } },
            doc! { "$sort": { "_id": 1 } },
        ];
        let opts = AggregateOptions::builder()
            .max_time(Duration::from_secs(5))
            .build();

        let mut cursor = alerts.aggregate(pipeline, opts).await?;

        let mut rows: Vec<Document> = Vec::new();
        while let Some(item) = cursor.next().await {
            rows.push(item?);
        }

        Ok(decode_alert_rows(rows))
    }
}

pub fn decode_alert_row(row: Document) -> Result<Alert, RowError> {
    let row: AlertRow = from_document(row)?;

    let code = match row.code.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => return Err(RowError::MissingCurrency { alert_id: row.id }),
    };

    Ok(Alert::new(
        row.id,
        row.currency_id,
        &code,
        row.price,
        Direction::from_less(row.less),
    ))
}

/// Decodes every row on its own. A bad row is logged and dropped, the rest
/// still load.
pub fn decode_alert_rows(rows: Vec<Document>) -> Vec<Alert> {
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let raw_id = row.get("_id").map(|v| v.to_string());
        match decode_alert_row(row) {
            Ok(alert) => out.push(alert),
            Err(e) => {
                tracing::warn!(id = ?raw_id, error = %e, "skipping alert row");
            }
        }
    }

    out
}
