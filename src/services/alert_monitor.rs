use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::models::{Alert, Instrument, PriceSample};

use super::{
    evaluator::{evaluate, Transition},
    notifier::Notifier,
    price_feed::PriceFeed,
};

/// Shortest accepted polling period; `interval` panics on zero.
pub const MIN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    FetchFailed,
    EmptyBook,
    Evaluated { fired: usize },
}

/// Polls one instrument and owns that instrument's alerts.
pub struct InstrumentMonitor {
    instrument: Instrument,
    alerts: Vec<Alert>,
    feed: Arc<dyn PriceFeed>,
    notifier: Arc<dyn Notifier>,
    period: Duration,
}

impl InstrumentMonitor {
    pub fn new(
        instrument: Instrument,
        alerts: Vec<Alert>,
        feed: Arc<dyn PriceFeed>,
        notifier: Arc<dyn Notifier>,
        period: Duration,
    ) -> Self {
        Self {
            instrument,
            alerts,
            feed,
            notifier,
            period: period.max(MIN_PERIOD),
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub async fn tick(&mut self) -> TickOutcome {
        let symbol = self.instrument.symbol();

        let book = match self.feed.fetch(symbol).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "price fetch failed, skipping tick");
                return TickOutcome::FetchFailed;
            }
        };

        // no bids means we don't have any info, wait for the next tick
        let Some(sample) = PriceSample::from_book(symbol, &book) else {
            tracing::debug!(symbol, "empty order book, skipping tick");
            return TickOutcome::EmptyBook;
        };

        let price = sample.price_or_zero();
        let name = self.instrument.display_name();

        let mut fired = 0;
        for alert in self.alerts.iter_mut() {
            match evaluate(alert, price, self.notifier.as_ref(), name) {
                Transition::Fired => fired += 1,
                Transition::Reset => {
                    tracing::info!(
                        symbol,
                        alert_id = alert.id,
                        bound = alert.bound,
                        price,
                        "alert reset"
                    );
                }
                Transition::Unchanged => {}
            }
        }

        tracing::trace!(symbol, price, at = %sample.fetched_at, fired, "tick evaluated");
        TickOutcome::Evaluated { fired }
    }

    /// Polls forever at the configured period. A slow fetch delays the next
    /// tick instead of piling up missed ones.
    pub async fn run(mut self) {
        let mut interval = time::interval_at(time::Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            symbol = self.instrument.symbol(),
            alerts = self.alerts.len(),
            every = ?self.period,
            "monitor started"
        );

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
