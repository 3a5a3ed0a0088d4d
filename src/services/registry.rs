use std::collections::BTreeMap;

use crate::models::Alert;

/// Alerts bucketed by instrument symbol, in the order the store returned them.
/// A bucket holds at most one alert per (bound, direction); the first one wins.
#[derive(Debug, Default)]
pub struct AlertRegistry {
    buckets: BTreeMap<String, Vec<Alert>>,
}

impl AlertRegistry {
    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        let mut buckets: BTreeMap<String, Vec<Alert>> = BTreeMap::new();
        for a in alerts {
            let bucket = buckets.entry(a.symbol.to_uppercase()).or_default();

            let duplicate = bucket
                .iter()
                .find(|b| b.bound == a.bound && b.direction == a.direction);
            if let Some(kept) = duplicate {
                tracing::warn!(
                    alert_id = a.id,
                    kept_id = kept.id,
                    symbol = %a.symbol,
                    bound = a.bound,
                    "dropping duplicate alert"
                );
                continue;
            }

            bucket.push(a);
        }
        Self { buckets }
    }

    pub fn get(&self, symbol: &str) -> &[Alert] {
        self.buckets
            .get(&symbol.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Moves a bucket out so a single monitor owns those alerts.
    pub fn take(&mut self, symbol: &str) -> Vec<Alert> {
        self.buckets.remove(&symbol.to_uppercase()).unwrap_or_default()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    fn alert(id: i64, symbol: &str, bound: f64) -> Alert {
        Alert::new(id, 1, symbol, bound, Direction::Below)
    }

    #[test]
    fn buckets_keep_store_order() {
        let reg = AlertRegistry::from_alerts(vec![
            alert(1, "BTC-USD", 14000.0),
            alert(2, "ETH-USD", 700.0),
            alert(3, "BTC-USD", 13000.0),
            alert(4, "btc-usd", 12000.0),
        ]);

        let ids: Vec<i64> = reg.get("BTC-USD").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(reg.get("ETH-USD").len(), 1);
        assert!(reg.get("LTC-USD").is_empty());
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.symbols().collect::<Vec<_>>(), vec!["BTC-USD", "ETH-USD"]);
    }

    #[test]
    fn duplicate_bound_and_direction_keeps_first() {
        let reg = AlertRegistry::from_alerts(vec![
            alert(1, "BTC-USD", 14000.0),
            alert(2, "BTC-USD", 14000.0),
            Alert::new(3, 1, "BTC-USD", 14000.0, Direction::Above),
            alert(4, "ETH-USD", 14000.0),
        ]);

        let ids: Vec<i64> = reg.get("BTC-USD").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(reg.get("ETH-USD").len(), 1);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn duplicates_notify_once_per_crossing() {
        use crate::services::{evaluator::evaluate, notifier::Notifier};
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counter(AtomicUsize);
        impl Notifier for Counter {
            fn notify(&self, _: &str, _: f64, _: f64) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut reg = AlertRegistry::from_alerts(vec![
            alert(1, "BTC-USD", 14000.0),
            alert(2, "BTC-USD", 14000.0),
        ]);
        let counter = Counter(AtomicUsize::new(0));

        let mut bucket = reg.take("BTC-USD");
        for a in bucket.iter_mut() {
            evaluate(a, 13900.0, &counter, "Bitcoin");
        }

        assert_eq!(bucket.len(), 1);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn take_moves_bucket_out() {
        let mut reg = AlertRegistry::from_alerts(vec![alert(1, "LTC-USD", 275.0)]);

        assert_eq!(reg.take("LTC-USD").len(), 1);
        assert!(reg.take("LTC-USD").is_empty());
        assert!(reg.is_empty());
    }
}
