pub mod alert_store;
pub mod price_feed;
pub mod registry;

pub mod evaluator;
pub mod notifier;
pub mod alert_monitor;
