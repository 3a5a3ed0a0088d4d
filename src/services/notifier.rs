/// Sink for threshold crossings. Implementations must not fail the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, instrument_name: &str, bound: f64, current_price: f64);
}

pub fn alert_message(instrument_name: &str, bound: f64, current_price: f64) -> String {
    format!(
        "{name} Alert! {name} is less than {bound:.2} ({current_price})",
        name = instrument_name
    )
}

/// Writes the alert to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, instrument_name: &str, bound: f64, current_price: f64) {
        tracing::warn!(
            instrument = instrument_name,
            bound,
            price = current_price,
            "{}",
            alert_message(instrument_name, bound, current_price)
        );
    }
}
