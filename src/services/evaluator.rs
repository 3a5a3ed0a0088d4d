use crate::models::{Alert, Direction};

use super::notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// crossed the bound, alert armed and notified
    Fired,
    /// price recovered above the bound, alert silently disarmed
    Reset,
    Unchanged,
}

/// Feeds one price sample to one alert.
///
/// A `Below` alert fires once when price reaches the bound (inclusive) and
/// stays armed, without repeating, until price is back above the bound.
/// Zero, negative and non-finite prices never change anything. `Above`
/// alerts are loaded but not evaluated.
pub fn evaluate(alert: &mut Alert, price: f64, notifier: &dyn Notifier, name: &str) -> Transition {
    if !alert.active || !price.is_finite() || price <= 0.0 {
        return Transition::Unchanged;
    }

    match alert.direction {
        Direction::Below => {
            if price <= alert.bound {
                if alert.alerting {
                    return Transition::Unchanged;
                }
                alert.alerting = true;
                notifier.notify(name, alert.bound, price);
                Transition::Fired
            } else if alert.alerting {
                alert.alerting = false;
                Transition::Reset
            } else {
                Transition::Unchanged
            }
        }
        Direction::Above => Transition::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, f64, f64)>>,
    }

    impl Recorder {
        fn count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, instrument_name: &str, bound: f64, current_price: f64) {
            self.calls
                .lock()
                .unwrap()
                .push((instrument_name.to_string(), bound, current_price));
        }
    }

    fn btc(bound: f64) -> Alert {
        Alert::new(1, 1, "BTC-USD", bound, Direction::Below)
    }

    #[test]
    fn fires_once_while_below() {
        let n = Recorder::default();
        let mut a = btc(14000.0);

        assert_eq!(evaluate(&mut a, 14500.0, &n, "Bitcoin"), Transition::Unchanged);
        assert_eq!(evaluate(&mut a, 13900.0, &n, "Bitcoin"), Transition::Fired);
        assert_eq!(evaluate(&mut a, 13800.0, &n, "Bitcoin"), Transition::Unchanged);
        assert_eq!(evaluate(&mut a, 13000.0, &n, "Bitcoin"), Transition::Unchanged);

        assert!(a.alerting);
        assert_eq!(
            *n.calls.lock().unwrap(),
            vec![("Bitcoin".to_string(), 14000.0, 13900.0)]
        );
    }

    #[test]
    fn recovery_disarms_silently_and_rearms() {
        let n = Recorder::default();
        let mut a = btc(14000.0);

        evaluate(&mut a, 13900.0, &n, "Bitcoin");
        assert_eq!(evaluate(&mut a, 14100.0, &n, "Bitcoin"), Transition::Reset);
        assert!(!a.alerting);
        assert_eq!(n.count(), 1);

        assert_eq!(evaluate(&mut a, 13950.0, &n, "Bitcoin"), Transition::Fired);
        assert!(a.alerting);
        assert_eq!(n.count(), 2);
    }

    #[test]
    fn bound_is_inclusive() {
        let n = Recorder::default();
        let mut a = btc(14000.0);

        assert_eq!(evaluate(&mut a, 14000.0, &n, "Bitcoin"), Transition::Fired);
        assert_eq!(n.count(), 1);
    }

    #[test]
    fn invalid_prices_change_nothing() {
        let n = Recorder::default();

        for armed in [false, true] {
            for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
                let mut a = btc(14000.0);
                a.alerting = armed;
                assert_eq!(evaluate(&mut a, price, &n, "Bitcoin"), Transition::Unchanged);
                assert_eq!(a.alerting, armed);
            }
        }
        assert_eq!(n.count(), 0);
    }

    #[test]
    fn above_direction_is_inert() {
        let n = Recorder::default();
        let mut a = Alert::new(2, 1, "BTC-USD", 14000.0, Direction::Above);

        for price in [13000.0, 14000.0, 15000.0] {
            assert_eq!(evaluate(&mut a, price, &n, "Bitcoin"), Transition::Unchanged);
        }
        assert!(!a.alerting);
        assert_eq!(n.count(), 0);
    }

    #[test]
    fn inactive_alert_is_skipped() {
        let n = Recorder::default();
        let mut a = btc(14000.0);
        a.active = false;

        assert_eq!(evaluate(&mut a, 100.0, &n, "Bitcoin"), Transition::Unchanged);
        assert_eq!(n.count(), 0);
    }
}
