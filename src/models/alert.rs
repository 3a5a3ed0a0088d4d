use mongodb::bson::Bson;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Which side of the bound fires the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// fire when price falls to or below the bound
    Below,
    /// fire when price rises to or above the bound (stored, never evaluated yet)
    Above,
}

impl Direction {
    pub fn from_less(less: bool) -> Self {
        if less { Direction::Below } else { Direction::Above }
    }
}

/// One row of the `alerts` collection joined with its currency code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRow {
    #[serde(rename = "_id", deserialize_with = "whole_number")]
    pub id: i64,

    #[serde(deserialize_with = "whole_number_i32")]
    pub currency_id: i32,
    #[serde(default)]
    pub code: Option<String>,

    pub price: f64,
    pub less: bool,
}

// seed scripts and the legacy shell write integers as doubles
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    // largest double that still holds every integer exactly
    const EXACT: f64 = 9_007_199_254_740_992.0;

    match Bson::deserialize(deserializer)? {
        Bson::Int32(n) => Ok(i64::from(n)),
        Bson::Int64(n) => Ok(n),
        Bson::Double(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= EXACT => Ok(f as i64),
        other => Err(de::Error::custom(format!("expected a whole number, got {other}"))),
    }
}

fn whole_number_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = whole_number(deserializer)?;
    i32::try_from(n).map_err(|_| de::Error::custom(format!("{n} does not fit a currency id")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: i64,
    pub currency_id: i32,
    pub symbol: String,

    pub bound: f64,
    pub direction: Direction,

    pub active: bool,
    // set once a crossing was notified, cleared when price recovers
    pub alerting: bool,
}

impl Alert {
    pub fn new(id: i64, currency_id: i32, symbol: &str, bound: f64, direction: Direction) -> Self {
        Self {
            id,
            currency_id,
            symbol: symbol.trim().to_uppercase(),
            bound,
            direction,
            active: true,
            alerting: false,
        }
    }
}
