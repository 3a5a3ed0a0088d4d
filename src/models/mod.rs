pub mod alert;
pub mod instrument;
pub mod order_book;

pub use alert::{Alert, AlertRow, Direction};
pub use instrument::Instrument;
pub use order_book::{BookLevel, OrderBook, PriceField, PriceSample};
