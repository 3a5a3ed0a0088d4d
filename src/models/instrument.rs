use std::fmt;

/// The trading pairs that get a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Btc,
    Eth,
    Ltc,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Btc, Instrument::Eth, Instrument::Ltc];

    pub fn symbol(self) -> &'static str {
        match self {
            Instrument::Btc => "BTC-USD",
            Instrument::Eth => "ETH-USD",
            Instrument::Ltc => "LTC-USD",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::Btc => "Bitcoin",
            Instrument::Eth => "Ethereum",
            Instrument::Ltc => "Litecoin",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
