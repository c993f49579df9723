//! # Currency
//!
//! The closed set of currencies the converter supports. The selectors only
//! ever offer these values, so no further validation exists anywhere else.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A supported ISO-style currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Cad,
    Inr,
}

/// All supported currencies, in selector display order.
pub const SUPPORTED: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Cad, Currency::Inr];

impl Currency {
    /// The three-letter code sent to the rates API and shown in the UI.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Inr => "INR",
        }
    }

    /// The next currency in selector order, wrapping around.
    pub fn next(&self) -> Currency {
        let idx = SUPPORTED.iter().position(|c| c == self).unwrap_or(0);
        SUPPORTED[(idx + 1) % SUPPORTED.len()]
    }

    /// The previous currency in selector order, wrapping around.
    pub fn prev(&self) -> Currency {
        let idx = SUPPORTED.iter().position(|c| c == self).unwrap_or(0);
        SUPPORTED[(idx + SUPPORTED.len() - 1) % SUPPORTED.len()]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
