//! # Application State
//!
//! Core business state for kurs. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn RateProvider>  // rates API
//! ├── amount_text: String      // raw amount input
//! ├── from: Currency           // source currency
//! ├── to: Currency             // target currency
//! ├── outcome: Outcome         // what the result panel shows
//! ├── is_loading: bool         // fetch in flight
//! ├── request_seq: u64         // supersede counter
//! ├── as_of: Option<NaiveDate> // rate date of the last settled fetch
//! └── status_message: String   // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::config::ResolvedConfig;
use crate::core::currency::Currency;
use crate::rates::RateProvider;

/// What the result panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Placeholder before the first request settles.
    Idle,
    /// The most recent non-superseded request's result.
    Converted { value: f64, to: Currency },
    /// The amount field does not hold a valid non-negative number;
    /// conversion is blocked until it does.
    InvalidAmount,
    /// The most recent request failed (network, API, or parse).
    Failed(String),
}

pub struct App {
    pub provider: Arc<dyn RateProvider>,
    /// Raw text of the amount field. Parsed on every recomputation;
    /// the parsed value is never stored separately.
    pub amount_text: String,
    pub from: Currency,
    pub to: Currency,
    pub outcome: Outcome,
    pub is_loading: bool,
    /// Bumped on every recomputation. A completion whose sequence number no
    /// longer matches is stale and must not touch `outcome`.
    pub request_seq: u64,
    /// Rate date reported by the last settled fetch.
    pub as_of: Option<NaiveDate>,
    pub status_message: String,
}

impl App {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            provider,
            amount_text: String::from("100"),
            from: Currency::Eur,
            to: Currency::Usd,
            outcome: Outcome::Idle,
            is_loading: false,
            request_seq: 0,
            as_of: None,
            status_message: String::new(),
        }
    }

    pub fn from_config(provider: Arc<dyn RateProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider);
        app.amount_text = format_amount(config.amount);
        app.from = config.from;
        app.to = config.to;
        app
    }

    /// The amount field parsed as a non-negative finite number.
    /// `None` means conversion is blocked (empty, non-numeric, or negative).
    pub fn parsed_amount(&self) -> Option<f64> {
        let amount: f64 = self.amount_text.trim().parse().ok()?;
        (amount.is_finite() && amount >= 0.0).then_some(amount)
    }
}

/// Formats a converted value for display: two decimals, trailing zeros
/// trimmed, so `110.0` shows as "110" and `95.50` as "95.5".
pub fn format_amount(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
