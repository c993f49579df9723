use std::fmt;

use async_trait::async_trait;

use crate::core::currency::Currency;

use super::types::{Conversion, ConversionRequest};

/// Errors that can occur while fetching a conversion.
/// Cancellation is not represented here: a superseded request's task is
/// aborted outright, so its error never reaches the reducer.
#[derive(Debug)]
pub enum RateError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response (Frankfurter uses 422 for bad params).
    Api { status: u16, message: String },
    /// Failed to decode the response body.
    Parse(String),
    /// The payload decoded but carried no rate for the requested target.
    MissingRate(Currency),
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateError::Network(msg) => write!(f, "network error: {msg}"),
            RateError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RateError::Parse(msg) => write!(f, "parse error: {msg}"),
            RateError::MissingRate(to) => write!(f, "no rate for {to} in response"),
        }
    }
}

impl std::error::Error for RateError {}

/// A source of exchange-rate conversions.
///
/// The trait is the seam between the pure core and the network: the reducer
/// only ever sees a `Conversion` or an error message, never reqwest types.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns the name of the provider (status line, logs).
    fn name(&self) -> &str;

    /// Converts `request.amount` from `request.from` into `request.to`.
    async fn convert(&self, request: &ConversionRequest) -> Result<Conversion, RateError>;
}
