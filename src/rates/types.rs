//! Domain and wire types for the rates seam.
//!
//! `ConversionRequest` and `Conversion` are the crate's own vocabulary;
//! `LatestRatesResponse` mirrors the Frankfurter `/latest` payload and stays
//! inside the provider layer.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::currency::Currency;

/// The (amount, from, to) triple that parameterizes one outbound rate lookup.
/// Transient: rebuilt from the current inputs on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
}

/// A settled conversion: the value the result panel displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub to: Currency,
    /// The rate date the API reported the conversion against.
    pub as_of: NaiveDate,
}

/// Frankfurter `/latest` response body:
/// `{"amount":100.0,"base":"EUR","date":"2024-01-12","rates":{"USD":110.0}}`
#[derive(Debug, Deserialize)]
pub struct LatestRatesResponse {
    pub amount: f64,
    pub base: String,
    pub date: NaiveDate,
    pub rates: HashMap<String, f64>,
}
