//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::rates::{Conversion, ConversionRequest, RateError, RateProvider};

/// A provider that converts at a fixed rate, for tests that don't need
/// real API calls.
pub struct StaticRateProvider {
    pub rate: f64,
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<Conversion, RateError> {
        Ok(Conversion {
            value: request.amount * self.rate,
            to: request.to,
            as_of: NaiveDate::from_ymd_opt(2024, 1, 12).expect("valid date"),
        })
    }
}

/// Creates a test App with a fixed-rate provider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StaticRateProvider { rate: 1.1 }))
}
