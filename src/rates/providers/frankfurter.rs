//! Frankfurter provider implementation.
//!
//! Frankfurter (https://api.frankfurter.app) serves ECB reference rates with
//! no API key. One endpoint is used here:
//! `GET /latest?amount=<amount>&from=<FROM>&to=<TO>` returns the converted
//! amount directly in `rates[TO]`, so no client-side arithmetic is needed.
//!
//! The API rejects `from == to` with a 422; the reducer short-circuits that
//! case before a request is ever built.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::rates::{Conversion, ConversionRequest, LatestRatesResponse, RateError, RateProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Frankfurter exchange-rate API provider.
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: Option<String>) -> Self {
        let env_url = std::env::var("FRANKFURTER_BASE_URL").ok();
        let final_url = base_url
            .or(env_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: final_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    fn name(&self) -> &str {
        "frankfurter"
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<Conversion, RateError> {
        info!(
            "Frankfurter request: amount={}, from={}, to={}",
            request.amount, request.from, request.to
        );

        let response = self
            .client
            .get(format!("{}/latest", self.base_url))
            .query(&[
                ("amount", request.amount.to_string()),
                ("from", request.from.code().to_string()),
                ("to", request.to.code().to_string()),
            ])
            .send()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;

        debug!("Frankfurter response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Frankfurter API error: {} - {}", status, err_body);
            return Err(RateError::Api {
                status,
                message: err_body,
            });
        }

        let payload: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| RateError::Parse(e.to_string()))?;

        let value = payload
            .rates
            .get(request.to.code())
            .copied()
            .ok_or(RateError::MissingRate(request.to))?;

        info!(
            "Frankfurter conversion: {} {} -> {} {} (rates as of {})",
            request.amount, request.from, value, request.to, payload.date
        );

        Ok(Conversion {
            value,
            to: request.to,
            as_of: payload.date,
        })
    }
}
