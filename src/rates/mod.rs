pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{RateError, RateProvider};
pub use providers::FrankfurterProvider;
pub use types::{Conversion, ConversionRequest, LatestRatesResponse};
