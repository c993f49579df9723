pub mod frankfurter;

pub use frankfurter::FrankfurterProvider;
