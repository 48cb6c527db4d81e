pub mod error;
pub mod logger;
pub mod units;
pub mod validation;
