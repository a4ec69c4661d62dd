//! Recent-form module
//!
//! Turns W/D/L form strings into expected-goal rates for both sides

mod estimator;
mod types;

pub use estimator::GoalRateEstimator;
pub use types::{FormError, FormRecord, FormSymbol, GoalRatePair};
