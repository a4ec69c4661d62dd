//! Staking module
//!
//! Edge against decimal odds and fractional-Kelly stake sizing

mod kelly;
mod types;

pub use kelly::StakingAdvisor;
pub use types::{StakeDecision, StakingError};
