//! Advice module
//!
//! Composes form, outcome model and staking into per-outcome recommendations

mod adviser;
mod assembler;

pub use adviser::{Advice, AdviceRequest, Adviser};
pub use assembler::{AdviceAssembler, OutcomeAdvice, Recommendation};

use crate::form::FormError;
use crate::model::ModelError;
use crate::staking::StakingError;
use thiserror::Error;

/// Errors surfaced by an advisory call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdviceError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Staking(#[from] StakingError),
    /// Probability or edge too large to report as a percentage
    #[error("percentage out of range: {0}")]
    PercentOutOfRange(f64),
}
