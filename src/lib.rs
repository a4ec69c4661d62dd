//! bet-adviser: value-bet advice for football 1X2 markets
//!
//! This library provides the core components for:
//! - Goal-rate estimation from recent W/D/L form
//! - Independent-Poisson home/draw/away probabilities
//! - Fractional Kelly stake sizing against quoted decimal odds
//! - Per-outcome recommendation assembly
//! - Odds snapshot parsing with a staleness-gated cache

pub mod advice;
pub mod cli;
pub mod config;
pub mod form;
pub mod model;
pub mod quote;
pub mod staking;
pub mod telemetry;
