//! Integration tests for bet-adviser

mod advice_test;
mod config_test;
mod quote_test;
