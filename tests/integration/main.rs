//! Integration tests

mod config_test;
mod option_test;
mod ticker_test;
mod valuation_test;
