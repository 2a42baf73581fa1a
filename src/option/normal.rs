//! Standard normal density and distribution functions
//!
//! The CDF goes through the complementary error function so that deep tails
//! keep their relative precision: N(x) = erfc(-x / sqrt(2)) / 2.

use statrs::function::erf::erfc;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal probability density
#[inline]
pub fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution
#[inline]
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}
