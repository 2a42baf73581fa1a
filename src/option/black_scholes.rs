//! Closed-form Black-Scholes pricing for a single European contract
//!
//! d1 = [ln(S/K) + (r + sigma^2/2)T] / (sigma*sqrt(T)), d2 = d1 - sigma*sqrt(T)
//!
//! Every intermediate shared between the price and the Greeks is computed
//! once in [`OptionContract::new`], so all accessors of one contract see the
//! same d1, d2 and normal values.

use super::normal;
use super::{Greeks, OptionQuote, OptionSide, PricingError};

/// Days per year used to convert calendar days to a year fraction
pub const DAYS_PER_YEAR: f64 = 365.0;

/// An immutable European option contract with cached Black-Scholes terms
#[derive(Debug, Clone, PartialEq)]
pub struct OptionContract {
    spot: f64,
    strike: f64,
    rate: f64,
    time_to_expiry: f64,
    volatility: f64,
    multiplier: f64,

    sqrt_t: f64,
    sigma_sqrt_t: f64,
    discount: f64,
    d1: f64,
    d2: f64,
    pdf_d1: f64,
    cdf_d1: f64,
    cdf_d2: f64,
    cdf_neg_d1: f64,
    cdf_neg_d2: f64,
}

impl OptionContract {
    /// Create a contract from market inputs
    ///
    /// `days_to_expiry` is in calendar days and `multiplier` is the number of
    /// underlying units per contract. Fails when spot, strike, time or
    /// multiplier are non-positive, when rate or volatility are negative, or
    /// when sigma*sqrt(T) is zero.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        days_to_expiry: f64,
        volatility: f64,
        multiplier: u32,
    ) -> Result<Self, PricingError> {
        require("spot", spot, spot > 0.0)?;
        require("strike", strike, strike > 0.0)?;
        require("days_to_expiry", days_to_expiry, days_to_expiry > 0.0)?;
        require("volatility", volatility, volatility >= 0.0)?;
        require("risk_free_rate", rate, rate >= 0.0)?;
        require("multiplier", f64::from(multiplier), multiplier >= 1)?;

        let time_to_expiry = days_to_expiry / DAYS_PER_YEAR;
        let sqrt_t = time_to_expiry.sqrt();
        let sigma_sqrt_t = volatility * sqrt_t;
        require("volatility_sqrt_time", sigma_sqrt_t, sigma_sqrt_t > 0.0)?;

        let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * time_to_expiry)
            / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;

        let contract = Self {
            spot,
            strike,
            rate,
            time_to_expiry,
            volatility,
            multiplier: f64::from(multiplier),
            sqrt_t,
            sigma_sqrt_t,
            discount: (-rate * time_to_expiry).exp(),
            d1,
            d2,
            pdf_d1: normal::pdf(d1),
            cdf_d1: normal::cdf(d1),
            cdf_d2: normal::cdf(d2),
            cdf_neg_d1: normal::cdf(-d1),
            cdf_neg_d2: normal::cdf(-d2),
        };

        tracing::debug!(
            spot,
            strike,
            rate,
            time_to_expiry,
            volatility,
            d1,
            d2,
            "Option contract constructed"
        );

        Ok(contract)
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to expiry in years
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn d1(&self) -> f64 {
        self.d1
    }

    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// K * e^(-rT)
    pub fn discounted_strike(&self) -> f64 {
        self.strike * self.discount
    }

    pub fn call_price(&self) -> f64 {
        self.multiplier * (self.spot * self.cdf_d1 - self.discounted_strike() * self.cdf_d2)
    }

    pub fn put_price(&self) -> f64 {
        self.multiplier * (self.discounted_strike() * self.cdf_neg_d2 - self.spot * self.cdf_neg_d1)
    }

    pub fn call_delta(&self) -> f64 {
        self.multiplier * self.cdf_d1
    }

    pub fn put_delta(&self) -> f64 {
        self.multiplier * (self.cdf_d1 - 1.0)
    }

    /// Gamma, identical for call and put
    pub fn gamma(&self) -> f64 {
        self.multiplier * self.pdf_d1 / (self.spot * self.sigma_sqrt_t)
    }

    /// Vega per 1.00 change in volatility (1.00 = 100 vol points), identical
    /// for call and put
    pub fn vega(&self) -> f64 {
        self.multiplier * self.spot * self.sqrt_t * self.pdf_d1
    }

    /// Call theta per year
    pub fn call_theta(&self) -> f64 {
        self.multiplier
            * (self.time_decay() - self.rate * self.discounted_strike() * self.cdf_d2)
    }

    /// Put theta per year
    pub fn put_theta(&self) -> f64 {
        self.multiplier
            * (self.time_decay() + self.rate * self.discounted_strike() * self.cdf_neg_d2)
    }

    /// Call rho per 1% rate move
    pub fn call_rho(&self) -> f64 {
        self.multiplier * self.time_to_expiry * self.discounted_strike() * self.cdf_d2 / 100.0
    }

    /// Put rho per 1% rate move
    pub fn put_rho(&self) -> f64 {
        -self.multiplier * self.time_to_expiry * self.discounted_strike() * self.cdf_neg_d2 / 100.0
    }

    /// Price and Greeks for one side
    pub fn greeks(&self, side: OptionSide) -> Greeks {
        match side {
            OptionSide::Call => Greeks {
                price: self.call_price(),
                delta: self.call_delta(),
                gamma: self.gamma(),
                vega: self.vega(),
                theta: self.call_theta(),
                rho: self.call_rho(),
            },
            OptionSide::Put => Greeks {
                price: self.put_price(),
                delta: self.put_delta(),
                gamma: self.gamma(),
                vega: self.vega(),
                theta: self.put_theta(),
                rho: self.put_rho(),
            },
        }
    }

    /// Price and Greeks for both sides
    pub fn quote(&self) -> OptionQuote {
        OptionQuote {
            call: self.greeks(OptionSide::Call),
            put: self.greeks(OptionSide::Put),
        }
    }

    // -S * sigma * phi(d1) / (2 * sqrt(T)), shared by both thetas
    fn time_decay(&self) -> f64 {
        -(self.spot * self.volatility * self.pdf_d1) / (2.0 * self.sqrt_t)
    }
}

fn require(field: &'static str, value: f64, ok: bool) -> Result<(), PricingError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidInput { field, value })
    }
}
