//! Market data module
//!
//! Historical FCF, quotes and balance sheets from an external provider,
//! plus the TTL cache wrapped around it. Consumed by the CLI only; the
//! valuation core takes plain numbers.

mod cache;
mod fmp;
pub mod growth;
mod types;

pub use cache::{CachedProvider, TtlCache};
pub use fmp::FmpClient;
pub use types::{BalanceSheetSnapshot, FcfHistory, FcfObservation, MarketDataError, Quote};

use async_trait::async_trait;

/// Trait for market data provider implementations
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Annual free cash flow, oldest first, at most `limit` periods
    async fn fcf_history(&self, ticker: &str, limit: usize) -> Result<FcfHistory, MarketDataError>;
    /// Latest price and share count
    async fn quote(&self, ticker: &str) -> Result<Quote, MarketDataError>;
    /// Most recent balance sheet period
    async fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheetSnapshot, MarketDataError>;
}
