//! Integration tests for the ticker workflow against an in-memory provider

use async_trait::async_trait;
use chrono::NaiveDate;
use clap::Parser;
use equity_valuator::cli::{Cli, Commands};
use equity_valuator::config::Config;
use equity_valuator::market::{
    BalanceSheetSnapshot, FcfHistory, FcfObservation, MarketDataError, MarketDataProvider, Quote,
};

struct StaticProvider {
    fcf: Vec<f64>,
    balance_sheet: bool,
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fcf_history(&self, _: &str, limit: usize) -> Result<FcfHistory, MarketDataError> {
        Ok(FcfHistory::new(
            self.fcf
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, &v)| FcfObservation {
                    date: NaiveDate::from_ymd_opt(2019 + i as i32, 9, 30).unwrap(),
                    free_cash_flow: v,
                })
                .collect(),
        ))
    }

    async fn quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        Ok(Quote {
            symbol: ticker.to_string(),
            price: 180.0,
            shares_outstanding: 15.5e9,
        })
    }

    async fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheetSnapshot, MarketDataError> {
        if !self.balance_sheet {
            return Err(MarketDataError::NotFound(ticker.to_string()));
        }
        Ok(BalanceSheetSnapshot {
            date: NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
            cash_and_short_term_investments: Some(61.5e9),
            total_debt: None,
        })
    }
}

fn ticker_args(extra: &[&str]) -> equity_valuator::cli::TickerArgs {
    let mut argv = vec![
        "equity-valuator",
        "ticker",
        "aapl",
        "--seed",
        "42",
        "--simulations",
        "2000",
    ];
    argv.extend_from_slice(extra);
    match Cli::parse_from(argv).command {
        Commands::Ticker(args) => args,
        other => panic!("unexpected command {other:?}"),
    }
}

#[tokio::test]
async fn test_ticker_uses_historical_cagr() {
    let provider = StaticProvider {
        fcf: vec![50e9, 55e9, 60.5e9],
        balance_sheet: true,
    };
    let report = ticker_args(&[]).run(&provider, &Config::default()).await.unwrap();

    assert_eq!(report.ticker.as_deref(), Some("AAPL"));
    assert!((report.params.growth.mean - 0.10).abs() < 1e-12);
    assert_eq!(report.params.last_fcf, 60.5e9);
    assert_eq!(report.params.seed, Some(42));
    assert_eq!(report.undefined.total, 2_000);
    assert!(report.summary.unwrap().upside.is_some());
}

#[tokio::test]
async fn test_ticker_is_reproducible_with_seed() {
    let provider = StaticProvider {
        fcf: vec![50e9, 55e9, 60.5e9, 70e9],
        balance_sheet: true,
    };
    let config = Config::default();
    let a = ticker_args(&[]).run(&provider, &config).await.unwrap();
    let b = ticker_args(&[]).run(&provider, &config).await.unwrap();
    assert_eq!(a.summary, b.summary);
}

#[tokio::test]
async fn test_ticker_requires_three_observations() {
    let provider = StaticProvider {
        fcf: vec![50e9, 55e9],
        balance_sheet: true,
    };
    let err = ticker_args(&[]).run(&provider, &Config::default()).await.unwrap_err();
    let err = err.downcast::<MarketDataError>().unwrap();
    assert!(matches!(
        err,
        MarketDataError::InsufficientHistory { required: 3, found: 2 }
    ));
}

#[tokio::test]
async fn test_ticker_tolerates_missing_balance_sheet() {
    let provider = StaticProvider {
        fcf: vec![50e9, 55e9, 60.5e9],
        balance_sheet: false,
    };
    let report = ticker_args(&["--growth-mean", "0.02"])
        .run(&provider, &Config::default())
        .await
        .unwrap();
    assert_eq!(report.params.growth.mean, 0.02);
    assert!(report.summary.is_some());
}
