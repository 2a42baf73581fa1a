//! Financial Modeling Prep API client
//!
//! Fetches annual cash flow statements, quotes and balance sheets. GET
//! requests are retried with exponential backoff on throttling and server
//! errors.

use super::{
    BalanceSheetSnapshot, FcfHistory, FcfObservation, MarketDataError, MarketDataProvider, Quote,
};
use crate::config::ProviderConfig;
use crate::telemetry::{self, RequestOutcome};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Status codes worth retrying
const RETRYABLE: [u16; 5] = [429, 500, 502, 503, 504];

/// Client for the FMP v3 REST API
pub struct FmpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_retries: u32,
    backoff: Duration,
}

impl FmpClient {
    /// Create a client from provider configuration
    pub fn new(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "API key not set; requests may fail"
            );
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_retries: config.max_retries,
            backoff: config.backoff(),
        })
    }

    /// GET `path` and decode the JSON body, retrying transient failures
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut query: Vec<(&str, String)> = params.to_vec();
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.clone()));
        }

        let mut attempt = 0;
        loop {
            tracing::debug!(url = %url, attempt, "Fetching from FMP");
            let result = self.client.get(&url).query(&query).send().await;

            let retryable = match &result {
                Ok(response) => RETRYABLE.contains(&response.status().as_u16()),
                Err(e) => e.is_timeout() || e.is_connect(),
            };
            if retryable && attempt < self.max_retries {
                telemetry::record_request(endpoint, RequestOutcome::Retried);
                let delay = backoff_delay(self.backoff, attempt);
                tracing::debug!(
                    url = %url,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying request"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let response = match result {
                Ok(r) => r,
                Err(e) => {
                    telemetry::record_request(endpoint, RequestOutcome::Failed);
                    return Err(e.into());
                }
            };

            let status = response.status();
            if status != StatusCode::OK {
                telemetry::record_request(endpoint, RequestOutcome::Failed);
                let body = response.text().await.unwrap_or_default();
                return Err(MarketDataError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await?;
            telemetry::record_request(endpoint, RequestOutcome::Success);
            return Ok(serde_json::from_str(&body)?);
        }
    }
}

#[async_trait]
impl MarketDataProvider for FmpClient {
    async fn fcf_history(&self, ticker: &str, limit: usize) -> Result<FcfHistory, MarketDataError> {
        let rows: Vec<CashFlowRow> = self
            .get(
                "cash_flow_statement",
                &format!("cash-flow-statement/{ticker}"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(fcf_history_from_rows(rows))
    }

    async fn quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        let rows: Vec<QuoteRow> = self.get("quote", &format!("quote/{ticker}"), &[]).await?;
        quote_from_rows(ticker, rows)
    }

    async fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheetSnapshot, MarketDataError> {
        let rows: Vec<BalanceSheetRow> = self
            .get(
                "balance_sheet_statement",
                &format!("balance-sheet-statement/{ticker}"),
                &[("limit", "1".to_string())],
            )
            .await?;
        balance_sheet_from_rows(ticker, rows)
    }
}

/// FMP cash flow statement row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashFlowRow {
    date: NaiveDate,
    free_cash_flow: Option<f64>,
}

/// FMP quote row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRow {
    symbol: String,
    price: Option<f64>,
    shares_outstanding: Option<f64>,
}

/// FMP balance sheet row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceSheetRow {
    date: NaiveDate,
    cash_and_short_term_investments: Option<f64>,
    total_debt: Option<f64>,
}

/// `base * 2^attempt`, saturating for large retry counts
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

fn fcf_history_from_rows(rows: Vec<CashFlowRow>) -> FcfHistory {
    FcfHistory::new(
        rows.into_iter()
            .filter_map(|r| {
                Some(FcfObservation {
                    date: r.date,
                    free_cash_flow: r.free_cash_flow.filter(|v| v.is_finite())?,
                })
            })
            .collect(),
    )
}

fn quote_from_rows(ticker: &str, rows: Vec<QuoteRow>) -> Result<Quote, MarketDataError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::NotFound(ticker.to_string()))?;
    let missing = |field| MarketDataError::MissingField {
        ticker: ticker.to_string(),
        field,
    };
    Ok(Quote {
        price: row.price.ok_or_else(|| missing("price"))?,
        shares_outstanding: row
            .shares_outstanding
            .ok_or_else(|| missing("sharesOutstanding"))?,
        symbol: row.symbol,
    })
}

fn balance_sheet_from_rows(
    ticker: &str,
    rows: Vec<BalanceSheetRow>,
) -> Result<BalanceSheetSnapshot, MarketDataError> {
    let latest = rows
        .into_iter()
        .max_by_key(|r| r.date)
        .ok_or_else(|| MarketDataError::NotFound(ticker.to_string()))?;
    Ok(BalanceSheetSnapshot {
        date: latest.date,
        cash_and_short_term_investments: latest.cash_and_short_term_investments,
        total_debt: latest.total_debt,
    })
}
