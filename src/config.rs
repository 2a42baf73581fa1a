//! Configuration types for equity-valuator

use crate::dcf::NormalParams;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Default Monte Carlo inputs, overridable from the command line
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    /// Fixed seed; absent means a fresh random source per run
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_wacc")]
    pub wacc: NormalParams,
    #[serde(default = "default_terminal_growth")]
    pub terminal_growth: NormalParams,
    /// Standard deviation of yearly growth; the mean comes from history
    #[serde(default = "default_growth_std")]
    pub growth_std: f64,
}

fn default_simulations() -> usize {
    5_000
}
fn default_wacc() -> NormalParams {
    NormalParams::new(0.09, 0.015)
}
fn default_terminal_growth() -> NormalParams {
    NormalParams::new(0.025, 0.005)
}
fn default_growth_std() -> f64 {
    0.06
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulations: default_simulations(),
            seed: None,
            wacc: default_wacc(),
            terminal_growth: default_terminal_growth(),
            growth_std: default_growth_std(),
        }
    }
}

/// Market data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    /// Number of annual statements to request
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_base_url() -> String {
    "https://financialmodelingprep.com/api/v3".to_string()
}
fn default_api_key_env() -> String {
    "FMP_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    3
}
fn default_backoff_ms() -> u64 {
    300
}
fn default_history_limit() -> usize {
    8
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            history_limit: default_history_limit(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Read the API key, loading `.env` first
    pub fn api_key(&self) -> Option<String> {
        dotenvy::dotenv().ok();
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Time-to-live per cached record kind, in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_hour")]
    pub fcf_ttl_secs: u64,
    #[serde(default = "default_quote_ttl")]
    pub quote_ttl_secs: u64,
    #[serde(default = "default_hour")]
    pub balance_sheet_ttl_secs: u64,
}

fn default_hour() -> u64 {
    3_600
}
fn default_quote_ttl() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            fcf_ttl_secs: default_hour(),
            quote_ttl_secs: default_quote_ttl(),
            balance_sheet_ttl_secs: default_hour(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; disabled when absent
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [simulation]
            simulations = 20000
            seed = 42
            growth_std = 0.08

            [simulation.wacc]
            mean = 0.1
            std_dev = 0.02

            [provider]
            base_url = "http://localhost:8080"
            max_retries = 1

            [cache]
            quote_ttl_secs = 60

            [telemetry]
            log_level = "debug"
            log_format = "json"
            metrics_port = 9090
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.simulation.simulations, 20_000);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.wacc, NormalParams::new(0.1, 0.02));
        assert_eq!(config.simulation.terminal_growth, NormalParams::new(0.025, 0.005));
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.max_retries, 1);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.cache.quote_ttl_secs, 60);
        assert_eq!(config.cache.fcf_ttl_secs, 3_600);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(config.telemetry.metrics_port, Some(9090));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.simulation.simulations, 5_000);
        assert!(config.simulation.seed.is_none());
        assert_eq!(config.provider.api_key_env, "FMP_API_KEY");
        assert_eq!(config.provider.backoff(), Duration::from_millis(300));
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.metrics_port.is_none());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nsimulations = 250").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.simulation.simulations, 250);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result: Result<Config, _> = toml::from_str("[telemetry]\nlog_format = \"xml\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_env_lookup() {
        let provider = ProviderConfig {
            api_key_env: "EQUITY_VALUATOR_TEST_KEY_UNSET".to_string(),
            ..ProviderConfig::default()
        };
        assert!(provider.api_key().is_none());
    }
}
