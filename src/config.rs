use crate::error::{RankError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    pub feed: FeedConfig,
    pub driver: DriverConfig,
}

/// Settings injected into the execution phase. The worker never reads the
/// process environment itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: Option<String>,
    // None leaves the fetch unbounded; the host is expected to kill stalled runs
    pub timeout_secs: Option<u64>,
    pub escape_input: bool,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    pub oracle_program_id: Option<String>,
    pub mnemonic: Option<String>,
    pub rpc_endpoint: Option<String>,
    pub poll_interval_ms: u64,
    pub await_timeout_secs: u64,
    pub gas: GasConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasConfig {
    pub replication_factor: u16,
    pub gas_price: u64,
    pub exec_gas_limit: u64,
    pub tally_gas_limit: u64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                base_url: None,
                timeout_secs: None,
                escape_input: false,
                user_agent: "rank-oracle/0.1.0".to_string(),
            },
            driver: DriverConfig {
                oracle_program_id: None,
                mnemonic: None,
                rpc_endpoint: None,
                poll_interval_ms: 1_000,
                await_timeout_secs: 120,
                gas: GasConfig {
                    replication_factor: 1,
                    gas_price: 2_000,
                    exec_gas_limit: 300_000_000_000_000,
                    tally_gas_limit: 150_000_000_000_000,
                },
            },
        }
    }
}

impl FeedConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..RankConfig::default().feed
        }
    }

    pub fn require_base_url(&self) -> Result<&str> {
        match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(RankError::config_error(
                "Please set RANK_API_URL to the price feed base URL",
            )),
        }
    }
}

/// Driver settings after validation, with every required value present.
#[derive(Debug, Clone)]
pub struct ValidatedDriverConfig {
    pub oracle_program_id: String,
    pub mnemonic: String,
    pub rpc_endpoint: String,
    pub poll_interval_ms: u64,
    pub await_timeout_secs: u64,
    pub gas: GasConfig,
}

impl DriverConfig {
    /// Fails before any network call when the program id or credentials are absent.
    pub fn validate(&self) -> Result<ValidatedDriverConfig> {
        let oracle_program_id = non_empty(self.oracle_program_id.as_deref()).ok_or_else(|| {
            RankError::config_error("Please set the RANK_ORACLE_PROGRAM_ID in your env file")
        })?;
        let mnemonic = non_empty(self.mnemonic.as_deref())
            .ok_or_else(|| RankError::config_error("Please set SEDA_MNEMONIC in your env file"))?;
        let rpc_endpoint = non_empty(self.rpc_endpoint.as_deref()).ok_or_else(|| {
            RankError::config_error("Please set SEDA_RPC_ENDPOINT in your env file")
        })?;
        if self.poll_interval_ms == 0 {
            return Err(RankError::config_error(
                "RANK_POLL_INTERVAL_MS must be greater than zero",
            ));
        }

        Ok(ValidatedDriverConfig {
            oracle_program_id,
            mnemonic,
            rpc_endpoint,
            poll_interval_ms: self.poll_interval_ms,
            await_timeout_secs: self.await_timeout_secs,
            gas: self.gas.clone(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RankError::config_error(format!("Invalid {}", name))),
        Err(_) => Ok(None),
    }
}

impl RankConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.feed.base_url = std::env::var("RANK_API_URL").ok();
        config.feed.timeout_secs = parse_env("RANK_FEED_TIMEOUT_SECS")?;
        if let Ok(escape) = std::env::var("RANK_ESCAPE_INPUT") {
            config.feed.escape_input =
                matches!(escape.as_str(), "1" | "true" | "TRUE" | "yes" | "on");
        }
        if let Ok(user_agent) = std::env::var("RANK_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.feed.user_agent = user_agent;
            }
        }

        config.driver.oracle_program_id = std::env::var("RANK_ORACLE_PROGRAM_ID").ok();
        config.driver.mnemonic = std::env::var("SEDA_MNEMONIC").ok();
        config.driver.rpc_endpoint = std::env::var("SEDA_RPC_ENDPOINT").ok();
        if let Some(interval) = parse_env("RANK_POLL_INTERVAL_MS")? {
            config.driver.poll_interval_ms = interval;
        }
        if let Some(timeout) = parse_env("RANK_AWAIT_TIMEOUT_SECS")? {
            config.driver.await_timeout_secs = timeout;
        }
        if let Some(factor) = parse_env("RANK_REPLICATION_FACTOR")? {
            config.driver.gas.replication_factor = factor;
        }
        if let Some(price) = parse_env("RANK_GAS_PRICE")? {
            config.driver.gas.gas_price = price;
        }
        if let Some(limit) = parse_env("RANK_EXEC_GAS_LIMIT")? {
            config.driver.gas.exec_gas_limit = limit;
        }
        if let Some(limit) = parse_env("RANK_TALLY_GAS_LIMIT")? {
            config.driver.gas.tally_gas_limit = limit;
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RankError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: RankConfig = toml::from_str(&content)
            .map_err(|e| RankError::config_error(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
