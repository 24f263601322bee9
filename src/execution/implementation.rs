use super::dto::{FeedReply, FeedResponse, Outcome};
use super::encoding::{encode_u128, parse_price_message};
use super::fetcher::{FeedFetcher, ReqwestFeedFetcher};
use crate::config::FeedConfig;
use crate::error::{RankError, Result};
use urlencoding::encode;

/// Joins the feed base URL and the request input.
///
/// The input is appended verbatim unless `escape_input` is set, so callers
/// submitting unescaped text are responsible for it being URL-safe.
pub fn build_feed_url(base: &str, input: &str, escape_input: bool) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    url.push('/');
    if escape_input {
        url.push_str(&encode(input));
    } else {
        url.push_str(input);
    }
    url
}

/// Single-shot execution phase: one input, one fetch, one outcome.
pub struct ExecutionPhase<F> {
    config: FeedConfig,
    fetcher: F,
}

impl ExecutionPhase<ReqwestFeedFetcher> {
    pub fn from_config(config: FeedConfig) -> Result<Self> {
        let fetcher = ReqwestFeedFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: FeedFetcher> ExecutionPhase<F> {
    pub fn new(config: FeedConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Never fails: every error is folded into `Outcome::Error`.
    pub async fn execute(&self, request_input: &[u8]) -> Outcome {
        match self.try_execute(request_input).await {
            Ok(price) => {
                tracing::info!("Reporting price {}", price);
                Outcome::Success(encode_u128(price))
            }
            Err(err) => {
                tracing::debug!("Execution failed: {}", err);
                Outcome::error_message(err.outcome_message())
            }
        }
    }

    async fn try_execute(&self, request_input: &[u8]) -> Result<u128> {
        let input = std::str::from_utf8(request_input)
            .map_err(|_| RankError::InvalidInput("not valid UTF-8".to_string()))?;
        tracing::info!("Fetching price for pair: {}", input);

        let base_url = self.config.require_base_url()?;
        let url = build_feed_url(base_url, input, self.config.escape_input);

        let reply = match self.fetcher.get(&url).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("HTTP request to price feed failed: {}", err);
                return Err(RankError::FetchFailed(err.to_string()));
            }
        };
        if !reply.is_success() {
            let body = reply.body_text();
            tracing::error!("HTTP Response was rejected: {} - {}", reply.status, body);
            return Err(RankError::FetchRejected {
                status: reply.status,
                body,
            });
        }

        let message = extract_message(&reply)?;
        parse_price_message(&message)
    }
}

fn extract_message(reply: &FeedReply) -> Result<String> {
    let data: FeedResponse = serde_json::from_slice(&reply.body).map_err(|e| {
        tracing::error!("Price feed returned a malformed body: {}", e);
        RankError::MalformedResponse(e.to_string())
    })?;
    match data.message {
        Some(message) if !message.is_empty() => Ok(message),
        other => Err(RankError::MissingOrEmptyMessage {
            message: other.unwrap_or_default(),
        }),
    }
}

/// Runs one execution against the live feed named by `config`.
pub async fn execute(request_input: &[u8], config: &FeedConfig) -> Outcome {
    match ExecutionPhase::from_config(config.clone()) {
        Ok(phase) => phase.execute(request_input).await,
        Err(err) => {
            tracing::error!("{}", err);
            Outcome::error_message(err.outcome_message())
        }
    }
}
