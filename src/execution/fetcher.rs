use super::dto::FeedReply;
use crate::config::FeedConfig;
use crate::error::{RankError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Issues the single outbound GET of an execution.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Returns the reply for any HTTP status; `Err` only when no reply arrived.
    async fn get(&self, url: &str) -> Result<FeedReply>;
}

#[derive(Clone)]
pub struct ReqwestFeedFetcher {
    http: reqwest::Client,
}

impl ReqwestFeedFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| {
            RankError::config_error(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl FeedFetcher for ReqwestFeedFetcher {
    async fn get(&self, url: &str) -> Result<FeedReply> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(RankError::NetworkError)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(RankError::NetworkError)?;
        Ok(FeedReply {
            status,
            body: body.to_vec(),
        })
    }
}
