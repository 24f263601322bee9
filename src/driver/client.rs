use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::dto::{DataResult, DrId, PostDataRequestResponse, SignedDataRequest};
use crate::error::{RankError, Result};

/// Network operations the driver needs: submit, then look up the tally.
#[async_trait]
pub trait DataRequestNetwork: Send + Sync {
    async fn post_data_request(&self, request: &SignedDataRequest) -> Result<DrId>;

    /// `None` while the request has not been tallied yet.
    async fn get_data_result(&self, dr_id: &DrId) -> Result<Option<DataResult>>;
}

#[derive(Clone)]
pub struct HttpNetworkClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpNetworkClient {
    pub fn new(rpc_endpoint: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("rank-oracle/0.1.0")
            .build()
            .map_err(|e| RankError::config_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: rpc_endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataRequestNetwork for HttpNetworkClient {
    async fn post_data_request(&self, request: &SignedDataRequest) -> Result<DrId> {
        let resp = self
            .http
            .post(self.url("data-requests"))
            .json(request)
            .send()
            .await
            .map_err(RankError::NetworkError)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RankError::api_error(format!(
                "data request submission rejected: status={} body={}",
                status, body
            )));
        }
        let posted: PostDataRequestResponse = resp.json().await.map_err(RankError::NetworkError)?;
        tracing::debug!(
            "Data request {} accepted at height {:?}",
            posted.dr_id,
            posted.height
        );
        Ok(posted.dr_id)
    }

    async fn get_data_result(&self, dr_id: &DrId) -> Result<Option<DataResult>> {
        let resp = self
            .http
            .get(self.url(&format!("data-requests/{}/result", dr_id)))
            .send()
            .await
            .map_err(RankError::NetworkError)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let result = resp
            .error_for_status()
            .map_err(RankError::NetworkError)?
            .json::<DataResult>()
            .await
            .map_err(RankError::NetworkError)?;
        Ok(Some(result))
    }
}
