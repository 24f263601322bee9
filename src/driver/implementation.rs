use std::time::Duration;

use super::client::{DataRequestNetwork, HttpNetworkClient};
use super::dto::{ConsensusOptions, DataResult, DrId, PostDataRequestInput};
use super::signer::Signer;
use crate::config::{DriverConfig, ValidatedDriverConfig};
use crate::error::{RankError, Result};

/// Submits data requests for the oracle program and waits for their tally.
pub struct RequestDriver<N> {
    config: ValidatedDriverConfig,
    signer: Signer,
    network: N,
}

impl RequestDriver<HttpNetworkClient> {
    /// Validates the configuration before anything touches the network.
    pub fn from_config(config: &DriverConfig) -> Result<Self> {
        let config = config.validate()?;
        let network = HttpNetworkClient::new(&config.rpc_endpoint)?;
        Self::new(config, network)
    }
}

impl<N: DataRequestNetwork> RequestDriver<N> {
    pub fn new(config: ValidatedDriverConfig, network: N) -> Result<Self> {
        let signer = Signer::from_mnemonic(&config.mnemonic)?;
        Ok(Self {
            config,
            signer,
            network,
        })
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Builds the request for `dr_input` with a timestamp memo, then posts and awaits it.
    pub async fn submit(
        &self,
        dr_input: &[u8],
        consensus: ConsensusOptions,
    ) -> Result<DataResult> {
        let memo = chrono::Utc::now().to_rfc3339();
        let input = PostDataRequestInput::new(
            self.config.oracle_program_id.clone(),
            dr_input.to_vec(),
            memo,
            &self.config.gas,
        )
        .with_consensus(consensus);
        self.post_and_await(input).await
    }

    pub async fn post_and_await(&self, input: PostDataRequestInput) -> Result<DataResult> {
        let signed = self.signer.sign(input)?;
        let dr_id = self.network.post_data_request(&signed).await?;
        tracing::info!("Posted data request {}", dr_id);
        self.await_result(&dr_id).await
    }

    pub async fn await_result(&self, dr_id: &DrId) -> Result<DataResult> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(self.config.await_timeout_secs);
        loop {
            if let Some(result) = self.network.get_data_result(dr_id).await? {
                tracing::info!(
                    "Data request {} resolved with exit code {}",
                    dr_id,
                    result.exit_code
                );
                return Ok(result);
            }
            if tokio::time::Instant::now() + interval > deadline {
                return Err(RankError::AwaitTimeout {
                    dr_id: dr_id.to_string(),
                    seconds: self.config.await_timeout_secs,
                });
            }
            tracing::debug!("Data request {} not tallied yet", dr_id);
            tokio::time::sleep(interval).await;
        }
    }
}
