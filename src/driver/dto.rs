use serde::{Deserialize, Serialize};

use crate::config::GasConfig;

pub const DATA_REQUEST_VERSION: &str = "0.0.1";

/// How the network reconciles the reports of several executors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ConsensusOptions {
    #[default]
    None,
    Mode {
        json_path: String,
    },
    StdDev {
        json_path: String,
        max_sigma: f64,
        number_type: String,
    },
}

/// Unsigned data request as the driver assembles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDataRequestInput {
    pub version: String,
    pub exec_program_id: String,
    #[serde(with = "hex")]
    pub exec_inputs: Vec<u8>,
    pub exec_gas_limit: u64,
    pub tally_program_id: String,
    #[serde(with = "hex")]
    pub tally_inputs: Vec<u8>,
    pub tally_gas_limit: u64,
    pub replication_factor: u16,
    pub consensus_options: ConsensusOptions,
    pub gas_price: String,
    #[serde(with = "hex")]
    pub memo: Vec<u8>,
}

impl PostDataRequestInput {
    /// Request for one execution of `program_id` with `exec_inputs`, no tally
    /// inputs, and the given memo. The tally runs the same program.
    pub fn new(
        program_id: impl Into<String>,
        exec_inputs: impl Into<Vec<u8>>,
        memo: impl Into<Vec<u8>>,
        gas: &GasConfig,
    ) -> Self {
        let program_id = program_id.into();
        Self {
            version: DATA_REQUEST_VERSION.to_string(),
            exec_program_id: program_id.clone(),
            exec_inputs: exec_inputs.into(),
            exec_gas_limit: gas.exec_gas_limit,
            tally_program_id: program_id,
            tally_inputs: Vec::new(),
            tally_gas_limit: gas.tally_gas_limit,
            replication_factor: gas.replication_factor,
            consensus_options: ConsensusOptions::None,
            gas_price: gas.gas_price.to_string(),
            memo: memo.into(),
        }
    }

    pub fn with_consensus(mut self, consensus_options: ConsensusOptions) -> Self {
        self.consensus_options = consensus_options;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedDataRequest {
    pub request: PostDataRequestInput,
    pub public_key: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrId(pub String);

impl std::fmt::Display for DrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostDataRequestResponse {
    pub dr_id: DrId,
    #[serde(default)]
    pub height: Option<u64>,
}

/// Tallied outcome of a data request as reported by the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResult {
    pub dr_id: DrId,
    pub exit_code: u8,
    #[serde(with = "hex")]
    pub result: Vec<u8>,
    pub block_height: u64,
    pub gas_used: String,
    pub consensus: bool,
    #[serde(default)]
    pub payback_address: Option<String>,
}
