pub mod client;
pub mod display;
pub mod dto;
pub mod implementation;
pub mod signer;

pub use client::{DataRequestNetwork, HttpNetworkClient};
pub use display::render_table;
pub use dto::{ConsensusOptions, DataResult, DrId, PostDataRequestInput, SignedDataRequest};
pub use implementation::RequestDriver;
pub use signer::Signer;
