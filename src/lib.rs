pub mod config;
pub mod driver;
pub mod error;
pub mod execution;
pub mod host;

pub use config::{FeedConfig, RankConfig};
pub use driver::RequestDriver;
pub use error::{RankError, Result};
pub use execution::{execute, ExecutionPhase, Outcome};
