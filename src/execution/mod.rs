pub mod dto;
pub mod encoding;
pub mod fetcher;
pub mod implementation;

pub use dto::{FeedReply, FeedResponse, Outcome};
pub use encoding::{decode_u128, encode_u128, parse_price_message};
pub use fetcher::{FeedFetcher, ReqwestFeedFetcher};
pub use implementation::{build_feed_url, execute, ExecutionPhase};
