//! Fixed-width result encoding shared by the worker and anything reading its results.

use crate::error::{RankError, Result};

pub const U128_WIDTH: usize = 16;

/// Little-endian, 16 bytes.
pub fn encode_u128(value: u128) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn decode_u128(bytes: &[u8]) -> Result<u128> {
    let raw: [u8; U128_WIDTH] = bytes.try_into().map_err(|_| {
        RankError::api_error(format!(
            "expected {} result bytes, got {}",
            U128_WIDTH,
            bytes.len()
        ))
    })?;
    Ok(u128::from_le_bytes(raw))
}

/// Parses the feed's decimal text. Digits only: no sign, whitespace or fraction.
pub fn parse_price_message(message: &str) -> Result<u128> {
    let conversion_error = || RankError::NumericConversion {
        message: message.to_string(),
    };
    if message.is_empty() || !message.bytes().all(|b| b.is_ascii_digit()) {
        return Err(conversion_error());
    }
    message.parse::<u128>().map_err(|_| conversion_error())
}
