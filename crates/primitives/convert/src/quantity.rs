use crate::HexError;

/// Encodes an integer as an Ethereum quantity (`0x` prefixed, no leading zeros).
pub fn to_quantity(value: u64) -> String {
    format!("0x{value:x}")
}

/// Parses a base-16 integer. The `0x` prefix must already be stripped.
pub fn parse_quantity(value: &str) -> Result<u64, HexError> {
    u64::from_str_radix(value, 16).map_err(|_| HexError::InvalidQuantity(value.to_owned()))
}
