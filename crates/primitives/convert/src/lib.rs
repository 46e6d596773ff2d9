//! Hex conventions shared by every layer of the gateway.
//!
//! Ethereum tooling expects `0x` prefixed lowercase hex everywhere, while the
//! ledger and its chaincode store the same values without a prefix. The
//! helpers in this crate are the only place where one form is turned into the
//! other.

mod fixed;
mod quantity;

pub use fixed::*;
pub use quantity::*;

/// Removes a leading `0x` if there is something after it.
///
/// A bare `"0x"` is returned unchanged, mirroring how the chaincode treats
/// empty hex values.
pub fn strip_0x(value: &str) -> &str {
    match value.strip_prefix("0x") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => value,
    }
}

/// Prefixes `value` with `0x`.
pub fn with_0x(value: impl AsRef<str>) -> String {
    format!("0x{}", value.as_ref())
}

/// Hex-encodes raw bytes and prefixes the result with `0x`.
pub fn bytes_to_hex(bytes: impl AsRef<[u8]>) -> String {
    with_0x(hex::encode(bytes))
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("expected {expected} hex characters, got {got} in {value:?}")]
    InvalidLength { expected: usize, got: usize, value: String },
    #[error("{0:?} is not valid hex")]
    InvalidHex(String),
    #[error("{0:?} is not a valid hex quantity")]
    InvalidQuantity(String),
}
