use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{strip_0x, HexError};

/// A fixed-width byte value exchanged as hex.
///
/// Parsing accepts both the prefixed and the bare form, in any case, but
/// always checks the width. Rendering is always `0x` prefixed lowercase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedHex<const N: usize>([u8; N]);

/// 20-byte account or contract address.
pub type Address = FixedHex<20>;
/// 32-byte log topic.
pub type Topic = FixedHex<32>;

impl<const N: usize> FixedHex<N> {
    /// Number of hex characters of the unprefixed form.
    pub const HEX_LEN: usize = N * 2;

    pub fn parse(value: &str) -> Result<Self, HexError> {
        let stripped = strip_0x(value);
        if stripped.len() != Self::HEX_LEN {
            return Err(HexError::InvalidLength { expected: Self::HEX_LEN, got: stripped.len(), value: value.to_owned() });
        }
        let mut bytes = [0u8; N];
        hex::decode_to_slice(stripped, &mut bytes).map_err(|_| HexError::InvalidHex(value.to_owned()))?;
        Ok(Self(bytes))
    }

    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// The all-zero value. For addresses this is the contract creation sentinel.
    pub const fn zero() -> Self {
        Self([0u8; N])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Lowercase hex without prefix, the form the chaincode stores.
    pub fn to_unprefixed(&self) -> String {
        hex::encode(self.0)
    }

    /// Compares against a hex string as stored by the chaincode. Values that
    /// do not parse never match.
    pub fn matches_hex(&self, other: &str) -> bool {
        Self::parse(other).is_ok_and(|other| other == *self)
    }
}

impl<const N: usize> fmt::Display for FixedHex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl<const N: usize> fmt::Debug for FixedHex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const N: usize> FromStr for FixedHex<N> {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<const N: usize> Serialize for FixedHex<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedHex<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
