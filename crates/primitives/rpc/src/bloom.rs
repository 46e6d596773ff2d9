use std::fmt;

use serde::{Serialize, Serializer};
use sha3::{Digest, Keccak256};

pub const BLOOM_BYTES: usize = 256;

/// 2048-bit log bloom filter.
///
/// Each accrued value sets three bits, taken from the first six bytes of its
/// keccak256 hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Bloom([u8; BLOOM_BYTES]);

impl Default for Bloom {
    fn default() -> Self {
        Self([0; BLOOM_BYTES])
    }
}

impl Bloom {
    pub fn accrue(&mut self, value: &[u8]) {
        for (byte, mask) in Self::positions(value) {
            self.0[byte] |= mask;
        }
    }

    /// May report false positives, never false negatives.
    pub fn contains(&self, value: &[u8]) -> bool {
        Self::positions(value).into_iter().all(|(byte, mask)| self.0[byte] & mask != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; BLOOM_BYTES] {
        &self.0
    }

    fn positions(value: &[u8]) -> [(usize, u8); 3] {
        let hash = Keccak256::digest(value);
        [0, 2, 4].map(|i| {
            let bit = ((usize::from(hash[i]) << 8) | usize::from(hash[i + 1])) & 2047;
            (BLOOM_BYTES - 1 - bit / 8, 1u8 << (bit % 8))
        })
    }
}

impl fmt::Display for Bloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Bloom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
