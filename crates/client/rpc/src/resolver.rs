//! Default block parameter handling.

use std::str::FromStr;

use gp_convert::{parse_quantity, strip_0x};

use crate::{EthRpcApiError, EthRpcResult, EthService, PENDING_UNSUPPORTED};

/// A block reference as accepted by Ethereum methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockRef {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(u64),
}

impl FromStr for BlockRef {
    type Err = EthRpcApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match strip_0x(s) {
            "latest" => Ok(Self::Latest),
            "earliest" => Ok(Self::Earliest),
            "pending" => Ok(Self::Pending),
            number => Ok(Self::Number(parse_quantity(number)?)),
        }
    }
}

impl EthService {
    /// Turns a block reference into a concrete height.
    ///
    /// `latest` costs one chain height query; the latest block is the one
    /// below the height. A ledger without any block has no latest block.
    pub async fn resolve_block(&self, block: BlockRef) -> EthRpcResult<u64> {
        match block {
            BlockRef::Latest => self.chain_height().await?.checked_sub(1).ok_or(EthRpcApiError::NoBlocks),
            BlockRef::Earliest => Ok(0),
            BlockRef::Pending => Err(EthRpcApiError::unimplemented(PENDING_UNSUPPORTED)),
            BlockRef::Number(number) => Ok(number),
        }
    }
}
