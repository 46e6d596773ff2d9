//! Access to the ledger through its HTTP gateway.
//!
//! The gateway owns the signing identity and the network connection; this
//! crate only speaks its REST contract. [`LedgerClient`] is the seam the
//! rpc layer depends on, so tests can swap in a mock.

mod error;
mod http;

pub use error::LedgerError;
pub use http::{HttpLedgerClient, LedgerConfig};

use async_trait::async_trait;
use gp_ledger::Block;

/// Outcome of a submitted transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub transaction_id: String,
    pub payload: Vec<u8>,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Evaluates a chaincode function without committing anything.
    async fn query(&self, chaincode: &str, function: &str, args: Vec<Vec<u8>>) -> Result<Vec<u8>, LedgerError>;

    /// Endorses, orders and waits for the commit of a chaincode invocation.
    async fn execute(&self, chaincode: &str, function: &str, args: Vec<Vec<u8>>) -> Result<Invocation, LedgerError>;

    /// Number of committed blocks. The latest block is `height - 1`.
    async fn query_chain_height(&self) -> Result<u64, LedgerError>;

    async fn query_block_by_height(&self, number: u64) -> Result<Block, LedgerError>;

    async fn query_block_by_transaction_id(&self, tx_id: &str) -> Result<Block, LedgerError>;
}
