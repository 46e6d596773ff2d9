//! Ethereum JSON-RPC server API implementation
//!
//! Every method is answered by translating it into at most a couple of ledger
//! calls through [`LedgerClient`], then shaping the ledger data into the
//! Ethereum reply. Nothing is cached: the ledger is the only state.

mod dispatch;
mod errors;
pub mod filter;
pub mod methods;
pub mod resolver;
mod shape;
#[cfg(test)]
pub mod test_utils;
pub mod utils;

use std::sync::Arc;

use gc_ledger::{Invocation, LedgerClient};
use gp_convert::Address;
use gp_ledger::{Block, DecodedTransaction};
use utils::ResultExt;

pub use dispatch::{dispatch_key, rpc_module, wire_name, METHOD_TABLE};
pub use errors::{EthRpcApiError, EthRpcResult, PENDING_UNSUPPORTED};

/// Chaincode the EVM runs in, unless configured otherwise.
pub const DEFAULT_CHAINCODE_ID: &str = "evmcc";
/// Hex of `fabric-evm`.
pub const DEFAULT_NETWORK_ID: &str = "0x6661627269632d65766d";

#[derive(Clone, Debug)]
pub struct EthConfig {
    pub chaincode: String,
    /// Returned verbatim by `net_version`.
    pub network_id: String,
}

impl Default for EthConfig {
    fn default() -> Self {
        Self { chaincode: DEFAULT_CHAINCODE_ID.to_owned(), network_id: DEFAULT_NETWORK_ID.to_owned() }
    }
}

/// An Ethereum RPC server backed by the ledger
#[derive(Clone)]
pub struct EthService {
    ledger: Arc<dyn LedgerClient>,
    config: Arc<EthConfig>,
}

impl EthService {
    pub fn new(ledger: Arc<dyn LedgerClient>, config: EthConfig) -> Self {
        Self { ledger, config: Arc::new(config) }
    }

    pub fn config(&self) -> &EthConfig {
        &self.config
    }

    /// Callee used when a transaction has no `to`: the zero address, which
    /// the chaincode treats as a contract deployment.
    pub fn zero_address() -> String {
        Address::zero().to_unprefixed()
    }

    pub(crate) async fn query(&self, function: &str, args: Vec<Vec<u8>>) -> EthRpcResult<Vec<u8>> {
        self.ledger.query(&self.config.chaincode, function, args).await.or_ledger_query_error()
    }

    pub(crate) async fn execute(&self, function: &str, args: Vec<Vec<u8>>) -> EthRpcResult<Invocation> {
        self.ledger.execute(&self.config.chaincode, function, args).await.or_ledger_execute_error()
    }

    pub(crate) async fn chain_height(&self) -> EthRpcResult<u64> {
        self.ledger.query_chain_height().await.or_ledger_query_error()
    }

    pub(crate) async fn block_by_number(&self, number: u64) -> EthRpcResult<Block> {
        self.ledger.query_block_by_height(number).await.or_ledger_query_error()
    }

    /// Fetches the block holding `tx_id` and decodes the transaction out of it.
    ///
    /// Returns the block, the position of the transaction in it and the
    /// decoded transaction.
    pub(crate) async fn find_transaction(&self, tx_id: &str) -> EthRpcResult<(Block, usize, DecodedTransaction)> {
        let block = self.ledger.query_block_by_transaction_id(tx_id).await.or_ledger_query_error()?;
        let (index, transaction) = block.find_transaction(tx_id)?.ok_or(EthRpcApiError::TxnNotFound)?;
        Ok((block, index, transaction))
    }
}
