use serde::{Deserialize, Serialize};

/// A log entry, as found in receipts and `eth_getLogs` results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: String,
    pub transaction_hash: String,
    pub transaction_index: String,
    pub block_hash: String,
    /// Position of the log within its transaction.
    pub log_index: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub transaction_index: String,
    pub block_hash: String,
    pub block_number: String,
    /// Set only for contract creations.
    pub contract_address: Option<String>,
    pub gas_used: String,
    pub cumulative_gas_used: String,
    /// Unset for contract creations.
    pub to: Option<String>,
    pub logs: Vec<Log>,
    pub logs_bloom: String,
    /// `0x1` when the ledger committed the transaction as valid, `0x0` otherwise.
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub block_hash: String,
    pub block_number: String,
    pub to: Option<String>,
    pub input: Option<String>,
    pub transaction_index: String,
    pub hash: String,
}

/// Transactions of a block, either as hashes or fully shaped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<String>),
    Full(Vec<Transaction>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: String,
    pub hash: String,
    pub parent_hash: String,
    pub transactions: BlockTransactions,
}
