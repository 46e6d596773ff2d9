use gp_convert::{bytes_to_hex, strip_0x, to_quantity, with_0x, Address, Topic};
use gp_ledger::{Block, DecodedTransaction, EventRecord};
use gp_rpc::{Bloom, Log, Transaction};

use crate::EthRpcResult;

/// Header fields of a block, as rendered in replies.
pub(crate) struct BlockInfo {
    pub number: String,
    pub hash: String,
    pub parent_hash: String,
}

impl BlockInfo {
    /// The data hash of a block stands in for its hash.
    pub fn of(block: &Block) -> EthRpcResult<Self> {
        Ok(Self {
            number: to_quantity(block.number()?),
            hash: bytes_to_hex(block.data_hash()?),
            parent_hash: bytes_to_hex(block.previous_hash()?),
        })
    }
}

/// Where a transaction sits in the chain.
pub(crate) struct TxLocation<'a> {
    pub block: &'a BlockInfo,
    pub hash: String,
    pub index: String,
}

impl<'a> TxLocation<'a> {
    pub fn new(block: &'a BlockInfo, tx_id: &str, index: usize) -> Self {
        Self { block, hash: with_0x(tx_id), index: to_quantity(index as u64) }
    }

    /// `log_index` is the position of the event among those the
    /// transaction emitted.
    pub fn log(&self, event: &EventRecord, log_index: usize) -> Log {
        Log {
            address: with_0x(strip_0x(&event.address)),
            topics: event.topics.iter().map(|topic| with_0x(strip_0x(topic))).collect(),
            data: with_0x(strip_0x(&event.data)),
            block_number: self.block.number.clone(),
            transaction_hash: self.hash.clone(),
            transaction_index: self.index.clone(),
            block_hash: self.block.hash.clone(),
            log_index: to_quantity(log_index as u64),
        }
    }

    /// Only EVM calls carry a callee and input. Deployments have no `to`.
    pub fn transaction(&self, transaction: &DecodedTransaction) -> Transaction {
        let call = transaction.call.as_ref();
        Transaction {
            block_hash: self.block.hash.clone(),
            block_number: self.block.number.clone(),
            to: call.filter(|call| !call.callee.is_empty() && !call.is_contract_creation()).map(|call| with_0x(&call.callee)),
            input: call.filter(|call| !call.input.is_empty()).map(|call| with_0x(&call.input)),
            transaction_index: self.index.clone(),
            hash: self.hash.clone(),
        }
    }
}

/// Bloom of the emitters and topics of `events`. Values which are not
/// well-formed hex are left out.
pub(crate) fn logs_bloom(events: &[EventRecord]) -> Bloom {
    let mut bloom = Bloom::default();
    for event in events {
        if let Ok(address) = Address::parse(&event.address) {
            bloom.accrue(address.as_bytes());
        }
        for topic in event.topics.iter().filter_map(|topic| Topic::parse(topic).ok()) {
            bloom.accrue(topic.as_bytes());
        }
    }
    bloom
}
