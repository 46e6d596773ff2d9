use std::sync::Arc;

use gc_ledger::{LedgerError, MockLedgerClient};
use gp_ledger::testing::{config_envelope, BlockBuilder, EnvelopeBuilder};
use gp_ledger::{Block, EventRecord};
use rstest::fixture;

use crate::{EthConfig, EthService};

pub type TestLedger = MockLedgerClient;

pub const ZERO_ADDRESS: &str = "0000000000000000000000000000000000000000";
/// Contract deployed in block 1 of the sample chain.
pub const CONTRACT: &str = "82373458164820947891abcdefabcdefabcdefab";
pub const OTHER_CONTRACT: &str = "1111111111111111111111111111111111111111";
pub const BYTECODE: &str = "6060604052";

pub const TOPIC_TRANSFER: &str = "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";
pub const TOPIC_FROM: &str = "000000000000000000000000000000000000000000000000000000000000000a";
pub const TOPIC_APPROVAL: &str = "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925";

pub const TX_DEPLOY: &str = "d3f1";
pub const TX_INVOKE: &str = "a11c";
pub const TX_REJECTED: &str = "bad0";
pub const TX_LATER: &str = "1a7e";
pub const TX_GET_CODE: &str = "c0de";
pub const TX_FOREIGN: &str = "f0e1";

/// Validation code of a transaction which failed MVCC checks.
pub const MVCC_READ_CONFLICT: u8 = 11;

pub fn rpc_test_setup(ledger: TestLedger) -> EthService {
    EthService::new(Arc::new(ledger), EthConfig::default())
}

pub fn event(address: &str, topics: &[&str], data: &str) -> EventRecord {
    EventRecord {
        address: address.to_owned(),
        topics: topics.iter().map(|topic| topic.to_string()).collect(),
        data: data.to_owned(),
    }
}

pub fn events_payload(events: &[EventRecord]) -> Vec<u8> {
    serde_json::to_vec(events).unwrap()
}

pub struct SampleChain {
    pub blocks: Vec<Block>,
}

/// A small chain:
///
/// - block 0: channel configuration
/// - block 1: deployment of [CONTRACT]
/// - block 2: a valid call of [CONTRACT] emitting two events, an empty slot,
///   then a rejected call of [OTHER_CONTRACT] which emitted one event
/// - block 3: another call of [CONTRACT], then a `getCode` lookup
#[fixture]
pub fn sample_chain() -> SampleChain {
    let genesis = BlockBuilder::new(0).transaction(config_envelope("genesis"), 0).build();

    let deploy = EnvelopeBuilder::new(TX_DEPLOY).args([ZERO_ADDRESS, BYTECODE]).response(CONTRACT).build();
    let block_1 = BlockBuilder::new(1).transaction(deploy, 0).build();

    let invoke = EnvelopeBuilder::new(TX_INVOKE)
        .args([CONTRACT, "a9059cbb"])
        .response(b"\x01")
        .event_records(events_payload(&[
            event(CONTRACT, &[TOPIC_TRANSFER, TOPIC_FROM], "01"),
            event(CONTRACT, &[TOPIC_APPROVAL], "02"),
        ]))
        .build();
    let rejected = EnvelopeBuilder::new(TX_REJECTED)
        .args([OTHER_CONTRACT, "00"])
        .event_records(events_payload(&[event(OTHER_CONTRACT, &[TOPIC_TRANSFER], "03")]))
        .build();
    let block_2 = BlockBuilder::new(2).transaction(invoke, 0).empty_slot().transaction(rejected, MVCC_READ_CONFLICT).build();

    let later = EnvelopeBuilder::new(TX_LATER)
        .args([CONTRACT, "deadbeef"])
        .event_records(events_payload(&[event(CONTRACT, &[TOPIC_TRANSFER], "04")]))
        .build();
    let get_code = EnvelopeBuilder::new(TX_GET_CODE).args(["getCode", CONTRACT]).response(BYTECODE).build();
    let block_3 = BlockBuilder::new(3).transaction(later, 0).transaction(get_code, 0).build();

    SampleChain { blocks: vec![genesis, block_1, block_2, block_3] }
}

/// Genesis, then one block where a valid invocation of another chaincode
/// with binary arguments precedes a call of [CONTRACT] emitting one event.
#[fixture]
pub fn shared_channel_chain() -> SampleChain {
    let genesis = BlockBuilder::new(0).transaction(config_envelope("genesis"), 0).build();

    let foreign = EnvelopeBuilder::new(TX_FOREIGN).args([vec![0xff, 0xfe], vec![0x00]]).build();
    let invoke = EnvelopeBuilder::new(TX_INVOKE)
        .args([CONTRACT, "a9059cbb"])
        .event_records(events_payload(&[event(CONTRACT, &[TOPIC_TRANSFER, TOPIC_FROM], "01")]))
        .build();
    let block_1 = BlockBuilder::new(1).transaction(foreign, 0).transaction(invoke, 0).build();

    SampleChain { blocks: vec![genesis, block_1] }
}

fn missing(what: String) -> LedgerError {
    LedgerError::InvalidResponse { endpoint: "test".to_owned(), message: what }
}

impl SampleChain {
    /// Serves the chain height and block lookups from this chain, any
    /// number of times.
    pub fn serve(&self, ledger: &mut TestLedger) {
        let height = self.blocks.len() as u64;
        ledger.expect_query_chain_height().returning(move || Ok(height));

        let blocks = self.blocks.clone();
        ledger.expect_query_block_by_height().returning(move |number| {
            blocks.get(number as usize).cloned().ok_or_else(|| missing(format!("no block {number}")))
        });

        let blocks = self.blocks.clone();
        ledger.expect_query_block_by_transaction_id().returning(move |tx_id| {
            blocks
                .iter()
                .find(|block| block.find_transaction(tx_id).ok().flatten().is_some())
                .cloned()
                .ok_or_else(|| missing(format!("no transaction {tx_id}")))
        });
    }

    pub fn ledger(&self) -> TestLedger {
        let mut ledger = TestLedger::new();
        self.serve(&mut ledger);
        ledger
    }

    pub fn block_hash(number: u64) -> String {
        gp_convert::bytes_to_hex(BlockBuilder::data_hash_for(number))
    }
}
