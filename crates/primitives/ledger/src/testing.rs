//! Builders producing serialized ledger structures, shaped the way the
//! companion chaincode and the ordering service produce them.

use prost::Message;

use crate::proto::{
    Block, BlockData, BlockHeader, BlockMetadata, ChaincodeAction, ChaincodeActionPayload, ChaincodeEndorsedAction,
    ChaincodeEvent, ChaincodeId, ChaincodeInput, ChaincodeInvocationSpec, ChaincodeProposalPayload, ChaincodeSpec,
    ChannelHeader, Envelope, Header, Payload, ProposalResponsePayload, Response, Transaction, TransactionAction,
    HEADER_TYPE_CONFIG, HEADER_TYPE_ENDORSER_TRANSACTION,
};

pub const TEST_CHANNEL: &str = "mychannel";
pub const TEST_CHAINCODE: &str = "evmcc";

/// Serializes a chaincode event carrying `payload`, a JSON array of event records.
pub fn chaincode_event(payload: impl AsRef<[u8]>) -> Vec<u8> {
    ChaincodeEvent {
        chaincode_id: TEST_CHAINCODE.to_owned(),
        tx_id: String::new(),
        event_name: "Chaincode event".to_owned(),
        payload: payload.as_ref().to_vec(),
    }
    .encode_to_vec()
}

fn envelope(header_type: i32, tx_id: &str, data: Vec<u8>) -> Vec<u8> {
    let channel_header = ChannelHeader {
        r#type: header_type,
        version: 0,
        channel_id: TEST_CHANNEL.to_owned(),
        tx_id: tx_id.to_owned(),
        epoch: 0,
    };
    let payload = Payload {
        header: Some(Header { channel_header: channel_header.encode_to_vec(), signature_header: Vec::new() }),
        data,
    };
    Envelope { payload: payload.encode_to_vec(), signature: Vec::new() }.encode_to_vec()
}

/// A channel configuration envelope, as found in the genesis block.
pub fn config_envelope(tx_id: &str) -> Vec<u8> {
    envelope(HEADER_TYPE_CONFIG, tx_id, b"channel config".to_vec())
}

/// Builds an endorser transaction envelope.
pub struct EnvelopeBuilder {
    tx_id: String,
    args: Vec<Vec<u8>>,
    response: Vec<u8>,
    events: Vec<u8>,
    with_actions: bool,
    with_extension: bool,
}

impl EnvelopeBuilder {
    pub fn new(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            args: Vec::new(),
            response: Vec::new(),
            events: Vec::new(),
            with_actions: true,
            with_extension: true,
        }
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<[u8]>,
    {
        self.args = args.into_iter().map(|arg| arg.as_ref().to_vec()).collect();
        self
    }

    pub fn response(mut self, payload: impl AsRef<[u8]>) -> Self {
        self.response = payload.as_ref().to_vec();
        self
    }

    /// Raw serialized chaincode event.
    pub fn events(mut self, raw_event: impl AsRef<[u8]>) -> Self {
        self.events = raw_event.as_ref().to_vec();
        self
    }

    /// Chaincode event wrapping a JSON array of event records.
    pub fn event_records(self, json_payload: impl AsRef<[u8]>) -> Self {
        self.events(chaincode_event(json_payload))
    }

    pub fn without_actions(mut self) -> Self {
        self.with_actions = false;
        self
    }

    pub fn without_extension(mut self) -> Self {
        self.with_extension = false;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let invocation = ChaincodeInvocationSpec {
            chaincode_spec: Some(ChaincodeSpec {
                r#type: 0,
                chaincode_id: Some(ChaincodeId { name: TEST_CHAINCODE.to_owned(), ..Default::default() }),
                input: Some(ChaincodeInput { args: self.args }),
            }),
        };
        let chaincode_action = ChaincodeAction {
            results: Vec::new(),
            events: self.events,
            response: Some(Response { status: 200, message: String::new(), payload: self.response }),
        };
        let response_payload = ProposalResponsePayload {
            proposal_hash: vec![0xab; 32],
            extension: if self.with_extension { chaincode_action.encode_to_vec() } else { Vec::new() },
        };
        let action_payload = ChaincodeActionPayload {
            chaincode_proposal_payload: ChaincodeProposalPayload { input: invocation.encode_to_vec() }.encode_to_vec(),
            action: Some(ChaincodeEndorsedAction { proposal_response_payload: response_payload.encode_to_vec() }),
        };
        let actions = match self.with_actions {
            true => vec![TransactionAction { header: Vec::new(), payload: action_payload.encode_to_vec() }],
            false => Vec::new(),
        };

        envelope(HEADER_TYPE_ENDORSER_TRANSACTION, &self.tx_id, Transaction { actions }.encode_to_vec())
    }
}

/// Builds a committed block. Each transaction comes with the validation code
/// the committing peer recorded for it.
pub struct BlockBuilder {
    number: u64,
    envelopes: Vec<Vec<u8>>,
    filter: Vec<u8>,
}

impl BlockBuilder {
    pub fn new(number: u64) -> Self {
        Self { number, envelopes: Vec::new(), filter: Vec::new() }
    }

    /// Deterministic data hash of block `number`.
    pub fn data_hash_for(number: u64) -> Vec<u8> {
        let mut hash = vec![0xda; 32];
        hash[..8].copy_from_slice(&number.to_be_bytes());
        hash
    }

    pub fn transaction(mut self, raw_envelope: Vec<u8>, validation_code: u8) -> Self {
        self.envelopes.push(raw_envelope);
        self.filter.push(validation_code);
        self
    }

    pub fn empty_slot(self) -> Self {
        self.transaction(Vec::new(), 0)
    }

    pub fn build(self) -> Block {
        let previous_hash = match self.number {
            0 => Vec::new(),
            n => Self::data_hash_for(n - 1),
        };
        Block {
            header: Some(BlockHeader { number: self.number, previous_hash, data_hash: Self::data_hash_for(self.number) }),
            data: Some(BlockData { data: self.envelopes }),
            metadata: Some(BlockMetadata { metadata: vec![Vec::new(), Vec::new(), self.filter] }),
        }
    }
}
