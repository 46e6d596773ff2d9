use gp_convert::Address;
use prost::Message;

use crate::proto::{
    ChaincodeAction, ChaincodeActionPayload, ChaincodeInvocationSpec, ChaincodeProposalPayload, ChannelHeader,
    Envelope, Payload, ProposalResponsePayload, Transaction, HEADER_TYPE_ENDORSER_TRANSACTION,
};
use crate::DecodeError;

/// Function name the chaincode uses to serve contract code lookups. These
/// invocations carry a single argument and are not EVM transactions.
pub const GET_CODE_FUNCTION: &str = "getCode";

/// Callee and input of an EVM transaction, as hex stored by the chaincode
/// (no `0x` prefix).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvmCall {
    pub callee: String,
    pub input: String,
}

impl EvmCall {
    /// A call to the zero address deploys a contract.
    pub fn is_contract_creation(&self) -> bool {
        Address::parse(&self.callee).is_ok_and(|callee| callee.is_zero())
    }
}

/// Everything the gateway reads out of one transaction envelope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedTransaction {
    pub channel_header: ChannelHeader,
    /// `None` when the invocation is not an EVM call, see [decode_transaction].
    pub call: Option<EvmCall>,
    pub response_payload: Vec<u8>,
    /// Serialized chaincode event, empty when the transaction emitted none.
    pub events: Vec<u8>,
}

impl DecodedTransaction {
    pub fn tx_id(&self) -> &str {
        &self.channel_header.tx_id
    }
}

fn decode_payload(raw_envelope: &[u8]) -> Result<Payload, DecodeError> {
    let envelope = Envelope::decode(raw_envelope).map_err(DecodeError::protobuf("envelope"))?;
    Payload::decode(envelope.payload.as_slice()).map_err(DecodeError::protobuf("payload"))
}

fn decode_header(payload: &Payload) -> Result<ChannelHeader, DecodeError> {
    let header = payload.header.as_ref().ok_or(DecodeError::MissingHeader)?;
    ChannelHeader::decode(header.channel_header.as_slice()).map_err(DecodeError::protobuf("channel header"))
}

/// Decodes only the channel header of an envelope. This is enough to list
/// transaction ids or to locate a transaction in a block.
pub fn decode_channel_header(raw_envelope: &[u8]) -> Result<ChannelHeader, DecodeError> {
    decode_header(&decode_payload(raw_envelope)?)
}

/// Walks a serialized envelope down to the chaincode invocation and its
/// endorsed result.
///
/// The companion chaincode is always invoked with `[callee, input]`. Any
/// other argument count, or a `getCode` lookup, leaves [DecodedTransaction::call]
/// empty. Envelopes which are not endorser transactions (channel
/// configuration, mostly) carry no chaincode action at all and decode with
/// only their channel header set.
pub fn decode_transaction(raw_envelope: &[u8]) -> Result<DecodedTransaction, DecodeError> {
    let payload = decode_payload(raw_envelope)?;
    let channel_header = decode_header(&payload)?;

    if channel_header.r#type != HEADER_TYPE_ENDORSER_TRANSACTION {
        return Ok(DecodedTransaction { channel_header, ..Default::default() });
    }

    let transaction = Transaction::decode(payload.data.as_slice()).map_err(DecodeError::protobuf("transaction"))?;
    let action = transaction.actions.first().ok_or(DecodeError::NoActions)?;

    let action_payload = ChaincodeActionPayload::decode(action.payload.as_slice())
        .map_err(DecodeError::protobuf("chaincode action payload"))?;
    let endorsed = match action_payload.action {
        Some(ref endorsed) if !endorsed.proposal_response_payload.is_empty() => endorsed,
        _ => return Err(DecodeError::MissingProposalResponse),
    };

    let proposal_payload = ChaincodeProposalPayload::decode(action_payload.chaincode_proposal_payload.as_slice())
        .map_err(DecodeError::protobuf("chaincode proposal payload"))?;
    let response_payload = ProposalResponsePayload::decode(endorsed.proposal_response_payload.as_slice())
        .map_err(DecodeError::protobuf("proposal response payload"))?;
    if response_payload.extension.is_empty() {
        return Err(DecodeError::MissingExtension);
    }
    let chaincode_action = ChaincodeAction::decode(response_payload.extension.as_slice())
        .map_err(DecodeError::protobuf("chaincode action"))?;

    let invocation = ChaincodeInvocationSpec::decode(proposal_payload.input.as_slice())
        .map_err(DecodeError::protobuf("chaincode invocation spec"))?;
    let args = invocation.chaincode_spec.and_then(|spec| spec.input).map(|input| input.args).unwrap_or_default();

    Ok(DecodedTransaction {
        channel_header,
        call: evm_call(args),
        response_payload: chaincode_action.response.map(|response| response.payload).unwrap_or_default(),
        events: chaincode_action.events,
    })
}

/// Binary arguments come from other chaincodes sharing the channel and are
/// not EVM calls either.
fn evm_call(args: Vec<Vec<u8>>) -> Option<EvmCall> {
    let Ok([callee, input]) = <[Vec<u8>; 2]>::try_from(args) else {
        return None;
    };
    if callee == GET_CODE_FUNCTION.as_bytes() {
        return None;
    }
    let callee = String::from_utf8(callee).ok()?;
    let input = String::from_utf8(input).ok()?;
    Some(EvmCall { callee, input })
}
