use prost::Message;
use serde::{Deserialize, Deserializer, Serialize};

use crate::proto::ChaincodeEvent;

/// One EVM log as emitted by the chaincode. Hex values carry no `0x` prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(alias = "Address")]
    pub address: String,
    #[serde(alias = "Topics", default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    #[serde(alias = "Data", default)]
    pub data: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(thiserror::Error, Debug)]
pub enum EventError {
    #[error("failed to decode chaincode event: {0}")]
    Event(#[from] prost::DecodeError),
    #[error("failed to unmarshal chaincode event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decodes the events a chaincode action emitted, in emission order.
///
/// Most transactions emit nothing: empty bytes, or an event without payload,
/// yield an empty list.
pub fn decode_events(raw_event: &[u8]) -> Result<Vec<EventRecord>, EventError> {
    if raw_event.is_empty() {
        return Ok(Vec::new());
    }
    let event = ChaincodeEvent::decode(raw_event)?;
    if event.payload.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&event.payload)?)
}
