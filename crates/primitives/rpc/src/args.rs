use serde::{Deserialize, Serialize};

/// Call object of `eth_call`, `eth_sendTransaction` and `eth_estimateGas`.
///
/// Every field is optional; only `to` and `data` reach the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, alias = "input", skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl EthArgs {
    /// Callee address with an empty `to` treated as absent.
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }

    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or_default()
    }
}

/// A single value or a list of values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// One position of a topic filter: a required topic or a set of alternatives.
///
/// An empty string inside the set matches anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopicSelector {
    One(String),
    AnyOf(Vec<String>),
}

/// Filter object of `eth_getLogs`, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLogsArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<OneOrMany>,
    /// `null` at a position is a wildcard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Option<TopicSelector>>>,
    #[serde(default, alias = "blockhash", skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
}
