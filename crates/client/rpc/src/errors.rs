use std::borrow::Cow;

use gp_convert::HexError;
use gp_ledger::{DecodeError, EventError};
use jsonrpsee::types::error::{INTERNAL_ERROR_CODE, INVALID_PARAMS_CODE};

pub type EthRpcResult<T> = Result<T, EthRpcApiError>;

/// Message reported for the `pending` block tag.
pub const PENDING_UNSUPPORTED: &str =
    "the ledger does not have the concept of in-progress blocks being visible.";

#[cfg_attr(test, derive(PartialEq, Eq))]
#[derive(thiserror::Error, Debug)]
pub enum EthRpcApiError {
    #[error("Invalid params: {0}")]
    InvalidParams(Cow<'static, str>),
    #[error("Failed to query the ledger: {0}")]
    LedgerQuery(String),
    #[error("Failed to execute transaction: {0}")]
    LedgerExecute(String),
    #[error("Failed to unmarshal transaction: {0}")]
    Unmarshal(String),
    #[error("Failed to decode chaincode event: {0}")]
    EventDecode(String),
    #[error("Failed to unmarshal chaincode event payload: {0}")]
    EventPayload(String),
    #[error("Transaction not found")]
    TxnNotFound,
    #[error("There are no blocks")]
    NoBlocks,
    #[error("Unimplemented: {0}")]
    Unimplemented(Cow<'static, str>),
}

impl EthRpcApiError {
    pub fn invalid_params(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidParams(reason.into())
    }

    pub fn unimplemented(what: impl Into<Cow<'static, str>>) -> Self {
        Self::Unimplemented(what.into())
    }
}

impl From<&EthRpcApiError> for i32 {
    fn from(err: &EthRpcApiError) -> Self {
        match err {
            EthRpcApiError::InvalidParams(_) => INVALID_PARAMS_CODE,
            EthRpcApiError::TxnNotFound => -32001,
            EthRpcApiError::Unimplemented(_) => -32004,
            EthRpcApiError::LedgerQuery(_)
            | EthRpcApiError::LedgerExecute(_)
            | EthRpcApiError::Unmarshal(_)
            | EthRpcApiError::EventDecode(_)
            | EthRpcApiError::EventPayload(_)
            | EthRpcApiError::NoBlocks => INTERNAL_ERROR_CODE,
        }
    }
}

impl From<EthRpcApiError> for jsonrpsee::types::ErrorObjectOwned {
    fn from(err: EthRpcApiError) -> Self {
        jsonrpsee::types::ErrorObjectOwned::owned((&err).into(), err.to_string(), None::<()>)
    }
}

impl From<HexError> for EthRpcApiError {
    fn from(err: HexError) -> Self {
        Self::InvalidParams(err.to_string().into())
    }
}

impl From<DecodeError> for EthRpcApiError {
    fn from(err: DecodeError) -> Self {
        crate::utils::display_internal_error(&err);
        Self::Unmarshal(err.to_string())
    }
}

impl From<EventError> for EthRpcApiError {
    fn from(err: EventError) -> Self {
        crate::utils::display_internal_error(&err);
        match err {
            EventError::Event(err) => Self::EventDecode(err.to_string()),
            EventError::Payload(err) => Self::EventPayload(err.to_string()),
        }
    }
}
