use std::fmt;

use crate::{EthRpcApiError, EthRpcResult};

pub fn display_internal_error(err: impl fmt::Display) {
    tracing::error!(target: "rpc_errors", "{:#}", err);
}

/// Maps ledger failures into their RPC error, logging the cause.
pub trait ResultExt<T> {
    fn or_ledger_query_error(self) -> EthRpcResult<T>;
    fn or_ledger_execute_error(self) -> EthRpcResult<T>;
}

impl<T, E: fmt::Display> ResultExt<T> for Result<T, E> {
    #[inline]
    fn or_ledger_query_error(self) -> EthRpcResult<T> {
        self.map_err(|err| {
            display_internal_error(format!("Ledger query: {err:#}"));
            EthRpcApiError::LedgerQuery(err.to_string())
        })
    }

    #[inline]
    fn or_ledger_execute_error(self) -> EthRpcResult<T> {
        self.map_err(|err| {
            display_internal_error(format!("Ledger execute: {err:#}"));
            EthRpcApiError::LedgerExecute(err.to_string())
        })
    }
}
