//! Method table and wire name rewriting.
//!
//! Clients call `namespace_methodName`. Before a request reaches the
//! [RpcModule], the server middleware rewrites that name into the lookup key
//! `namespace.MethodName` with [dispatch_key]. Every entry of [METHOD_TABLE]
//! has the same shape: it decodes its raw positional parameters, runs the
//! method against the [EthService] and serializes the reply.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use jsonrpsee::core::RpcResult;
use jsonrpsee::types::error::INTERNAL_ERROR_CODE;
use jsonrpsee::types::{ErrorObjectOwned, Params};
use jsonrpsee::RpcModule;
use serde::Serialize;
use serde_json::Value;

use gp_rpc::{EthArgs, GetLogsArgs};

use crate::methods;
use crate::resolver::BlockRef;
use crate::{EthRpcApiError, EthRpcResult, EthService};

pub type Handler = fn(Params<'static>, Arc<EthService>) -> BoxFuture<'static, RpcResult<Value>>;

/// Lookup key of the method listing every registered wire name.
const RPC_METHODS_KEY: &str = "rpc.Methods";

macro_rules! handler {
    ($method:path) => {
        |params: Params<'static>, service: Arc<EthService>| $method(params, service).boxed()
    };
}

/// Every supported method, by lookup key.
pub static METHOD_TABLE: &[(&str, Handler)] = &[
    ("eth.GetCode", handler!(eth_get_code)),
    ("eth.Call", handler!(eth_call)),
    ("eth.SendTransaction", handler!(eth_send_transaction)),
    ("eth.GetTransactionReceipt", handler!(eth_get_transaction_receipt)),
    ("eth.Accounts", handler!(eth_accounts)),
    ("eth.EstimateGas", handler!(eth_estimate_gas)),
    ("eth.GetBalance", handler!(eth_get_balance)),
    ("eth.GetBlockByNumber", handler!(eth_get_block_by_number)),
    ("eth.BlockNumber", handler!(eth_block_number)),
    ("eth.GetTransactionByHash", handler!(eth_get_transaction_by_hash)),
    ("eth.GetLogs", handler!(eth_get_logs)),
    ("net.Version", handler!(net_version)),
];

/// Rewrites a wire name (`eth_getCode`) into its lookup key (`eth.GetCode`).
///
/// Returns `None` for names without a namespace separator.
pub fn dispatch_key(wire: &str) -> Option<String> {
    let (namespace, method) = wire.split_once('_')?;
    let mut chars = method.chars();
    let first = chars.next()?;
    Some(format!("{namespace}.{}{}", first.to_uppercase(), chars.as_str()))
}

/// Inverse of [dispatch_key].
pub fn wire_name(key: &str) -> String {
    match key.split_once('.') {
        Some((namespace, method)) => {
            let mut chars = method.chars();
            match chars.next() {
                Some(first) => format!("{namespace}_{}{}", first.to_lowercase(), chars.as_str()),
                None => format!("{namespace}_"),
            }
        }
        None => key.to_owned(),
    }
}

/// Builds the module serving [METHOD_TABLE], plus `rpc_methods`.
pub fn rpc_module(service: EthService) -> anyhow::Result<RpcModule<EthService>> {
    let mut module = RpcModule::new(service);

    for (key, handler) in METHOD_TABLE {
        module.register_async_method(*key, *handler)?;
    }

    let mut wire_names: Vec<String> = METHOD_TABLE.iter().map(|(key, _)| wire_name(key)).collect();
    wire_names.push(wire_name(RPC_METHODS_KEY));
    wire_names.sort();
    module.register_method(RPC_METHODS_KEY, move |_, _| serde_json::json!({ "methods": wire_names }))?;

    Ok(module)
}

fn respond<T: Serialize>(reply: EthRpcResult<T>) -> RpcResult<Value> {
    serde_json::to_value(reply?)
        .map_err(|err| ErrorObjectOwned::owned(INTERNAL_ERROR_CODE, err.to_string(), None::<()>))
}

fn no_params(params: &Params<'_>) -> RpcResult<()> {
    match params.sequence().optional_next::<Value>()? {
        None => Ok(()),
        Some(_) => Err(EthRpcApiError::invalid_params("method takes no parameters").into()),
    }
}

async fn eth_get_code(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let mut seq = params.sequence();
    let address: String = seq.next()?;
    // block parameter, the code of a contract never changes
    let _block: Option<Value> = seq.optional_next()?;
    respond(methods::get_code(&service, &address).await)
}

async fn eth_call(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let mut seq = params.sequence();
    let args: EthArgs = seq.next()?;
    let _block: Option<Value> = seq.optional_next()?;
    respond(methods::call(&service, &args).await)
}

async fn eth_send_transaction(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let args: EthArgs = params.sequence().next()?;
    respond(methods::send_transaction(&service, &args).await)
}

async fn eth_get_transaction_receipt(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let tx_hash: String = params.sequence().next()?;
    respond(methods::get_transaction_receipt(&service, &tx_hash).await)
}

async fn eth_accounts(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    no_params(&params)?;
    respond(methods::accounts(&service).await)
}

async fn eth_estimate_gas(params: Params<'static>, _service: Arc<EthService>) -> RpcResult<Value> {
    let mut seq = params.sequence();
    let _args: Option<EthArgs> = seq.optional_next()?;
    let _block: Option<Value> = seq.optional_next()?;
    respond(Ok(methods::estimate_gas()))
}

async fn eth_get_balance(_params: Params<'static>, _service: Arc<EthService>) -> RpcResult<Value> {
    respond(Ok(methods::get_balance()))
}

async fn eth_get_block_by_number(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let mut seq = params.sequence();
    let block: String = seq.next()?;
    let full_transactions: bool = seq.next()?;
    if seq.optional_next::<Value>()?.is_some() {
        return Err(EthRpcApiError::invalid_params("expected a block and a boolean").into());
    }
    let block = block.parse::<BlockRef>()?;
    respond(methods::get_block_by_number(&service, block, full_transactions).await)
}

async fn eth_block_number(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    no_params(&params)?;
    respond(methods::block_number(&service).await)
}

async fn eth_get_transaction_by_hash(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let tx_hash: String = params.sequence().next()?;
    respond(methods::get_transaction_by_hash(&service, &tx_hash).await)
}

async fn eth_get_logs(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    let args: GetLogsArgs = params.sequence().next()?;
    respond(methods::get_logs(&service, args).await)
}

async fn net_version(params: Params<'static>, service: Arc<EthService>) -> RpcResult<Value> {
    no_params(&params)?;
    respond(Ok(methods::net_version(&service)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use jsonrpsee::types::error::INVALID_PARAMS_CODE;
    use rstest::rstest;
    use serde_json::json;

    fn handler(key: &str) -> Handler {
        METHOD_TABLE.iter().find(|(name, _)| *name == key).map(|(_, handler)| *handler).unwrap()
    }

    async fn dispatch(ledger: TestLedger, wire: &str, params: &str) -> RpcResult<Value> {
        let key = dispatch_key(wire).unwrap();
        let params = Params::new(Some(params)).into_owned();
        handler(&key)(params, Arc::new(rpc_test_setup(ledger))).await
    }

    #[rstest]
    #[case("eth_getCode", Some("eth.GetCode"))]
    #[case("eth_blockNumber", Some("eth.BlockNumber"))]
    #[case("net_version", Some("net.Version"))]
    #[case("rpc_methods", Some("rpc.Methods"))]
    #[case("eth_getTransactionByHash", Some("eth.GetTransactionByHash"))]
    #[case("ethGetCode", None)]
    #[case("eth_", None)]
    fn test_dispatch_key(#[case] wire: &str, #[case] expected: Option<&str>) {
        assert_eq!(dispatch_key(wire).as_deref(), expected);
        if let Some(key) = expected {
            assert_eq!(wire_name(key), wire);
        }
    }

    #[test]
    fn test_table_covers_the_rpc_surface() {
        let wire_names: Vec<String> = METHOD_TABLE.iter().map(|(key, _)| wire_name(key)).collect();
        for method in [
            "eth_getCode",
            "eth_call",
            "eth_sendTransaction",
            "eth_getTransactionReceipt",
            "eth_accounts",
            "eth_estimateGas",
            "eth_getBalance",
            "eth_getBlockByNumber",
            "eth_blockNumber",
            "eth_getTransactionByHash",
            "eth_getLogs",
            "net_version",
        ] {
            assert!(wire_names.iter().any(|name| name == method), "{method} is not registered");
            assert!(METHOD_TABLE.iter().any(|(key, _)| Some(key.to_string()) == dispatch_key(method)));
        }
    }

    #[test]
    fn test_module_registers_lookup_keys() {
        let module = rpc_module(rpc_test_setup(TestLedger::new())).unwrap();
        let names: Vec<&str> = module.method_names().collect();

        assert_eq!(names.len(), METHOD_TABLE.len() + 1);
        assert!(names.contains(&"eth.GetLogs"));
        assert!(names.contains(&RPC_METHODS_KEY));
    }

    #[rstest]
    #[tokio::test]
    async fn test_block_number(sample_chain: SampleChain) {
        assert_eq!(dispatch(sample_chain.ledger(), "eth_blockNumber", "[]").await.unwrap(), json!("0x3"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_block_by_number(sample_chain: SampleChain) {
        let block = dispatch(sample_chain.ledger(), "eth_getBlockByNumber", r#"["0x1", false]"#).await.unwrap();
        assert_eq!(block["number"], json!("0x1"));
        assert_eq!(block["transactions"], json!([format!("0x{TX_DEPLOY}")]));
    }

    #[rstest]
    #[case::missing_flag("eth_getBlockByNumber", r#"["latest"]"#)]
    #[case::extra_param("eth_getBlockByNumber", r#"["latest", true, 1]"#)]
    #[case::bad_block("eth_getBlockByNumber", r#"["0xzz", true]"#)]
    #[case::no_address("eth_getCode", "[]")]
    #[case::args_not_an_object("eth_call", r#"["0x01"]"#)]
    #[case::unexpected_param("eth_blockNumber", r#"["latest"]"#)]
    #[case::filter_not_an_object("eth_getLogs", r#"[1]"#)]
    #[case::null_in_topic_group("eth_getLogs", r#"[{"topics":[[null]]}]"#)]
    #[tokio::test]
    async fn test_invalid_params(#[case] wire: &str, #[case] params: &str) {
        let err = dispatch(TestLedger::new(), wire, params).await.unwrap_err();
        assert_eq!(err.code(), INVALID_PARAMS_CODE);
    }

    #[rstest]
    #[case::no_params("eth_estimateGas", "[]", json!("0x0"))]
    #[case::with_args("eth_estimateGas", r#"[{"to":"0x01"}, "latest"]"#, json!("0x0"))]
    #[case::balance("eth_getBalance", r#"["0x82373458164820947891abcdefabcdefabcdefab", "latest"]"#, json!("0x0"))]
    #[case::network("net_version", "[]", json!(crate::DEFAULT_NETWORK_ID))]
    #[tokio::test]
    async fn test_constant_replies(#[case] wire: &str, #[case] params: &str, #[case] expected: Value) {
        assert_eq!(dispatch(TestLedger::new(), wire, params).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_error_code_reaches_the_reply() {
        let mut ledger = TestLedger::new();
        ledger.expect_query_chain_height().returning(|| Ok(0));

        let err = dispatch(ledger, "eth_blockNumber", "[]").await.unwrap_err();
        assert_eq!(err.code(), INTERNAL_ERROR_CODE);
        assert_eq!(err.message(), "There are no blocks");
    }
}
