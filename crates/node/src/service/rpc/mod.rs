use std::net::SocketAddr;

use jsonrpsee::server::ServerHandle;

use gc_rpc::{rpc_module, EthService};

use server::{start_server, ServerConfig};

use crate::cli::RpcParams;

mod middleware;
mod server;

pub struct RpcService {
    server_config: ServerConfig,
    server_handle: Option<ServerHandle>,
}

impl RpcService {
    pub fn new(config: &RpcParams, eth: EthService) -> anyhow::Result<Self> {
        let methods = rpc_module(eth)?.into();

        Ok(Self {
            server_config: ServerConfig {
                addr: config.addr(),
                cors: config.cors(),
                max_connections: config.rpc_max_connections,
                max_payload_in_mb: config.rpc_max_request_size,
                max_payload_out_mb: config.rpc_max_response_size,
                methods,
            },
            server_handle: None,
        })
    }

    pub async fn start(&mut self) -> anyhow::Result<SocketAddr> {
        let (handle, addr) = start_server(self.server_config.clone()).await?;
        self.server_handle = Some(handle);
        Ok(addr)
    }

    /// Stops accepting requests and waits for the server to wind down.
    pub async fn stop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            if handle.stop().is_ok() {
                handle.stopped().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gc_ledger::MockLedgerClient;
    use gc_rpc::EthConfig;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::cli::Cors;

    fn params(cors: Cors) -> RpcParams {
        RpcParams {
            rpc_external: false,
            rpc_port: 0,
            rpc_max_request_size: 1,
            rpc_max_response_size: 1,
            rpc_max_connections: 8,
            rpc_cors: cors,
            network_id: gc_rpc::DEFAULT_NETWORK_ID.to_owned(),
        }
    }

    async fn serve(cors: Cors) -> (RpcService, String) {
        let mut ledger = MockLedgerClient::new();
        ledger.expect_query_chain_height().returning(|| Ok(4));
        let eth = EthService::new(Arc::new(ledger), EthConfig::default());

        let mut service = RpcService::new(&params(cors), eth).unwrap();
        let addr = service.start().await.unwrap();
        (service, format!("http://{addr}"))
    }

    async fn post(url: &str, method: &str) -> Value {
        let body = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": [] });
        reqwest::Client::new().post(url).json(&body).send().await.unwrap().json().await.unwrap()
    }

    #[tokio::test]
    async fn test_serves_ethereum_method_names() {
        let (mut service, url) = serve(Cors::All).await;

        assert_eq!(post(&url, "eth_blockNumber").await["result"], json!("0x3"));
        assert_eq!(post(&url, "net_version").await["result"], json!(gc_rpc::DEFAULT_NETWORK_ID));

        let methods = post(&url, "rpc_methods").await;
        assert!(methods["result"]["methods"].as_array().unwrap().contains(&json!("eth_getLogs")));

        service.stop().await;
    }

    #[rstest]
    #[case::unknown("eth_mining")]
    #[case::no_namespace("blockNumber")]
    #[case::lookup_key("eth.BlockNumber")]
    #[tokio::test]
    async fn test_unknown_methods(#[case] method: &str) {
        let (mut service, url) = serve(Cors::All).await;

        assert_eq!(post(&url, method).await["error"]["code"], json!(-32601));

        service.stop().await;
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (mut service, url) = serve(Cors::List(vec!["http://wallet.example".to_owned()])).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, &url)
            .header("Origin", "http://wallet.example")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").and_then(|value| value.to_str().ok()),
            Some("http://wallet.example")
        );

        service.stop().await;
    }
}
