//! This is the JSON-RPC server, with the CORS and middleware layers in front
//! of the method table.

use std::net::SocketAddr;

use anyhow::Context;
use http::header::{CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use jsonrpsee::server::middleware::rpc::RpcServiceBuilder;
use jsonrpsee::server::{ServerBuilder, ServerHandle};
use jsonrpsee::Methods;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::middleware::{RpcMiddlewareLayerCalls, RpcMiddlewareServiceDispatch};

const MEGABYTE: u32 = 1024 * 1024;

/// RPC server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub cors: Option<Vec<String>>,
    pub max_connections: u32,
    pub max_payload_in_mb: u32,
    pub max_payload_out_mb: u32,
    pub methods: Methods,
}

/// Starts serving `methods`. The returned handle stops the server.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<(ServerHandle, SocketAddr)> {
    let ServerConfig { addr, cors, max_connections, max_payload_in_mb, max_payload_out_mb, methods } = config;

    let http_middleware = tower::ServiceBuilder::new().layer(try_into_cors(cors.as_ref())?);
    let rpc_middleware = RpcServiceBuilder::new().layer(RpcMiddlewareLayerCalls).layer_fn(RpcMiddlewareServiceDispatch::new);

    let server = ServerBuilder::default()
        .max_connections(max_connections)
        .max_request_body_size(max_payload_in_mb.saturating_mul(MEGABYTE))
        .max_response_body_size(max_payload_out_mb.saturating_mul(MEGABYTE))
        .http_only()
        .set_http_middleware(http_middleware)
        .set_rpc_middleware(rpc_middleware)
        .build(addr)
        .await
        .with_context(|| format!("Failed to start the JSON-RPC server at {addr}"))?;

    let local_addr = server.local_addr().context("Getting the JSON-RPC server local address")?;
    tracing::info!("🌐 Running JSON-RPC server at http://{local_addr} (allowed origins={})", format_cors(cors.as_ref()));

    Ok((server.start(methods), local_addr))
}

fn try_into_cors(maybe_cors: Option<&Vec<String>>) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods([Method::POST]).allow_headers([ORIGIN, CONTENT_TYPE]);

    match maybe_cors {
        Some(cors) => {
            let mut list = Vec::new();
            for origin in cors {
                list.push(HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin {origin:?}"))?);
            }
            Ok(layer.allow_origin(AllowOrigin::list(list)))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

fn format_cors(maybe_cors: Option<&Vec<String>>) -> String {
    match maybe_cors {
        Some(cors) => format!("{cors:?}"),
        None => "*".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origins() {
        assert!(try_into_cors(None).is_ok());
        assert!(try_into_cors(Some(&vec!["http://localhost:3000".to_owned()])).is_ok());
        assert!(try_into_cors(Some(&vec!["http://local\nhost".to_owned()])).is_err());
    }

    #[test]
    fn test_format_cors() {
        assert_eq!(format_cors(None), "*");
        assert_eq!(format_cors(Some(&vec!["http://localhost:3000".to_owned()])), r#"["http://localhost:3000"]"#);
    }
}
