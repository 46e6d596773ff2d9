//! JSON-RPC specific middleware.

use futures::future::{BoxFuture, FutureExt};
use jsonrpsee::server::middleware::rpc::RpcServiceT;

/// Logs every call on the `rpc_calls` target.
#[derive(Debug, Clone, Default)]
pub struct RpcMiddlewareLayerCalls;

impl<S> tower::Layer<S> for RpcMiddlewareLayerCalls {
    type Service = RpcMiddlewareServiceCalls<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RpcMiddlewareServiceCalls { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RpcMiddlewareServiceCalls<S> {
    inner: S,
}

impl<'a, S> RpcServiceT<'a> for RpcMiddlewareServiceCalls<S>
where
    S: Send + Sync + Clone + RpcServiceT<'a> + 'static,
{
    type Future = BoxFuture<'a, jsonrpsee::MethodResponse>;

    fn call(&self, req: jsonrpsee::types::Request<'a>) -> Self::Future {
        let inner = self.inner.clone();

        async move {
            let now = std::time::Instant::now();

            let rp = inner.call(req.clone()).await;

            let method = req.method_name();
            let status = rp.as_error_code().unwrap_or(200);
            let res_len = rp.as_result().len();
            let response_time = now.elapsed();

            tracing::info!(
                target: "rpc_calls",
                method = method,
                status = status,
                res_len = res_len,
                response_time = response_time.as_micros(),
                "{method} {status} {res_len} - {response_time:?}",
            );

            rp
        }
        .boxed()
    }
}

/// Rewrites Ethereum style method names (`eth_getCode`) into the lookup keys
/// of the method table (`eth.GetCode`).
#[derive(Debug, Clone)]
pub struct RpcMiddlewareServiceDispatch<S> {
    inner: S,
}

impl<S> RpcMiddlewareServiceDispatch<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<'a, S> RpcServiceT<'a> for RpcMiddlewareServiceDispatch<S>
where
    S: Send + Sync + Clone + RpcServiceT<'a> + 'static,
{
    type Future = BoxFuture<'a, jsonrpsee::MethodResponse>;

    fn call(&self, mut req: jsonrpsee::types::Request<'a>) -> Self::Future {
        let inner = self.inner.clone();

        async move {
            let Some(key) = gc_rpc::dispatch_key(req.method_name()) else {
                return jsonrpsee::MethodResponse::error(
                    req.id(),
                    jsonrpsee::types::ErrorObject::owned(
                        jsonrpsee::types::error::METHOD_NOT_FOUND_CODE,
                        jsonrpsee::types::error::METHOD_NOT_FOUND_MSG,
                        Some(req.method_name()),
                    ),
                );
            };

            tracing::debug!("Dispatching {} to {key}", req.method_name());
            req.method = jsonrpsee::core::Cow::from(key);

            inner.call(req).await
        }
        .boxed()
    }
}
