use std::time::Duration;

use async_trait::async_trait;
use gp_ledger::Block;
use prost::Message;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Invocation, LedgerClient, LedgerError};

pub const USER_HEADER: &str = "x-ledger-user";
pub const ORG_HEADER: &str = "x-ledger-org";

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// Root of the gateway, channel routes are appended to its path.
    pub url: Url,
    pub channel: String,
    /// Identity the gateway signs proposals with.
    pub user: String,
    pub org: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct InvocationRequest<'a> {
    fcn: &'a str,
    args: Vec<String>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    payload: String,
}

#[derive(Deserialize)]
struct ExecuteResponse {
    transaction_id: String,
    #[serde(default)]
    payload: String,
}

#[derive(Deserialize)]
struct HeightResponse {
    height: u64,
}

/// [`LedgerClient`] speaking to the REST ledger gateway.
///
/// Routes:
/// - `POST channels/{channel}/chaincodes/{ccid}/query`
/// - `POST channels/{channel}/chaincodes/{ccid}/execute`
/// - `GET channels/{channel}/height`
/// - `GET channels/{channel}/blocks/{number}`
/// - `GET channels/{channel}/transactions/{tx_id}/block`
///
/// Chaincode arguments and payloads travel hex encoded, blocks as raw
/// protobuf.
#[derive(Debug)]
pub struct HttpLedgerClient {
    client: reqwest::Client,
    base: Url,
    channel: String,
}

impl HttpLedgerClient {
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        if config.url.cannot_be_a_base() {
            return Err(LedgerError::InvalidUrl(config.url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_HEADER,
            HeaderValue::from_str(&config.user).map_err(|_| LedgerError::InvalidIdentity("user"))?,
        );
        headers.insert(
            ORG_HEADER,
            HeaderValue::from_str(&config.org).map_err(|_| LedgerError::InvalidIdentity("org"))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(LedgerError::Client)?;

        Ok(Self { client, base: config.url, channel: config.channel })
    }

    fn endpoint<I>(&self, segments: I) -> Result<Url, LedgerError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LedgerError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("channels")
            .push(&self.channel)
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &Url) -> Result<Response, LedgerError> {
        let response = request
            .send()
            .await
            .map_err(|source| LedgerError::Transport { endpoint: endpoint.to_string(), source })?;

        match response.status().is_success() {
            true => Ok(response),
            false => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Err(LedgerError::Status { endpoint: endpoint.to_string(), status, body })
            }
        }
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        chaincode: &str,
        action: &str,
        function: &str,
        args: Vec<Vec<u8>>,
    ) -> Result<(Url, T), LedgerError> {
        let endpoint = self.endpoint(["chaincodes", chaincode, action])?;
        tracing::debug!("Invoking {function} on {endpoint}");

        let body = InvocationRequest { fcn: function, args: args.iter().map(hex::encode).collect() };
        let request = self.client.post(endpoint.clone()).header(ACCEPT, "application/json").json(&body);
        let response = self.send(request, &endpoint).await?;
        let parsed = response.json().await.map_err(|e| LedgerError::invalid_response(&endpoint, e))?;
        Ok((endpoint, parsed))
    }

    async fn fetch_block(&self, endpoint: Url) -> Result<Block, LedgerError> {
        tracing::debug!("Fetching block from {endpoint}");
        let response = self.send(self.client.get(endpoint.clone()), &endpoint).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| LedgerError::Transport { endpoint: endpoint.to_string(), source })?;
        Ok(Block::decode(bytes)?)
    }
}

fn decode_payload(endpoint: &Url, payload: &str) -> Result<Vec<u8>, LedgerError> {
    hex::decode(payload).map_err(|e| LedgerError::invalid_response(endpoint, format!("payload is not hex: {e}")))
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn query(&self, chaincode: &str, function: &str, args: Vec<Vec<u8>>) -> Result<Vec<u8>, LedgerError> {
        let (endpoint, response): (_, QueryResponse) = self.invoke(chaincode, "query", function, args).await?;
        decode_payload(&endpoint, &response.payload)
    }

    async fn execute(&self, chaincode: &str, function: &str, args: Vec<Vec<u8>>) -> Result<Invocation, LedgerError> {
        let (endpoint, response): (_, ExecuteResponse) = self.invoke(chaincode, "execute", function, args).await?;
        Ok(Invocation { payload: decode_payload(&endpoint, &response.payload)?, transaction_id: response.transaction_id })
    }

    async fn query_chain_height(&self) -> Result<u64, LedgerError> {
        let endpoint = self.endpoint(["height"])?;
        let response = self.send(self.client.get(endpoint.clone()), &endpoint).await?;
        let HeightResponse { height } =
            response.json().await.map_err(|e| LedgerError::invalid_response(&endpoint, e))?;
        Ok(height)
    }

    async fn query_block_by_height(&self, number: u64) -> Result<Block, LedgerError> {
        let endpoint = self.endpoint(["blocks".to_string(), number.to_string()])?;
        self.fetch_block(endpoint).await
    }

    async fn query_block_by_transaction_id(&self, tx_id: &str) -> Result<Block, LedgerError> {
        let endpoint = self.endpoint(["transactions", tx_id, "block"])?;
        self.fetch_block(endpoint).await
    }
}
