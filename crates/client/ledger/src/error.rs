use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid ledger gateway url {0}")]
    InvalidUrl(String),

    #[error("Invalid value for the {0} identity header")]
    InvalidIdentity(&'static str),

    #[error("Failed to build the http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (timeout, refused connection...).
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Ledger gateway answered {status} on {endpoint}: {body}")]
    Status { endpoint: String, status: StatusCode, body: String },

    #[error("Malformed response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Failed to decode block: {0}")]
    Block(#[from] prost::DecodeError),
}

impl LedgerError {
    pub(crate) fn invalid_response(endpoint: &url::Url, message: impl ToString) -> Self {
        Self::InvalidResponse { endpoint: endpoint.to_string(), message: message.to_string() }
    }
}
