use std::convert::Infallible;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The default port.
pub const RPC_DEFAULT_PORT: u16 = 5000;
/// The default max request size in MB.
pub const RPC_DEFAULT_MAX_REQUEST_SIZE_MIB: u32 = 15;
/// The default max response size in MB.
pub const RPC_DEFAULT_MAX_RESPONSE_SIZE_MIB: u32 = 15;
/// The default number of connection..
pub const RPC_DEFAULT_MAX_CONNECTIONS: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cors {
    /// All hosts allowed.
    All,
    /// Only hosts on the list are allowed.
    List(Vec<String>),
}

impl FromStr for Cors {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut is_all = false;
        let mut origins = Vec::new();
        for part in s.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            match part {
                "all" | "*" => {
                    is_all = true;
                    break;
                }
                other => origins.push(other.to_owned()),
            }
        }

        if is_all {
            Ok(Cors::All)
        } else {
            Ok(Cors::List(origins))
        }
    }
}

impl From<String> for Cors {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(cors) => cors,
            Err(infallible) => match infallible {},
        }
    }
}

impl From<Cors> for String {
    fn from(cors: Cors) -> Self {
        match cors {
            Cors::All => "*".to_owned(),
            Cors::List(origins) => origins.join(","),
        }
    }
}

#[derive(Clone, Debug, clap::Args, Deserialize, Serialize)]
pub struct RpcParams {
    /// Exposes the RPC endpoint on address 0.0.0.0. This generally means
    /// that RPC methods will be accessible from the outside world.
    #[arg(env = "EVMGATE_RPC_EXTERNAL", long, default_value_t = false)]
    pub rpc_external: bool,

    /// The RPC port to listen at.
    #[arg(env = "EVMGATE_RPC_PORT", long, value_name = "PORT", default_value_t = RPC_DEFAULT_PORT)]
    pub rpc_port: u16,

    /// Set the maximum RPC request payload size in mebibytes.
    #[arg(env = "EVMGATE_RPC_MAX_REQUEST_SIZE", long, default_value_t = RPC_DEFAULT_MAX_REQUEST_SIZE_MIB)]
    pub rpc_max_request_size: u32,

    /// Set the maximum RPC response payload size in mebibytes.
    #[arg(env = "EVMGATE_RPC_MAX_RESPONSE_SIZE", long, default_value_t = RPC_DEFAULT_MAX_RESPONSE_SIZE_MIB)]
    pub rpc_max_response_size: u32,

    /// Maximum number of RPC server connections at a given time.
    #[arg(env = "EVMGATE_RPC_MAX_CONNECTIONS", long, value_name = "COUNT", default_value_t = RPC_DEFAULT_MAX_CONNECTIONS)]
    pub rpc_max_connections: u32,

    /// Specify browser *origins* allowed to access the RPC server.
    ///
    /// This argument is a comma separated list of origins, or the special `all`
    /// (or `*`) value, which is the default.
    #[arg(env = "EVMGATE_RPC_CORS", long, value_name = "ORIGINS", default_value = "*")]
    pub rpc_cors: Cors,

    /// Value returned by `net_version`. Defaults to the hex encoding of
    /// `fabric-evm`.
    #[arg(env = "EVMGATE_NETWORK_ID", long, value_name = "ID", default_value = gc_rpc::DEFAULT_NETWORK_ID)]
    pub network_id: String,
}

impl RpcParams {
    /// `None` allows every origin.
    pub fn cors(&self) -> Option<Vec<String>> {
        match &self.rpc_cors {
            Cors::All => None,
            Cors::List(ls) => Some(ls.clone()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        let listen_addr = if self.rpc_external {
            Ipv4Addr::UNSPECIFIED // listen on 0.0.0.0
        } else {
            Ipv4Addr::LOCALHOST
        };

        SocketAddr::new(listen_addr.into(), self.rpc_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*", Cors::All)]
    #[case("all", Cors::All)]
    #[case("http://localhost:3000,*", Cors::All)]
    #[case("http://localhost:3000", Cors::List(vec!["http://localhost:3000".into()]))]
    #[case(
        "http://localhost:3000, https://wallet.example",
        Cors::List(vec!["http://localhost:3000".into(), "https://wallet.example".into()])
    )]
    fn test_cors_from_str(#[case] input: &str, #[case] expected: Cors) {
        assert_eq!(input.parse::<Cors>().unwrap(), expected);
    }
}
