pub mod ledger;
pub mod rpc;

use std::path::PathBuf;

use anyhow::bail;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use gc_rpc::EthConfig;
use serde::{Deserialize, Serialize};

pub use ledger::*;
pub use rpc::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[derive(Clone, Debug, clap::Parser, Deserialize, Serialize)]
#[command(name = "evmgate", version, about = "Ethereum JSON-RPC gateway for a permissioned ledger")]
pub struct RunCmd {
    #[clap(flatten)]
    pub ledger_params: LedgerParams,

    #[clap(flatten)]
    pub rpc_params: RpcParams,

    /// Format of the log output.
    #[arg(env = "EVMGATE_LOG_FORMAT", long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Load the configuration from a TOML, JSON or YAML file. Values found in
    /// the file take precedence over the command line.
    #[arg(env = "EVMGATE_CONFIG_FILE", long, value_name = "CONFIG FILE PATH")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl RunCmd {
    /// Layers the config file, if any, over the parsed arguments.
    pub fn load(self) -> anyhow::Result<Self> {
        let config_file = self.config_file.clone();
        let mut config = Figment::new().merge(Serialized::defaults(self));

        if let Some(config_path) = config_file {
            config = match config_path.extension() {
                None => bail!("Unsupported file type for config file."),
                Some(os_str) => match os_str.to_str() {
                    Some("toml") => config.merge(Toml::file(config_path)),
                    Some("json") => config.merge(Json::file(config_path)),
                    Some("yaml") => config.merge(Yaml::file(config_path)),
                    _ => bail!("Unsupported file type for config file."),
                },
            }
        }

        Ok(config.extract()?)
    }

    pub fn eth_config(&self) -> EthConfig {
        EthConfig { chaincode: self.ledger_params.chaincode.clone(), network_id: self.rpc_params.network_id.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;

    fn parse(args: &[&str]) -> RunCmd {
        RunCmd::try_parse_from(std::iter::once("evmgate").chain(args.iter().copied())).unwrap()
    }

    fn config_file(extension: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(&format!(".{extension}")).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let cmd = parse(&["--ledger-url", "http://localhost:8080/api"]).load().unwrap();

        let ledger = cmd.ledger_params.ledger_config().unwrap();
        assert_eq!(ledger.url.as_str(), "http://localhost:8080/api");
        assert_eq!(ledger.channel, "mychannel");
        assert_eq!(ledger.timeout, Duration::from_secs(30));
        assert_eq!(cmd.rpc_params.addr(), SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 5000));
        assert_eq!(cmd.rpc_params.cors(), None);
        assert_eq!(cmd.log_format, LogFormat::Pretty);

        let eth = cmd.eth_config();
        assert_eq!(eth.chaincode, "evmcc");
        assert_eq!(eth.network_id, "0x6661627269632d65766d");
    }

    #[test]
    fn test_ledger_url_is_required() {
        assert!(RunCmd::try_parse_from(["evmgate"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cmd = parse(&[
            "--ledger-url",
            "http://ledger:8080",
            "--chaincode",
            "evm",
            "--ledger-timeout",
            "500ms",
            "--rpc-external",
            "--rpc-port",
            "8545",
            "--rpc-cors",
            "http://localhost:3000",
            "--log-format",
            "json",
        ])
        .load()
        .unwrap();

        assert_eq!(cmd.ledger_params.ledger_timeout, Duration::from_millis(500));
        assert_eq!(cmd.eth_config().chaincode, "evm");
        assert_eq!(cmd.rpc_params.addr(), SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 8545));
        assert_eq!(cmd.rpc_params.cors(), Some(vec!["http://localhost:3000".to_owned()]));
        assert_eq!(cmd.log_format, LogFormat::Json);
    }

    #[test]
    fn test_toml_config_file() {
        let file = config_file(
            "toml",
            r#"
            log_format = "json"

            [ledger_params]
            ledger_url = "http://ledger:8080/gateway"
            channel = "evmchannel"
            ledger_timeout = "5s"

            [rpc_params]
            rpc_port = 8545
            rpc_cors = "http://localhost:3000,https://wallet.example"
            "#,
        );
        let path = file.path().to_str().unwrap();

        let cmd = parse(&["--config-file", path]).load().unwrap();

        let ledger = cmd.ledger_params.ledger_config().unwrap();
        assert_eq!(ledger.url.as_str(), "http://ledger:8080/gateway");
        assert_eq!(ledger.channel, "evmchannel");
        assert_eq!(ledger.org, "Org1");
        assert_eq!(ledger.timeout, Duration::from_secs(5));
        assert_eq!(cmd.rpc_params.rpc_port, 8545);
        assert_eq!(
            cmd.rpc_params.cors(),
            Some(vec!["http://localhost:3000".to_owned(), "https://wallet.example".to_owned()])
        );
        assert_eq!(cmd.log_format, LogFormat::Json);
    }

    #[test]
    fn test_json_config_file() {
        let file = config_file("json", r#"{"ledger_params": {"ledger_url": "http://ledger:8080"}}"#);
        let path = file.path().to_str().unwrap();

        let cmd = parse(&["--config-file", path]).load().unwrap();

        assert!(cmd.ledger_params.ledger_config().is_ok());
    }

    #[test]
    fn test_config_file_without_ledger_url() {
        let file = config_file("yaml", "rpc_params:\n  rpc_port: 8545\n");
        let path = file.path().to_str().unwrap();

        let cmd = parse(&["--config-file", path]).load().unwrap();

        assert!(cmd.ledger_params.ledger_config().is_err());
    }

    #[test]
    fn test_unsupported_config_file() {
        let file = config_file("ini", "");
        let path = file.path().to_str().unwrap();

        assert!(parse(&["--config-file", path]).load().is_err());
    }
}
