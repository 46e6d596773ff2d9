use std::time::Duration;

use anyhow::Context;
use gc_ledger::LedgerConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::util::{deserialize_duration, parse_duration, serialize_duration};

#[derive(Clone, Debug, clap::Args, Deserialize, Serialize)]
pub struct LedgerParams {
    /// Base url of the ledger gateway. Channel routes are resolved relative to
    /// its path.
    #[arg(env = "EVMGATE_LEDGER_URL", long, value_name = "URL", required_unless_present = "config_file")]
    pub ledger_url: Option<Url>,

    /// Channel the EVM chaincode is installed on.
    #[arg(env = "EVMGATE_CHANNEL", long, value_name = "CHANNEL", default_value = "mychannel")]
    pub channel: String,

    /// Name of the EVM chaincode.
    #[arg(env = "EVMGATE_CHAINCODE", long, value_name = "CHAINCODE", default_value = gc_rpc::DEFAULT_CHAINCODE_ID)]
    pub chaincode: String,

    /// Ledger user whose identity signs proposals. Its address is the one
    /// `eth_accounts` reports.
    #[arg(env = "EVMGATE_LEDGER_USER", long, value_name = "USER", default_value = "User1")]
    pub ledger_user: String,

    /// Organization of the ledger user.
    #[arg(env = "EVMGATE_LEDGER_ORG", long, value_name = "ORG", default_value = "Org1")]
    pub ledger_org: String,

    /// Timeout of a single ledger request.
    #[arg(env = "EVMGATE_LEDGER_TIMEOUT", long, default_value = "30s", value_parser = parse_duration)]
    #[serde(deserialize_with = "deserialize_duration", serialize_with = "serialize_duration")]
    pub ledger_timeout: Duration,
}

impl LedgerParams {
    pub fn ledger_config(&self) -> anyhow::Result<LedgerConfig> {
        let url = self.ledger_url.clone().context("The ledger url is required, set it with `--ledger-url`")?;
        Ok(LedgerConfig {
            url,
            channel: self.channel.clone(),
            user: self.ledger_user.clone(),
            org: self.ledger_org.clone(),
            timeout: self.ledger_timeout,
        })
    }
}
