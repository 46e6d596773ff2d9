//! evmgate command line.

mod cli;
mod service;
mod util;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::RunCmd;
use gc_ledger::HttpLedgerClient;
use gc_rpc::EthService;
use service::RpcService;

const GREET_IMPL_NAME: &str = "evmgate";
const GREET_SUPPORT_URL: &str = "https://github.com/evmgate/evmgate/issues";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let run_cmd = RunCmd::parse().load().context("Loading the configuration")?;
    util::setup_logging(run_cmd.log_format)?;

    tracing::info!("🥷 {} Ethereum gateway", GREET_IMPL_NAME);
    tracing::info!("✌️  Version {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("💁 Support URL: {}", GREET_SUPPORT_URL);

    let ledger_config = run_cmd.ledger_params.ledger_config()?;
    tracing::info!(
        "🔗 Ledger: {} (channel `{}`, chaincode `{}`, identity {}@{})",
        ledger_config.url,
        ledger_config.channel,
        run_cmd.ledger_params.chaincode,
        ledger_config.user,
        ledger_config.org
    );
    let ledger = HttpLedgerClient::new(ledger_config).context("Initializing the ledger client")?;

    let eth = EthService::new(Arc::new(ledger), run_cmd.eth_config());
    let mut service_rpc = RpcService::new(&run_cmd.rpc_params, eth).context("Initializing the RPC service")?;
    service_rpc.start().await?;

    util::shutdown_signal().await;
    tracing::info!("🛑 Shutting down");
    service_rpc.stop().await;

    Ok(())
}
