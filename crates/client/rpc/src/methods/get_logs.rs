use gp_ledger::{decode_events, decode_transaction};
use gp_rpc::{GetLogsArgs, Log};

use crate::filter::LogFilter;
use crate::shape::{BlockInfo, TxLocation};
use crate::{EthRpcApiError, EthRpcResult, EthService};

/// Returns all event logs matching the given filter, scanning the ledger
/// block by block.
///
/// Both bounds default to `latest` and are inclusive. Transactions the
/// committing peer marked invalid are skipped, as their events never took
/// effect. Logs come out in block order, then transaction order, then
/// emission order.
pub async fn get_logs(service: &EthService, args: GetLogsArgs) -> EthRpcResult<Vec<Log>> {
    let filter = LogFilter::try_from(args)?;

    let from_block = service.resolve_block(filter.from_block).await?;
    let to_block = service.resolve_block(filter.to_block).await?;
    if from_block > to_block {
        return Err(EthRpcApiError::invalid_params("first block number greater than last block number"));
    }
    tracing::debug!("Scanning blocks {from_block}..={to_block} for logs");

    let mut logs = Vec::new();
    for number in from_block..=to_block {
        let block = service.block_by_number(number).await?;
        let info = BlockInfo::of(&block)?;

        for (index, raw) in block.transactions() {
            if !block.is_transaction_valid(index)? {
                continue;
            }
            let transaction = decode_transaction(raw)?;
            let location = TxLocation::new(&info, transaction.tx_id(), index);
            for (log_index, event) in decode_events(&transaction.events)?.iter().enumerate() {
                if filter.matches(event) {
                    logs.push(location.log(event, log_index));
                }
            }
        }
    }

    Ok(logs)
}
