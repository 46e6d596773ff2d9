use gp_convert::{strip_0x, with_0x};
use gp_ledger::decode_events;
use gp_rpc::TxReceipt;

use crate::shape::{logs_bloom, BlockInfo, TxLocation};
use crate::{EthRpcApiError, EthRpcResult, EthService};

/// Get the receipt of a committed transaction
///
/// ### Arguments
///
/// * `tx_hash` - The ledger transaction id, with or without `0x` prefix.
///
/// ### Returns
///
/// The receipt. Its `status` reflects the validation code the committing peer
/// assigned: `0x1` for a valid transaction, `0x0` for any other code.
/// Deployments report the new contract in `contractAddress` and carry no `to`.
/// Logs are listed in emission order. Gas is not metered, so gas fields are
/// always zero.
///
/// ### Errors
///
/// Fails when the ledger does not know the transaction, when the block it
/// returns does not hold it, or when the transaction or its events cannot be
/// decoded.
pub async fn get_transaction_receipt(service: &EthService, tx_hash: &str) -> EthRpcResult<TxReceipt> {
    let tx_id = strip_0x(tx_hash);
    let (block, index, transaction) = service.find_transaction(tx_id).await?;

    let info = BlockInfo::of(&block)?;
    let location = TxLocation::new(&info, tx_id, index);
    let valid = block.is_transaction_valid(index)?;

    let (to, contract_address) = match &transaction.call {
        Some(call) if call.is_contract_creation() => {
            let deployed = std::str::from_utf8(&transaction.response_payload)
                .map_err(|_| EthRpcApiError::Unmarshal("deployed contract address is not valid utf-8".into()))?;
            (None, Some(with_0x(strip_0x(deployed))))
        }
        Some(call) => (Some(with_0x(&call.callee)), None),
        None => (None, None),
    };

    let events = decode_events(&transaction.events)?;
    let logs = events.iter().enumerate().map(|(i, event)| location.log(event, i)).collect();

    Ok(TxReceipt {
        transaction_hash: location.hash.clone(),
        transaction_index: location.index.clone(),
        block_hash: info.hash.clone(),
        block_number: info.number.clone(),
        contract_address,
        gas_used: "0x0".into(),
        cumulative_gas_used: "0x0".into(),
        to,
        logs,
        logs_bloom: logs_bloom(&events).to_string(),
        status: if valid { "0x1" } else { "0x0" }.into(),
    })
}
