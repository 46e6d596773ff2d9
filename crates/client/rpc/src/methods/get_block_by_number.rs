use gp_convert::with_0x;
use gp_ledger::{decode_channel_header, decode_transaction};
use gp_rpc::{Block, BlockTransactions, Transaction};

use crate::resolver::BlockRef;
use crate::shape::{BlockInfo, TxLocation};
use crate::{EthRpcResult, EthService};

/// Get a block by its number
///
/// ### Arguments
///
/// * `block` - Block number or tag. `pending` is not supported.
/// * `full_transactions` - Whether to return full transactions or only their
///   hashes.
///
/// ### Returns
///
/// The block. Its hash is the ledger data hash, its parent hash the ledger
/// previous hash. Empty transaction slots are skipped. Full transactions only
/// carry callee and input, the sender is not known to the ledger.
pub async fn get_block_by_number(service: &EthService, block: BlockRef, full_transactions: bool) -> EthRpcResult<Block> {
    let number = service.resolve_block(block).await?;
    let block = service.block_by_number(number).await?;
    let info = BlockInfo::of(&block)?;

    let transactions = match full_transactions {
        true => BlockTransactions::Full(
            block
                .transactions()
                .map(|(index, raw)| -> EthRpcResult<Transaction> {
                    let transaction = decode_transaction(raw)?;
                    Ok(TxLocation::new(&info, transaction.tx_id(), index).transaction(&transaction))
                })
                .collect::<EthRpcResult<_>>()?,
        ),
        false => BlockTransactions::Hashes(
            block
                .transactions()
                .map(|(_, raw)| -> EthRpcResult<String> { Ok(with_0x(decode_channel_header(raw)?.tx_id)) })
                .collect::<EthRpcResult<_>>()?,
        ),
    };
    tracing::debug!("Block {} has {} transactions", info.number, block.transactions().count());

    Ok(Block { number: info.number, hash: info.hash, parent_hash: info.parent_hash, transactions })
}
