use gp_convert::to_quantity;

use crate::resolver::BlockRef;
use crate::{EthRpcResult, EthService};

/// Get the number of the most recent block
///
/// ### Errors
///
/// Fails when the ledger has no block at all, or when the chain height
/// query fails.
pub async fn block_number(service: &EthService) -> EthRpcResult<String> {
    Ok(to_quantity(service.resolve_block(BlockRef::Latest).await?))
}
