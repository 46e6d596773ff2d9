use gp_convert::{bytes_to_hex, strip_0x};
use gp_rpc::EthArgs;

use crate::{EthRpcApiError, EthRpcResult, EthService};

/// Execute a message call against the ledger state without creating a
/// transaction
///
/// The chaincode is queried with the callee as function name and the call
/// data as single argument.
///
/// ### Returns
///
/// The return data of the call, `0x` prefixed.
pub async fn call(service: &EthService, args: &EthArgs) -> EthRpcResult<String> {
    let to = args.to().ok_or_else(|| EthRpcApiError::invalid_params("eth_call requires a `to` address"))?;
    let payload = service.query(strip_0x(to), vec![strip_0x(args.data()).as_bytes().to_vec()]).await?;
    Ok(bytes_to_hex(payload))
}
