use crate::{EthRpcResult, EthService};

/// Chaincode function returning the address of the calling identity.
pub const ACCOUNT_FUNCTION: &str = "account";

/// List the accounts owned by the gateway
///
/// The gateway has exactly one account: the EVM address the chaincode derives
/// from the identity the gateway signs with.
pub async fn accounts(service: &EthService) -> EthRpcResult<Vec<String>> {
    let payload = service.query(ACCOUNT_FUNCTION, vec![]).await?;
    Ok(vec![format!("0x{}", String::from_utf8_lossy(&payload).to_lowercase())])
}
