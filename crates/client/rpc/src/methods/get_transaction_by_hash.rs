use gp_convert::strip_0x;
use gp_rpc::Transaction;

use crate::shape::{BlockInfo, TxLocation};
use crate::{EthRpcApiError, EthRpcResult, EthService};

/// Get the details of a transaction given its hash
///
/// ### Arguments
///
/// * `tx_hash` - The ledger transaction id, with or without `0x` prefix.
///
/// ### Returns
///
/// The transaction with its block and position. `to` and `input` are only
/// present for EVM calls; deployments have no `to`.
///
/// ### Errors
///
/// An empty hash is rejected before reaching the ledger.
pub async fn get_transaction_by_hash(service: &EthService, tx_hash: &str) -> EthRpcResult<Transaction> {
    let tx_id = strip_0x(tx_hash);
    if matches!(tx_id, "" | "0x") {
        return Err(EthRpcApiError::invalid_params("transaction hash is empty"));
    }
    tracing::debug!("Looking up transaction {tx_id}");

    let (block, index, transaction) = service.find_transaction(tx_id).await?;
    let info = BlockInfo::of(&block)?;
    Ok(TxLocation::new(&info, tx_id, index).transaction(&transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_call_transaction(sample_chain: SampleChain) {
        let rpc = rpc_test_setup(sample_chain.ledger());

        assert_eq!(
            get_transaction_by_hash(&rpc, TX_LATER).await.unwrap(),
            Transaction {
                block_hash: SampleChain::block_hash(3),
                block_number: "0x3".into(),
                to: Some(format!("0x{CONTRACT}")),
                input: Some("0xdeadbeef".into()),
                transaction_index: "0x0".into(),
                hash: format!("0x{TX_LATER}"),
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_deployment_has_no_to(sample_chain: SampleChain) {
        let rpc = rpc_test_setup(sample_chain.ledger());

        let transaction = get_transaction_by_hash(&rpc, &format!("0x{TX_DEPLOY}")).await.unwrap();

        assert_eq!(transaction.to, None);
        assert_eq!(transaction.input, Some(format!("0x{BYTECODE}")));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_code_lookup_has_no_call_data(sample_chain: SampleChain) {
        let rpc = rpc_test_setup(sample_chain.ledger());

        let transaction = get_transaction_by_hash(&rpc, TX_GET_CODE).await.unwrap();

        assert_eq!(transaction.to, None);
        assert_eq!(transaction.input, None);
        assert_eq!(transaction.transaction_index, "0x1");
    }

    #[rstest]
    #[case::empty("")]
    #[case::bare_prefix("0x")]
    #[tokio::test]
    async fn test_empty_hash_is_rejected(#[case] tx_hash: &str) {
        let rpc = rpc_test_setup(TestLedger::new());
        assert_matches!(get_transaction_by_hash(&rpc, tx_hash).await, Err(EthRpcApiError::InvalidParams(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_transaction(sample_chain: SampleChain) {
        let rpc = rpc_test_setup(sample_chain.ledger());
        assert_matches!(get_transaction_by_hash(&rpc, "feed").await, Err(EthRpcApiError::LedgerQuery(_)));
    }
}
