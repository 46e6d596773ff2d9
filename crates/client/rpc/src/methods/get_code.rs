use gp_convert::strip_0x;
use gp_ledger::GET_CODE_FUNCTION;

use crate::{EthRpcResult, EthService};

/// Get the code deployed at an address
///
/// ### Arguments
///
/// * `address` - Contract address, with or without `0x` prefix.
///
/// ### Returns
///
/// The runtime bytecode exactly as the chaincode stores it. No prefix is added.
///
/// ### Errors
///
/// Fails when the ledger query fails.
pub async fn get_code(service: &EthService, address: &str) -> EthRpcResult<String> {
    let payload = service.query(GET_CODE_FUNCTION, vec![strip_0x(address).as_bytes().to_vec()]).await?;
    Ok(String::from_utf8_lossy(&payload).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{rpc_test_setup, TestLedger, BYTECODE, CONTRACT};
    use crate::EthRpcApiError;
    use assert_matches::assert_matches;
    use gc_ledger::LedgerError;
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[case::prefixed("0x82373458164820947891abcdefabcdefabcdefab")]
    #[case::bare(CONTRACT)]
    #[tokio::test]
    async fn test_get_code_passes_payload_through(#[case] address: &str) {
        let mut ledger = TestLedger::new();
        ledger
            .expect_query()
            .with(eq("evmcc"), eq("getCode"), eq(vec![CONTRACT.as_bytes().to_vec()]))
            .times(1)
            .returning(|_, _, _| Ok(BYTECODE.as_bytes().to_vec()));
        let rpc = rpc_test_setup(ledger);

        assert_eq!(get_code(&rpc, address).await.unwrap(), BYTECODE);
    }

    #[tokio::test]
    async fn test_get_code_ledger_failure() {
        let mut ledger = TestLedger::new();
        ledger.expect_query().returning(|_, _, _| Err(LedgerError::InvalidUrl("unreachable".into())));
        let rpc = rpc_test_setup(ledger);

        assert_matches!(get_code(&rpc, CONTRACT).await, Err(EthRpcApiError::LedgerQuery(msg)) => {
            assert!(msg.contains("unreachable"));
        });
    }
}
