use gp_convert::strip_0x;
use gp_rpc::EthArgs;

use crate::{EthRpcResult, EthService};

/// Submit a transaction to the ledger and wait for it to be committed
///
/// A missing `to` deploys the call data as a new contract: the chaincode is
/// invoked with the zero address as callee.
///
/// ### Returns
///
/// The ledger transaction id, unmodified. It doubles as the transaction hash
/// for every other method.
///
/// ### Errors
///
/// Fails when endorsement, ordering or commit fails.
pub async fn send_transaction(service: &EthService, args: &EthArgs) -> EthRpcResult<String> {
    let callee = match args.to() {
        Some(to) => strip_0x(to).to_owned(),
        None => EthService::zero_address(),
    };
    let invocation = service.execute(&callee, vec![strip_0x(args.data()).as_bytes().to_vec()]).await?;
    tracing::debug!("Transaction {} committed", invocation.transaction_id);
    Ok(invocation.transaction_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{rpc_test_setup, TestLedger, BYTECODE, CONTRACT, ZERO_ADDRESS};
    use crate::EthRpcApiError;
    use assert_matches::assert_matches;
    use gc_ledger::{Invocation, LedgerError};
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[case::missing_to(None)]
    #[case::empty_to(Some(""))]
    #[tokio::test]
    async fn test_contract_creation_targets_zero_address(#[case] to: Option<&str>) {
        let mut ledger = TestLedger::new();
        ledger
            .expect_execute()
            .with(eq("evmcc"), eq(ZERO_ADDRESS), eq(vec![BYTECODE.as_bytes().to_vec()]))
            .times(1)
            .returning(|_, _, _| Ok(Invocation { transaction_id: "abcd".into(), payload: CONTRACT.into() }));
        let rpc = rpc_test_setup(ledger);

        let args = EthArgs { to: to.map(str::to_owned), data: Some(format!("0x{BYTECODE}")), ..Default::default() };
        assert_eq!(send_transaction(&rpc, &args).await.unwrap(), "abcd");
    }

    #[tokio::test]
    async fn test_invoke_existing_contract() {
        let mut ledger = TestLedger::new();
        ledger
            .expect_execute()
            .with(eq("evmcc"), eq(CONTRACT), eq(vec![b"a9059cbb".to_vec()]))
            .times(1)
            .returning(|_, _, _| Ok(Invocation { transaction_id: "0xnot-touched".into(), payload: vec![] }));
        let rpc = rpc_test_setup(ledger);

        let args = EthArgs { to: Some(format!("0x{CONTRACT}")), data: Some("a9059cbb".into()), ..Default::default() };
        assert_eq!(send_transaction(&rpc, &args).await.unwrap(), "0xnot-touched");
    }

    #[tokio::test]
    async fn test_execute_failure() {
        let mut ledger = TestLedger::new();
        ledger.expect_execute().returning(|_, _, _| Err(LedgerError::InvalidUrl("endorsement".into())));
        let rpc = rpc_test_setup(ledger);

        assert_matches!(send_transaction(&rpc, &EthArgs::default()).await, Err(EthRpcApiError::LedgerExecute(_)));
    }
}
