/// Get the balance of an account
///
/// Accounts hold no native currency on the ledger: neither the address nor
/// the block is looked at, the balance is always zero.
pub fn get_balance() -> String {
    "0x0".to_owned()
}
