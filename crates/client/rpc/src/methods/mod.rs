//! One file per RPC method. Each method takes already decoded parameters;
//! wire level parameter handling lives in the dispatch table.

mod accounts;
mod block_number;
mod call;
mod estimate_gas;
mod get_balance;
mod get_block_by_number;
mod get_code;
mod get_logs;
mod get_transaction_by_hash;
mod get_transaction_receipt;
mod net_version;
mod send_transaction;

pub use accounts::*;
pub use block_number::*;
pub use call::*;
pub use estimate_gas::*;
pub use get_balance::*;
pub use get_block_by_number::*;
pub use get_code::*;
pub use get_logs::*;
pub use get_transaction_by_hash::*;
pub use get_transaction_receipt::*;
pub use net_version::*;
pub use send_transaction::*;
