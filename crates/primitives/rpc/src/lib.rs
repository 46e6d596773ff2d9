//! Ethereum JSON-RPC shapes.
//!
//! Field names and hex conventions follow the Ethereum JSON-RPC API;
//! wallets and tooling depend on them exactly.

mod args;
mod bloom;
mod reply;

pub use args::*;
pub use bloom::*;
pub use reply::*;
