//! Ledger side data model of the gateway.
//!
//! The ledger hands out blocks as nested protobuf messages. This crate
//! declares those messages, and turns a block, an envelope or a chaincode
//! event into the plain values the RPC layer shapes into Ethereum replies.
//! Decoding is pure: no function here performs I/O.

mod block;
mod envelope;
mod event;
pub mod proto;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use block::*;
pub use envelope::*;
pub use event::*;
pub use proto::Block;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("failed to decode {what}: {source}")]
    Protobuf {
        what: &'static str,
        #[source]
        source: prost::DecodeError,
    },
    #[error("payload has no header")]
    MissingHeader,
    #[error("transaction has no actions")]
    NoActions,
    #[error("no payload in ChaincodeActionPayload")]
    MissingProposalResponse,
    #[error("response payload is missing extension")]
    MissingExtension,
    #[error("block has no header")]
    MissingBlockHeader,
    #[error("block has no validity flag for transaction {0}")]
    MissingValidationCode(usize),
}

impl DecodeError {
    pub(crate) fn protobuf(what: &'static str) -> impl FnOnce(prost::DecodeError) -> Self {
        move |source| Self::Protobuf { what, source }
    }
}
