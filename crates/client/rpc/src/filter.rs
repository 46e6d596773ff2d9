//! Log filters of `eth_getLogs`.
//!
//! Filters are validated and normalized once, before the ledger is touched.
//! Matching then compares typed values, so case and `0x` prefixes of the
//! chaincode events never matter.

use gp_convert::{Address, Topic};
use gp_ledger::EventRecord;
use gp_rpc::{GetLogsArgs, OneOrMany, TopicSelector};

use crate::resolver::BlockRef;
use crate::{EthRpcApiError, EthRpcResult};

/// Emitters a log must come from. Empty matches every emitter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressFilter(Vec<Address>);

impl AddressFilter {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self(addresses)
    }

    pub fn matches(&self, address: &str) -> bool {
        self.0.is_empty() || self.0.iter().any(|candidate| candidate.matches_hex(address))
    }
}

impl TryFrom<OneOrMany> for AddressFilter {
    type Error = EthRpcApiError;

    fn try_from(value: OneOrMany) -> Result<Self, Self::Error> {
        let addresses = match value {
            OneOrMany::One(address) => vec![Address::parse(&address)?],
            OneOrMany::Many(addresses) => {
                addresses.iter().map(|address| Address::parse(address)).collect::<Result<_, _>>()?
            }
        };
        Ok(Self(addresses))
    }
}

/// Positional topic alternatives: AND across positions, OR within one.
///
/// An empty position is a wildcard. A log with fewer topics than there are
/// positions never matches, wildcards included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicsFilter(Vec<Vec<Topic>>);

impl TopicsFilter {
    pub fn new(positions: Vec<Vec<Topic>>) -> Self {
        Self(positions)
    }

    pub fn matches(&self, topics: &[String]) -> bool {
        if topics.len() < self.0.len() {
            return false;
        }
        self.0
            .iter()
            .zip(topics)
            .all(|(alternatives, topic)| {
                alternatives.is_empty() || alternatives.iter().any(|candidate| candidate.matches_hex(topic))
            })
    }
}

fn parse_position(position: Option<TopicSelector>) -> EthRpcResult<Vec<Topic>> {
    match position {
        None => Ok(Vec::new()),
        Some(TopicSelector::One(topic)) => Ok(vec![Topic::parse(&topic)?]),
        Some(TopicSelector::AnyOf(alternatives)) => {
            let parsed = alternatives
                .iter()
                .filter(|topic| !topic.is_empty())
                .map(|topic| Topic::parse(topic))
                .collect::<Result<Vec<_>, _>>()?;
            // an empty alternative accepts any topic at this position
            match parsed.len() < alternatives.len() {
                true => Ok(Vec::new()),
                false => Ok(parsed),
            }
        }
    }
}

impl TryFrom<Vec<Option<TopicSelector>>> for TopicsFilter {
    type Error = EthRpcApiError;

    fn try_from(positions: Vec<Option<TopicSelector>>) -> Result<Self, Self::Error> {
        Ok(Self(positions.into_iter().map(parse_position).collect::<EthRpcResult<_>>()?))
    }
}

/// True when the log passes both the emitter and the topics filter.
pub fn matches(log: &EventRecord, addresses: &AddressFilter, topics: &TopicsFilter) -> bool {
    addresses.matches(&log.address) && topics.matches(&log.topics)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from_block: BlockRef,
    pub to_block: BlockRef,
    pub addresses: AddressFilter,
    pub topics: TopicsFilter,
}

impl LogFilter {
    pub fn matches(&self, log: &EventRecord) -> bool {
        matches(log, &self.addresses, &self.topics)
    }
}

impl TryFrom<GetLogsArgs> for LogFilter {
    type Error = EthRpcApiError;

    fn try_from(args: GetLogsArgs) -> Result<Self, Self::Error> {
        if args.block_hash.is_some() && (args.from_block.is_some() || args.to_block.is_some()) {
            return Err(EthRpcApiError::invalid_params("blockHash cannot be set at the same time as fromBlock or toBlock"));
        }

        let from_block = args.from_block.as_deref().map(str::parse::<BlockRef>).transpose()?.unwrap_or_default();
        let to_block = args.to_block.as_deref().map(str::parse::<BlockRef>).transpose()?.unwrap_or_default();
        if from_block == BlockRef::Earliest || to_block == BlockRef::Earliest {
            return Err(EthRpcApiError::unimplemented("the earliest block cannot bound a log filter"));
        }

        let addresses = args.address.map(AddressFilter::try_from).transpose()?.unwrap_or_default();
        let topics = args.topics.map(TopicsFilter::try_from).transpose()?.unwrap_or_default();

        if args.block_hash.is_some() {
            return Err(EthRpcApiError::unimplemented("filtering logs by block hash"));
        }

        Ok(Self { from_block, to_block, addresses, topics })
    }
}
