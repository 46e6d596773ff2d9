use crate::proto::{Block, BlockHeader, BLOCK_METADATA_INDEX_TRANSACTIONS_FILTER, TX_VALIDATION_CODE_VALID};
use crate::{decode_channel_header, decode_transaction, DecodeError, DecodedTransaction};

impl Block {
    fn block_header(&self) -> Result<&BlockHeader, DecodeError> {
        self.header.as_ref().ok_or(DecodeError::MissingBlockHeader)
    }

    pub fn number(&self) -> Result<u64, DecodeError> {
        Ok(self.block_header()?.number)
    }

    /// Hash of the block contents. The gateway reports it as the block hash.
    pub fn data_hash(&self) -> Result<&[u8], DecodeError> {
        Ok(&self.block_header()?.data_hash)
    }

    pub fn previous_hash(&self) -> Result<&[u8], DecodeError> {
        Ok(&self.block_header()?.previous_hash)
    }

    /// Raw envelopes in ledger order, including empty slots.
    pub fn envelopes(&self) -> &[Vec<u8>] {
        self.data.as_ref().map(|data| data.data.as_slice()).unwrap_or_default()
    }

    /// Non-empty envelopes together with their position in the block.
    pub fn transactions(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.envelopes().iter().enumerate().filter(|(_, raw)| !raw.is_empty()).map(|(i, raw)| (i, raw.as_slice()))
    }

    /// Validation code the committing peer assigned to the transaction at
    /// `index`. Zero means valid.
    pub fn validation_code(&self, index: usize) -> Result<u8, DecodeError> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.metadata.get(BLOCK_METADATA_INDEX_TRANSACTIONS_FILTER))
            .and_then(|filter| filter.get(index))
            .copied()
            .ok_or(DecodeError::MissingValidationCode(index))
    }

    pub fn is_transaction_valid(&self, index: usize) -> Result<bool, DecodeError> {
        Ok(self.validation_code(index)? == TX_VALIDATION_CODE_VALID)
    }

    /// Locates a transaction by id and fully decodes it.
    ///
    /// Only the channel header of the other transactions is decoded.
    pub fn find_transaction(&self, tx_id: &str) -> Result<Option<(usize, DecodedTransaction)>, DecodeError> {
        for (index, raw) in self.transactions() {
            if decode_channel_header(raw)?.tx_id == tx_id {
                return Ok(Some((index, decode_transaction(raw)?)));
            }
        }
        Ok(None)
    }
}
