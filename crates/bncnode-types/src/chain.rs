//! Wallet-facing views of chain data

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Balance of one denom held by an address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: String,
    pub denom: String,
    pub amount: Amount,
}

impl Balance {
    /// Balance of an account that does not hold the denom (or does not exist)
    pub fn zero(address: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            denom: denom.into(),
            amount: Amount::zero(),
        }
    }
}

/// Sync state reported by `/status`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub network: String,
    pub moniker: String,
    pub latest_block_height: u64,
    pub latest_block_hash: String,
    pub latest_block_time: String,
    pub catching_up: bool,
}

/// Block summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub hash: String,
    pub height: u64,
    pub chain_id: String,
    pub time: String,
    pub previous_hash: String,
    /// Hashes of the contained transactions, in block order
    pub tx_hashes: Vec<String>,
    #[serde(skip)]
    pub txs: Vec<Vec<u8>>,
}

impl Block {
    pub fn tx_count(&self) -> usize {
        self.tx_hashes.len()
    }
}

/// Committed transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub height: u64,
    pub index: u32,
    pub code: u32,
    pub log: String,
    #[serde(skip)]
    pub raw: Vec<u8>,
}

impl Transaction {
    /// Deliver code 0 means the transaction was applied
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Transaction hash as the node reports it: uppercase hex SHA-256 of the raw bytes
pub fn tx_hash(raw: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(raw))
}
