//! Core types for bncnode.
//!
//! Addresses and the account store keys derived from them, the arbitrary
//! precision [`Amount`], and the domain types handed back to wallets.

pub mod address;
pub mod amount;
pub mod chain;

pub use address::{Address, AddressError, StoreKey, MAINNET_HRP, TESTNET_HRP};
pub use amount::Amount;
pub use chain::{tx_hash, Balance, Block, NodeStatus, Transaction};
