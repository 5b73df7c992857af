//! Amino decoding for Binance Chain application state.
//!
//! `abci_query` answers carry store values as base64 strings holding the
//! chain's amino binary encoding. This crate turns those into
//! [`AccountRecord`]s and fee schedules ([`FeeParam`]). Type prefixes are
//! resolved through an immutable [`TypeRegistry`] built once per codec.

pub mod account;
pub mod error;
pub mod fees;
pub mod registry;
mod wire;

pub use account::{decode_account, encode_account, AccountRecord, Coin};
pub use error::{CodecError, Result};
pub use fees::{
    decode_fee_params, encode_fee_params, find_transfer, DexFeeField, FeeDistribution, FeeParam,
    FixedFee, TransferFee,
};
pub use registry::{ConcreteType, Prefix, TypeRegistry};

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Codec for base64-wrapped amino store values
#[derive(Clone, Debug, Default)]
pub struct AminoCodec {
    registry: TypeRegistry,
}

impl AminoCodec {
    /// Create a codec registering every known type
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
        }
    }

    /// Create a codec with a custom type registry
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Decode a base64 account value; `""` is the unfunded account
    pub fn decode_account(&self, value: &str) -> Result<AccountRecord> {
        let bytes = STANDARD.decode(value.trim())?;
        decode_account(&self.registry, &bytes)
    }

    /// Decode a base64 fee schedule
    pub fn decode_fee_params(&self, value: &str) -> Result<Vec<FeeParam>> {
        let bytes = STANDARD.decode(value.trim())?;
        decode_fee_params(&self.registry, &bytes)
    }

    pub fn encode_account(&self, account: &AccountRecord) -> Result<String> {
        Ok(STANDARD.encode(encode_account(&self.registry, account)?))
    }

    pub fn encode_fee_params(&self, params: &[FeeParam]) -> Result<String> {
        Ok(STANDARD.encode(encode_fee_params(&self.registry, params)?))
    }
}
