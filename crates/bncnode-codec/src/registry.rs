//! Amino type prefixes and the registry of concrete types this client knows
//!
//! Amino prepends every value stored behind an interface with four prefix
//! bytes derived from the name the concrete type was registered under. The
//! registry maps those bytes back to a [`ConcreteType`]. It is built once and
//! never mutated, so a single instance can be shared by every decode call.

use crate::error::{CodecError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

/// Registered amino names
pub mod type_names {
    pub const APP_ACCOUNT: &str = "bnbchain/Account";
    pub const FIXED_FEE_PARAMS: &str = "params/FixedFeeParams";
    pub const TRANSFER_FEE_PARAMS: &str = "params/TransferFeeParams";
    pub const DEX_FEE_PARAM: &str = "params/DexFeeParam";
    pub const PUB_KEY_SECP256K1: &str = "tendermint/PubKeySecp256k1";
}

/// Four-byte amino type prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Prefix([u8; 4]);

impl Prefix {
    pub const LEN: usize = 4;

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Derive the prefix amino assigns to a registered name.
    ///
    /// `sha256(name)` with leading zero bytes dropped, then three
    /// disambiguation bytes skipped, then zero bytes dropped again; the next
    /// four bytes are the prefix.
    pub fn from_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = digest
            .iter()
            .copied()
            .skip_while(|b| *b == 0)
            .skip(3)
            .skip_while(|b| *b == 0);

        let mut prefix = [0u8; 4];
        for slot in prefix.iter_mut() {
            *slot = bytes.next().unwrap_or_default();
        }
        Self(prefix)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

/// Concrete types the client decodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    AppAccount,
    FixedFeeParams,
    TransferFeeParam,
    DexFeeParam,
    PubKeySecp256k1,
}

impl ConcreteType {
    pub const ALL: [ConcreteType; 5] = [
        ConcreteType::AppAccount,
        ConcreteType::FixedFeeParams,
        ConcreteType::TransferFeeParam,
        ConcreteType::DexFeeParam,
        ConcreteType::PubKeySecp256k1,
    ];

    pub fn amino_name(&self) -> &'static str {
        match self {
            ConcreteType::AppAccount => type_names::APP_ACCOUNT,
            ConcreteType::FixedFeeParams => type_names::FIXED_FEE_PARAMS,
            ConcreteType::TransferFeeParam => type_names::TRANSFER_FEE_PARAMS,
            ConcreteType::DexFeeParam => type_names::DEX_FEE_PARAM,
            ConcreteType::PubKeySecp256k1 => type_names::PUB_KEY_SECP256K1,
        }
    }

    pub fn prefix(&self) -> Prefix {
        Prefix::from_name(self.amino_name())
    }
}

/// Immutable prefix to type lookup table
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: HashMap<Prefix, ConcreteType>,
}

impl TypeRegistry {
    /// Registry with every type in [`ConcreteType::ALL`]
    pub fn new() -> Self {
        Self::with_types(&ConcreteType::ALL)
    }

    /// Registry restricted to the given types
    pub fn with_types(types: &[ConcreteType]) -> Self {
        Self {
            types: types.iter().map(|ty| (ty.prefix(), *ty)).collect(),
        }
    }

    /// Check if a prefix is registered
    pub fn contains(&self, prefix: &Prefix) -> bool {
        self.types.contains_key(prefix)
    }

    pub fn lookup(&self, prefix: &Prefix) -> Option<ConcreteType> {
        self.types.get(prefix).copied()
    }

    /// Prefix of a registered type
    pub fn prefix_of(&self, ty: ConcreteType) -> Result<Prefix> {
        let prefix = ty.prefix();
        if self.contains(&prefix) {
            Ok(prefix)
        } else {
            Err(CodecError::Unregistered(ty.amino_name()))
        }
    }

    /// Split a prefixed value into its prefix and the concrete encoding
    pub fn split<'a>(&self, value: &'a [u8]) -> Result<(Prefix, &'a [u8])> {
        if value.len() < Prefix::LEN {
            return Err(CodecError::TruncatedPrefix(value.len()));
        }
        let (head, body) = value.split_at(Prefix::LEN);
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(head);
        Ok((Prefix(prefix), body))
    }

    /// Split a value that must hold the `expected` type
    pub fn expect<'a>(&self, value: &'a [u8], expected: ConcreteType) -> Result<&'a [u8]> {
        let (prefix, body) = self.split(value)?;
        match self.lookup(&prefix) {
            Some(ty) if ty == expected => Ok(body),
            _ => Err(CodecError::UnexpectedType {
                expected: expected.amino_name(),
                actual: prefix,
            }),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_prefix() {
        // every amino secp256k1 public key starts with EB5AE987
        assert_eq!(
            Prefix::from_name(type_names::PUB_KEY_SECP256K1),
            Prefix::new([0xEB, 0x5A, 0xE9, 0x87])
        );
    }

    #[test]
    fn test_registered_prefixes() {
        let expected = [
            (ConcreteType::AppAccount, "4BDC4C27"),
            (ConcreteType::FixedFeeParams, "C2A96FA3"),
            (ConcreteType::TransferFeeParam, "9A3D2769"),
            (ConcreteType::DexFeeParam, "495A5044"),
            (ConcreteType::PubKeySecp256k1, "EB5AE987"),
        ];
        for (ty, prefix) in expected {
            assert_eq!(ty.prefix().to_string(), prefix, "{}", ty.amino_name());
        }
    }

    #[test]
    fn test_prefixes_are_distinct() {
        let registry = TypeRegistry::new();
        for ty in ConcreteType::ALL {
            assert_eq!(registry.lookup(&ty.prefix()), Some(ty));
        }
    }

    #[test]
    fn test_restricted_registry() {
        let registry = TypeRegistry::with_types(&[ConcreteType::AppAccount]);
        assert!(registry.contains(&ConcreteType::AppAccount.prefix()));
        assert!(!registry.contains(&ConcreteType::DexFeeParam.prefix()));
    }

    #[test]
    fn test_split_short_value() {
        let registry = TypeRegistry::new();
        assert!(matches!(
            registry.split(&[1, 2, 3]),
            Err(CodecError::TruncatedPrefix(3))
        ));
    }

    #[test]
    fn test_expect_wrong_type() {
        let registry = TypeRegistry::new();
        let mut value = ConcreteType::DexFeeParam.prefix().as_bytes().to_vec();
        value.push(0x0a);

        let err = registry
            .expect(&value, ConcreteType::AppAccount)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedType {
                expected: type_names::APP_ACCOUNT,
                ..
            }
        ));
        assert_eq!(
            registry.expect(&value, ConcreteType::DexFeeParam).unwrap(),
            &[0x0a]
        );
    }

    #[test]
    fn test_prefix_display() {
        assert_eq!(Prefix::new([0xde, 0xad, 0xbe, 0xef]).to_string(), "DEADBEEF");
    }
}
