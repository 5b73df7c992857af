//! Bech32 account addresses and the store keys derived from them

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Human-readable prefix of mainnet addresses
pub const MAINNET_HRP: &str = "bnb";

/// Human-readable prefix of testnet addresses
pub const TESTNET_HRP: &str = "tbnb";

/// Key prefix of the account store
pub const ACCOUNT_KEY_PREFIX: &[u8] = b"account:";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("bech32 decoding failed:: {0}")]
    Bech32(String),

    #[error("prefix mismatch:: expected {expected}, got {actual}")]
    PrefixMismatch { expected: String, actual: String },

    #[error("invalid human-readable prefix:: {0}")]
    InvalidPrefix(String),

    #[error("invalid padding:: {0}")]
    InvalidPadding(String),

    #[error("empty address payload")]
    EmptyPayload,
}

impl From<AddressError> for bncnode_errors::Error {
    fn from(err: AddressError) -> Self {
        bncnode_errors::Error::InvalidAddress(err.to_string())
    }
}

/// Account address: human-readable prefix plus the raw payload bytes
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    hrp: String,
    bytes: Vec<u8>,
}

impl Address {
    /// Decode a bech32 string, requiring the given human-readable prefix.
    ///
    /// Fails on a bad checksum or a prefix mismatch; the payload is never
    /// truncated or partially returned.
    pub fn decode(address: &str, expected_hrp: &str) -> Result<Self, AddressError> {
        let checked = CheckedHrpstring::new::<Bech32>(address)
            .map_err(|e| AddressError::Bech32(e.to_string()))?;
        let actual = checked.hrp().to_string().to_ascii_lowercase();
        if actual != expected_hrp.to_ascii_lowercase() {
            return Err(AddressError::PrefixMismatch {
                expected: expected_hrp.to_string(),
                actual,
            });
        }
        // leftover bits must be at most four and all zero
        checked
            .validate_segwit_padding()
            .map_err(|e| AddressError::InvalidPadding(e.to_string()))?;
        let bytes: Vec<u8> = checked.byte_iter().collect();
        if bytes.is_empty() {
            return Err(AddressError::EmptyPayload);
        }
        Ok(Self { hrp: actual, bytes })
    }

    /// Build an address from raw payload bytes
    pub fn from_bytes(hrp: &str, bytes: &[u8]) -> Result<Self, AddressError> {
        Hrp::parse(hrp).map_err(|e| AddressError::InvalidPrefix(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AddressError::EmptyPayload);
        }
        Ok(Self {
            hrp: hrp.to_ascii_lowercase(),
            bytes: bytes.to_vec(),
        })
    }

    /// Encode back to the bech32 string form
    pub fn to_bech32(&self) -> String {
        // hrp and payload were validated at construction
        Hrp::parse(&self.hrp)
            .ok()
            .and_then(|hrp| bech32::encode::<Bech32>(hrp, &self.bytes).ok())
            .unwrap_or_default()
    }

    /// Human-readable prefix
    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key of this account in the account store
    pub fn store_key(&self) -> StoreKey {
        let mut key = Vec::with_capacity(ACCOUNT_KEY_PREFIX.len() + self.bytes.len());
        key.extend_from_slice(ACCOUNT_KEY_PREFIX);
        key.extend_from_slice(&self.bytes);
        StoreKey(key)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let (hrp, _) = bech32::decode(&s).map_err(serde::de::Error::custom)?;
        Self::decode(&s, &hrp.to_string()).map_err(serde::de::Error::custom)
    }
}

/// Raw account store key: `"account:"` followed by the address payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreKey(Vec<u8>);

impl StoreKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex of the address payload alone, without the `"account:"` prefix
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.0[ACCOUNT_KEY_PREFIX.len()..])
    }

    /// Hex of the whole key
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

    fn encode(hrp: &str, bytes: &[u8]) -> String {
        Address::from_bytes(hrp, bytes).unwrap().to_bech32()
    }

    #[test]
    fn test_decode_mainnet_address() {
        let payload = [0x11u8; 20];
        let text = encode(MAINNET_HRP, &payload);
        assert!(text.starts_with("bnb1"));

        let addr = Address::decode(&text, MAINNET_HRP).unwrap();
        assert_eq!(addr.as_bytes(), &payload);
        assert_eq!(addr.hrp(), "bnb");
        assert_eq!(addr.to_string(), text);
    }

    #[test]
    fn test_prefix_mismatch_is_rejected() {
        let text = encode(TESTNET_HRP, &[7u8; 20]);
        let err = Address::decode(&text, MAINNET_HRP).unwrap_err();
        assert_eq!(
            err,
            AddressError::PrefixMismatch {
                expected: "bnb".to_string(),
                actual: "tbnb".to_string(),
            }
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(Address::decode("not-an-address", MAINNET_HRP).is_err());
        assert!(Address::decode("", MAINNET_HRP).is_err());
    }

    #[test]
    fn test_non_canonical_padding_is_rejected() {
        let canonical = "bnb1zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3regwnp";
        let addr = Address::decode(canonical, MAINNET_HRP).unwrap();
        assert_eq!(addr.as_bytes(), &[0x11u8; 20]);
        assert_eq!(addr.to_bech32(), canonical);

        // valid checksums, but a whole extra 5-bit group and a set padding bit
        for text in [
            "bnb1zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3lahqpy4",
            "bnb1zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3z9rvjg0n",
        ] {
            assert!(matches!(
                Address::decode(text, MAINNET_HRP),
                Err(AddressError::InvalidPadding(_))
            ));
        }

        // same 21 bytes with clean padding still decode
        let clean = Address::decode("bnb1zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zy76xajp", MAINNET_HRP)
            .unwrap();
        assert_eq!(clean.as_bytes(), &[0x11u8; 21]);
    }

    #[test]
    fn test_error_maps_to_invalid_address() {
        let err: bncnode_errors::Error = Address::decode("bnb1xyz", MAINNET_HRP)
            .unwrap_err()
            .into();
        assert!(matches!(err, bncnode_errors::Error::InvalidAddress(_)));
    }

    #[test]
    fn test_store_key() {
        let payload = [0xabu8; 20];
        let addr = Address::from_bytes(MAINNET_HRP, &payload).unwrap();
        let key = addr.store_key();

        assert!(key.as_bytes().starts_with(b"account:"));
        assert_eq!(key.payload_hex(), "ab".repeat(20));
        assert_eq!(key.to_hex(), format!("6163636f756e743a{}", "ab".repeat(20)));
    }

    #[test]
    fn test_serde_uses_bech32_string() {
        let addr = Address::from_bytes(MAINNET_HRP, &[3u8; 20]).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.to_bech32()));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    proptest! {
        #[test]
        fn prop_round_trip(payload in proptest::collection::vec(any::<u8>(), 20)) {
            let text = encode(MAINNET_HRP, &payload);
            let addr = Address::decode(&text, MAINNET_HRP).unwrap();
            prop_assert_eq!(addr.as_bytes(), payload.as_slice());
            prop_assert_eq!(addr.to_bech32(), text);
        }

        #[test]
        fn prop_single_substitution_fails(
            payload in proptest::collection::vec(any::<u8>(), 20),
            position in 0usize..38,
            shift in 1usize..32,
        ) {
            let text = encode(MAINNET_HRP, &payload);
            // data part starts right after "bnb1"
            let index = 4 + position % (text.len() - 4);
            let original = text.as_bytes()[index] as char;
            let current = CHARSET.find(original).unwrap();
            let replacement = CHARSET.as_bytes()[(current + shift) % 32] as char;

            let mut corrupted = text.clone();
            corrupted.replace_range(index..index + 1, &replacement.to_string());

            prop_assert!(Address::decode(&corrupted, MAINNET_HRP).is_err());
        }
    }
}
