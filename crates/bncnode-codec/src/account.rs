//! Account records stored under `account:<address>`

use crate::error::{CodecError, Result};
use crate::registry::{ConcreteType, TypeRegistry};
use crate::wire::{AppAccountProto, BaseAccountProto, CoinProto};
use prost::Message;
use serde::{Deserialize, Serialize};

/// A single coin balance as stored on chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: i64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: i64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl From<CoinProto> for Coin {
    fn from(proto: CoinProto) -> Self {
        Self {
            denom: proto.denom,
            amount: proto.amount,
        }
    }
}

impl From<&Coin> for CoinProto {
    fn from(coin: &Coin) -> Self {
        Self {
            denom: coin.denom.clone(),
            amount: coin.amount,
        }
    }
}

/// Decoded application account.
///
/// `Default` is the record of an address that has never been funded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub address: Vec<u8>,
    pub account_number: i64,
    pub sequence: i64,
    pub coins: Vec<Coin>,
    /// Compressed secp256k1 key, absent until the account has signed
    pub public_key: Option<Vec<u8>>,
    pub name: String,
    pub frozen: Vec<Coin>,
    pub locked: Vec<Coin>,
    pub flags: u64,
}

impl AccountRecord {
    /// Free balance of `denom`; zero when the denom is not held
    pub fn amount_of(&self, denom: &str) -> i64 {
        self.coins
            .iter()
            .find(|coin| coin.denom == denom)
            .map(|coin| coin.amount)
            .unwrap_or(0)
    }

    pub fn coin(&self, denom: &str) -> Option<&Coin> {
        self.coins.iter().find(|coin| coin.denom == denom)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Decode the raw bytes of an account store value.
///
/// Empty input is the store's representation of an absent account and
/// yields the zero record.
pub fn decode_account(registry: &TypeRegistry, value: &[u8]) -> Result<AccountRecord> {
    if value.is_empty() {
        return Ok(AccountRecord::default());
    }

    let body = registry.expect(value, ConcreteType::AppAccount)?;
    let app = AppAccountProto::decode(body)?;
    let base = app.base.unwrap_or_default();

    Ok(AccountRecord {
        address: base.address,
        account_number: base.account_number,
        sequence: base.sequence,
        coins: base.coins.into_iter().map(Coin::from).collect(),
        public_key: decode_public_key(registry, &base.public_key)?,
        name: app.name,
        frozen: app.frozen.into_iter().map(Coin::from).collect(),
        locked: app.locked.into_iter().map(Coin::from).collect(),
        flags: app.flags,
    })
}

/// Encode an account the way the node stores it
pub fn encode_account(registry: &TypeRegistry, account: &AccountRecord) -> Result<Vec<u8>> {
    let prefix = registry.prefix_of(ConcreteType::AppAccount)?;
    let app = AppAccountProto {
        base: Some(BaseAccountProto {
            address: account.address.clone(),
            coins: account.coins.iter().map(CoinProto::from).collect(),
            public_key: encode_public_key(registry, account.public_key.as_deref())?,
            account_number: account.account_number,
            sequence: account.sequence,
        }),
        name: account.name.clone(),
        frozen: account.frozen.iter().map(CoinProto::from).collect(),
        locked: account.locked.iter().map(CoinProto::from).collect(),
        flags: account.flags,
    };

    let mut buf = Vec::with_capacity(4 + app.encoded_len());
    buf.extend_from_slice(prefix.as_bytes());
    app.encode(&mut buf)?;
    Ok(buf)
}

fn decode_public_key(registry: &TypeRegistry, value: &[u8]) -> Result<Option<Vec<u8>>> {
    if value.is_empty() {
        return Ok(None);
    }
    let mut body = registry.expect(value, ConcreteType::PubKeySecp256k1)?;
    let len = prost::encoding::decode_varint(&mut body)?;
    if len != body.len() as u64 {
        return Err(CodecError::LengthMismatch {
            declared: len,
            actual: body.len(),
        });
    }
    Ok(Some(body.to_vec()))
}

fn encode_public_key(registry: &TypeRegistry, key: Option<&[u8]>) -> Result<Vec<u8>> {
    let Some(key) = key else {
        return Ok(Vec::new());
    };
    let mut buf = registry
        .prefix_of(ConcreteType::PubKeySecp256k1)?
        .as_bytes()
        .to_vec();
    prost::encoding::encode_varint(key.len() as u64, &mut buf);
    buf.extend_from_slice(key);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::type_names;

    fn funded_account() -> AccountRecord {
        AccountRecord {
            address: vec![0x42; 20],
            account_number: 1234,
            sequence: 56,
            coins: vec![Coin::new("BNB", 100_000_000), Coin::new("BUSD-BD1", 5_000)],
            public_key: Some(vec![0x02; 33]),
            name: String::new(),
            frozen: vec![Coin::new("BNB", 7)],
            locked: vec![],
            flags: 0,
        }
    }

    #[test]
    fn test_empty_value_is_zero_account() {
        let registry = TypeRegistry::new();
        let account = decode_account(&registry, &[]).unwrap();
        assert!(account.is_empty());
        assert_eq!(account.amount_of("BNB"), 0);
        assert_eq!(account.sequence, 0);
    }

    #[test]
    fn test_decode_encoded_account() {
        let registry = TypeRegistry::new();
        let account = funded_account();
        let bytes = encode_account(&registry, &account).unwrap();

        assert_eq!(&bytes[..4], ConcreteType::AppAccount.prefix().as_bytes());

        let decoded = decode_account(&registry, &bytes).unwrap();
        assert_eq!(decoded, account);
        assert_eq!(decoded.amount_of("BUSD-BD1"), 5_000);
        assert_eq!(decoded.amount_of("XRP-BF2"), 0);
    }

    // bnbchain/Account: 123456789 BNB and 5e9 BUSD-BD1, signed once,
    // account 35, sequence 7, 2500 BNB frozen, flags 1
    const NODE_ACCOUNT: &str = "4bdc4c270a600a141d0e3086e8e4e0a53c38a90d55bd58b34d57d2fa120a0a03424e4210959aef3a12100a08425553442d4244311080e497d0121a26eb5ae9872102a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1202328071a080a03424e4210c4132801";

    #[test]
    fn test_decode_node_bytes() {
        let registry = TypeRegistry::new();
        let bytes = hex::decode(NODE_ACCOUNT).unwrap();

        let account = decode_account(&registry, &bytes).unwrap();
        assert_eq!(
            hex::encode(&account.address),
            "1d0e3086e8e4e0a53c38a90d55bd58b34d57d2fa"
        );
        assert_eq!(account.account_number, 35);
        assert_eq!(account.sequence, 7);
        assert_eq!(
            account.coins,
            vec![
                Coin::new("BNB", 123_456_789),
                Coin::new("BUSD-BD1", 5_000_000_000)
            ]
        );
        let mut key = vec![0x02];
        key.extend_from_slice(&[0xa1; 32]);
        assert_eq!(account.public_key, Some(key));
        assert_eq!(account.name, "");
        assert_eq!(account.frozen, vec![Coin::new("BNB", 2_500)]);
        assert!(account.locked.is_empty());
        assert_eq!(account.flags, 1);

        assert_eq!(encode_account(&registry, &account).unwrap(), bytes);
    }

    #[test]
    fn test_public_key_layout() {
        let encoded = encode_public_key(&TypeRegistry::new(), Some(&[0x03; 33])).unwrap();
        assert_eq!(&encoded[..5], &[0xEB, 0x5A, 0xE9, 0x87, 0x21]);
        assert_eq!(encoded.len(), 5 + 33);
    }

    #[test]
    fn test_account_without_public_key() {
        let registry = TypeRegistry::new();
        let account = AccountRecord {
            public_key: None,
            ..funded_account()
        };
        let bytes = encode_account(&registry, &account).unwrap();
        let decoded = decode_account(&registry, &bytes).unwrap();
        assert_eq!(decoded.public_key, None);
    }

    #[test]
    fn test_wrong_prefix_is_rejected() {
        let registry = TypeRegistry::new();
        let mut bytes = encode_account(&registry, &funded_account()).unwrap();
        bytes[0] ^= 0xff;
        assert!(matches!(
            decode_account(&registry, &bytes),
            Err(CodecError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn test_encode_requires_registered_type() {
        let registry = TypeRegistry::with_types(&[ConcreteType::DexFeeParam]);
        assert!(matches!(
            encode_account(&registry, &funded_account()),
            Err(CodecError::Unregistered(type_names::APP_ACCOUNT))
        ));
    }

    #[test]
    fn test_truncated_body_is_rejected() {
        let registry = TypeRegistry::new();
        let bytes = encode_account(&registry, &funded_account()).unwrap();
        let truncated = &bytes[..bytes.len() - 3];
        assert!(matches!(
            decode_account(&registry, truncated),
            Err(CodecError::Decode(_))
        ));
    }
}
