//! Fee schedule stored under `/param/fees`
//!
//! The schedule is a length-prefixed list of interface values. Every element
//! is delimited on its own, so kinds this client does not interpret are kept
//! as [`FeeParam::Unknown`] without disturbing the elements after them.

use crate::error::{CodecError, Result};
use crate::registry::{ConcreteType, Prefix, TypeRegistry};
use crate::wire::{
    DexFeeFieldProto, DexFeeParamProto, FixedFeeParamsProto, InterfaceListProto,
    TransferFeeParamProto,
};
use prost::Message;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Parameter type reported for transfer fees
pub const TRANSFER_FEE_TYPE: &str = "transfer";
/// Parameter type reported for fixed per-message fees
pub const OPERATE_FEE_TYPE: &str = "operate";
/// Parameter type reported for dex fees
pub const DEX_FEE_TYPE: &str = "dex";

/// Who receives a fixed fee
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeDistribution {
    Proposer,
    All,
    Free,
    Other(i32),
}

impl From<i32> for FeeDistribution {
    fn from(value: i32) -> Self {
        match value {
            1 => FeeDistribution::Proposer,
            2 => FeeDistribution::All,
            3 => FeeDistribution::Free,
            other => FeeDistribution::Other(other),
        }
    }
}

impl From<FeeDistribution> for i32 {
    fn from(value: FeeDistribution) -> Self {
        match value {
            FeeDistribution::Proposer => 1,
            FeeDistribution::All => 2,
            FeeDistribution::Free => 3,
            FeeDistribution::Other(other) => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFee {
    pub msg_type: String,
    pub fee: i64,
    pub fee_for: FeeDistribution,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFee {
    pub fixed: FixedFee,
    pub multi_transfer_fee: i64,
    pub lower_limit_as_multi: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexFeeField {
    pub name: String,
    pub value: i64,
}

/// One entry of the fee schedule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeParam {
    Fixed(FixedFee),
    Transfer(TransferFee),
    Dex(Vec<DexFeeField>),
    /// Registered on chain but not interpreted here
    Unknown {
        #[serde(with = "prefix_hex")]
        prefix: Prefix,
        payload: Vec<u8>,
    },
}

impl FeeParam {
    /// Parameter type as the chain reports it
    pub fn param_type(&self) -> &str {
        match self {
            FeeParam::Fixed(_) => OPERATE_FEE_TYPE,
            FeeParam::Transfer(_) => TRANSFER_FEE_TYPE,
            FeeParam::Dex(_) => DEX_FEE_TYPE,
            FeeParam::Unknown { .. } => "unknown",
        }
    }

    /// Message type the fee applies to, where the entry names one
    pub fn msg_type(&self) -> Option<&str> {
        match self {
            FeeParam::Fixed(fixed) => Some(&fixed.msg_type),
            FeeParam::Transfer(transfer) => Some(&transfer.fixed.msg_type),
            _ => None,
        }
    }
}

/// Decode a length-prefixed fee schedule.
///
/// An empty value decodes to an empty schedule.
pub fn decode_fee_params(registry: &TypeRegistry, value: &[u8]) -> Result<Vec<FeeParam>> {
    if value.is_empty() {
        return Ok(Vec::new());
    }

    let mut body = value;
    let declared = prost::encoding::decode_varint(&mut body)?;
    if declared != body.len() as u64 {
        return Err(CodecError::LengthMismatch {
            declared,
            actual: body.len(),
        });
    }

    let list = InterfaceListProto::decode(body)?;
    let mut params = Vec::with_capacity(list.elements.len());
    for element in &list.elements {
        if element.is_empty() {
            // nil interface slot
            continue;
        }
        params.push(decode_fee_param(registry, element)?);
    }
    Ok(params)
}

fn decode_fee_param(registry: &TypeRegistry, element: &[u8]) -> Result<FeeParam> {
    let (prefix, body) = registry.split(element)?;
    let param = match registry.lookup(&prefix) {
        Some(ConcreteType::FixedFeeParams) => {
            FeeParam::Fixed(FixedFeeParamsProto::decode(body)?.into())
        }
        Some(ConcreteType::TransferFeeParam) => {
            let proto = TransferFeeParamProto::decode(body)?;
            FeeParam::Transfer(TransferFee {
                fixed: proto.fixed_fee_params.unwrap_or_default().into(),
                multi_transfer_fee: proto.multi_transfer_fee,
                lower_limit_as_multi: proto.lower_limit_as_multi,
            })
        }
        Some(ConcreteType::DexFeeParam) => FeeParam::Dex(
            DexFeeParamProto::decode(body)?
                .dex_fee_fields
                .into_iter()
                .map(|field| DexFeeField {
                    name: field.fee_name,
                    value: field.fee_value,
                })
                .collect(),
        ),
        _ => {
            trace!(%prefix, len = body.len(), "keeping uninterpreted fee parameter");
            FeeParam::Unknown {
                prefix,
                payload: body.to_vec(),
            }
        }
    };
    Ok(param)
}

/// Encode a fee schedule the way the node stores it
pub fn encode_fee_params(registry: &TypeRegistry, params: &[FeeParam]) -> Result<Vec<u8>> {
    let mut elements = Vec::with_capacity(params.len());
    for param in params {
        let (prefix, body) = match param {
            FeeParam::Fixed(fixed) => (
                registry.prefix_of(ConcreteType::FixedFeeParams)?,
                FixedFeeParamsProto::from(fixed).encode_to_vec(),
            ),
            FeeParam::Transfer(transfer) => (
                registry.prefix_of(ConcreteType::TransferFeeParam)?,
                TransferFeeParamProto {
                    fixed_fee_params: Some(FixedFeeParamsProto::from(&transfer.fixed)),
                    multi_transfer_fee: transfer.multi_transfer_fee,
                    lower_limit_as_multi: transfer.lower_limit_as_multi,
                }
                .encode_to_vec(),
            ),
            FeeParam::Dex(fields) => (
                registry.prefix_of(ConcreteType::DexFeeParam)?,
                DexFeeParamProto {
                    dex_fee_fields: fields
                        .iter()
                        .map(|field| DexFeeFieldProto {
                            fee_name: field.name.clone(),
                            fee_value: field.value,
                        })
                        .collect(),
                }
                .encode_to_vec(),
            ),
            FeeParam::Unknown { prefix, payload } => (*prefix, payload.clone()),
        };

        let mut element = prefix.as_bytes().to_vec();
        element.extend_from_slice(&body);
        elements.push(element);
    }

    Ok(InterfaceListProto { elements }.encode_length_delimited_to_vec())
}

/// The transfer entry of a schedule
pub fn find_transfer(params: &[FeeParam]) -> Result<&TransferFee> {
    params
        .iter()
        .find_map(|param| match param {
            FeeParam::Transfer(transfer) => Some(transfer),
            _ => None,
        })
        .ok_or_else(|| CodecError::FeeParamNotFound(TRANSFER_FEE_TYPE.to_string()))
}

impl From<FixedFeeParamsProto> for FixedFee {
    fn from(proto: FixedFeeParamsProto) -> Self {
        Self {
            msg_type: proto.msg_type,
            fee: proto.fee,
            fee_for: proto.fee_for.into(),
        }
    }
}

impl From<&FixedFee> for FixedFeeParamsProto {
    fn from(fixed: &FixedFee) -> Self {
        Self {
            msg_type: fixed.msg_type.clone(),
            fee: fixed.fee,
            fee_for: fixed.fee_for.into(),
        }
    }
}

mod prefix_hex {
    use super::Prefix;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(prefix: &Prefix, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&prefix.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Prefix, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(&s, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(Prefix::new(bytes))
    }
}
