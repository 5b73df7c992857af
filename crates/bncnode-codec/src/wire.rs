//! Field layouts of the amino-encoded structs.
//!
//! Amino numbers struct fields by position and uses protobuf wire types, so
//! the structs decode with prost once the type prefix is stripped. Fields
//! this client ignores are still declared so encoding stays faithful.

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct CoinProto {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(int64, tag = "2")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct BaseAccountProto {
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub coins: Vec<CoinProto>,
    /// Prefixed public key, empty until the account has signed once
    #[prost(bytes = "vec", tag = "3")]
    pub public_key: Vec<u8>,
    #[prost(int64, tag = "4")]
    pub account_number: i64,
    #[prost(int64, tag = "5")]
    pub sequence: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct AppAccountProto {
    #[prost(message, optional, tag = "1")]
    pub base: Option<BaseAccountProto>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, repeated, tag = "3")]
    pub frozen: Vec<CoinProto>,
    #[prost(message, repeated, tag = "4")]
    pub locked: Vec<CoinProto>,
    #[prost(uint64, tag = "5")]
    pub flags: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct FixedFeeParamsProto {
    #[prost(string, tag = "1")]
    pub msg_type: String,
    #[prost(int64, tag = "2")]
    pub fee: i64,
    /// int8 on the chain side, zigzag encoded
    #[prost(sint32, tag = "3")]
    pub fee_for: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct TransferFeeParamProto {
    #[prost(message, optional, tag = "1")]
    pub fixed_fee_params: Option<FixedFeeParamsProto>,
    #[prost(int64, tag = "2")]
    pub multi_transfer_fee: i64,
    #[prost(int64, tag = "3")]
    pub lower_limit_as_multi: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct DexFeeFieldProto {
    #[prost(string, tag = "1")]
    pub fee_name: String,
    #[prost(int64, tag = "2")]
    pub fee_value: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct DexFeeParamProto {
    #[prost(message, repeated, tag = "1")]
    pub dex_fee_fields: Vec<DexFeeFieldProto>,
}

/// A list of interface values: each element is a length-delimited field 1
/// holding a prefixed concrete encoding.
#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct InterfaceListProto {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub elements: Vec<Vec<u8>>,
}
