//! Mapping of node `result` payloads onto wallet types
//!
//! Tendermint reports heights as decimal strings on some endpoints and as
//! numbers on others; both are accepted.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bncnode_codec::AccountRecord;
use bncnode_errors::{Error, Result};
use bncnode_types::{tx_hash, Address, Amount, Balance, Block, NodeStatus, Transaction};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn u64_from_str_or_num<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn value_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn from_result<T: DeserializeOwned>(result: &Value, what: &str) -> Result<T> {
    T::deserialize(result).map_err(|e| Error::MalformedPayload(format!("{what}:: {e}")))
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    #[serde(default)]
    node_info: NodeInfo,
    sync_info: SyncInfo,
}

#[derive(Debug, Default, Deserialize)]
struct NodeInfo {
    #[serde(default)]
    network: String,
    #[serde(default)]
    moniker: String,
}

#[derive(Debug, Deserialize)]
struct SyncInfo {
    #[serde(default)]
    latest_block_hash: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    latest_block_height: u64,
    #[serde(default)]
    latest_block_time: String,
    #[serde(default)]
    catching_up: bool,
}

#[derive(Debug, Default, Deserialize)]
struct BlockId {
    #[serde(default)]
    hash: String,
}

#[derive(Debug, Deserialize)]
struct BlockResult {
    block: BlockBody,
}

#[derive(Debug, Deserialize)]
struct BlockBody {
    header: Header,
    #[serde(default)]
    data: BlockData,
}

#[derive(Debug, Deserialize)]
struct Header {
    #[serde(default)]
    chain_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    height: u64,
    #[serde(default)]
    time: String,
    #[serde(default)]
    last_block_id: BlockId,
}

#[derive(Debug, Default, Deserialize)]
struct BlockData {
    #[serde(default)]
    txs: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    hash: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    height: u64,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    tx_result: DeliverResult,
    #[serde(default)]
    tx: String,
}

#[derive(Debug, Default, Deserialize)]
struct DeliverResult {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    log: String,
}

/// `/status` result
pub fn map_status(result: &Value) -> Result<NodeStatus> {
    let status: StatusResult = from_result(result, "status")?;
    Ok(NodeStatus {
        network: status.node_info.network,
        moniker: status.node_info.moniker,
        latest_block_height: status.sync_info.latest_block_height,
        latest_block_hash: status.sync_info.latest_block_hash,
        latest_block_time: status.sync_info.latest_block_time,
        catching_up: status.sync_info.catching_up,
    })
}

/// Block hash out of a `/block` result.
///
/// Older nodes nest it under `block_meta`, newer ones put `block_id` at the top.
pub fn block_hash(result: &Value) -> Result<String> {
    ["/block_meta/block_id/hash", "/block_id/hash"]
        .iter()
        .filter_map(|pointer| result.pointer(pointer).and_then(Value::as_str))
        .find(|hash| !hash.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedPayload("block hash missing".to_string()))
}

/// `/block` result
pub fn map_block(result: &Value) -> Result<Block> {
    let hash = block_hash(result)?;
    let block: BlockResult = from_result(result, "block")?;

    let txs = block
        .block
        .data
        .txs
        .unwrap_or_default()
        .iter()
        .map(|tx| STANDARD.decode(tx))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::MalformedPayload(format!("block tx:: {e}")))?;

    let header = block.block.header;
    Ok(Block {
        hash,
        height: header.height,
        chain_id: header.chain_id,
        time: header.time,
        previous_hash: header.last_block_id.hash,
        tx_hashes: txs.iter().map(|tx| tx_hash(tx)).collect(),
        txs,
    })
}

/// `/tx` result
pub fn map_transaction(result: &Value) -> Result<Transaction> {
    let tx: TxResult = from_result(result, "tx")?;
    let raw = STANDARD
        .decode(&tx.tx)
        .map_err(|e| Error::MalformedPayload(format!("tx bytes:: {e}")))?;

    Ok(Transaction {
        hash: tx.hash,
        height: tx.height,
        index: tx.index,
        code: tx.tx_result.code,
        log: tx.tx_result.log,
        raw,
    })
}

/// `/broadcast_tx_commit` result: the tx hash, or the check_tx diagnostic
/// when the transaction was not committed (height zero)
pub fn map_broadcast(result: &Value) -> Result<String> {
    let height = result.get("height").and_then(value_u64).unwrap_or(0);
    if height == 0 {
        let check_tx = match result.get("check_tx") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        return Err(Error::BroadcastRejected(check_tx));
    }

    Ok(result
        .get("hash")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Base64 store value of an `abci_query` result.
///
/// A missing or null value is returned as `""`, the encoding of an absent
/// record. A non-zero ABCI code is a node-reported failure.
pub fn store_value(result: &Value) -> Result<String> {
    let response = match result.get("response") {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(response) => response,
    };

    let code = response.get("code").and_then(value_u64).unwrap_or(0);
    if code != 0 {
        let log = response
            .get("log")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(Error::Rpc {
            code: code as i64,
            message: log.to_string(),
        });
    }

    Ok(response
        .get("value")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Balance of `denom` in a decoded account; a denom not held is zero
pub fn map_balance(address: &Address, denom: &str, account: &AccountRecord) -> Result<Balance> {
    let amount = account.amount_of(denom);
    let amount = Amount::from_i64(amount)
        .ok_or_else(|| Error::MalformedPayload(format!("negative {denom} amount {amount}")))?;

    Ok(Balance {
        address: address.to_string(),
        denom: denom.to_string(),
        amount,
    })
}
