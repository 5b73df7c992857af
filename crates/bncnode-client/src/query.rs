//! Request paths for the node's RPC facade
//!
//! Every builder is pure. Hex arguments are embedded as-is: the node expects
//! raw `0x` literals in the query component, so nothing here form-encodes.

use reqwest::Method;

/// Store path of account records
pub const ACCOUNT_STORE_PATH: &str = "/store/acc/key";

/// Store path of the fee schedule
pub const FEE_PARAM_PATH: &str = "/param/fees";

/// Hex of the ASCII bytes `account:`
pub const ACCOUNT_KEY_PREFIX_HEX: &str = "6163636F756E743A";

/// A request against the node: path plus query string, and the HTTP method
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub path: String,
    pub method: Method,
}

impl Query {
    fn get(path: String) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }
}

/// Node sync status
pub fn status_query() -> Query {
    Query::get("/status".to_string())
}

pub fn block_by_height_query(height: u64) -> Query {
    Query::get(format!("/block?height={height}"))
}

/// Account lookup; `store_key_hex` is the hex of the address payload
pub fn account_query(store_key_hex: &str) -> Query {
    Query::get(format!(
        "/abci_query?path=\"{ACCOUNT_STORE_PATH}\"&data=0x{ACCOUNT_KEY_PREFIX_HEX}{store_key_hex}"
    ))
}

/// Fee schedule as of `height`
pub fn fee_param_query(height: u64) -> Query {
    Query::get(format!(
        "/abci_query?path=\"{FEE_PARAM_PATH}\"&height={height}"
    ))
}

pub fn tx_query(txid_hex: &str) -> Query {
    Query::get(format!("/tx?hash=0x{txid_hex}"))
}

/// Commit a signed transaction and wait for its block
pub fn broadcast_query(signed_tx_hex: &str) -> Query {
    Query::get(format!("/broadcast_tx_commit?tx=0x{signed_tx_hex}"))
}
