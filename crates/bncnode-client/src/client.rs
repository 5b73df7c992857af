//! Node client exposing the wallet-facing queries

use crate::config::ClientConfig;
use crate::envelope::parse_envelope;
use crate::mapper;
use crate::query::{self, Query};
use crate::transport::{HttpTransport, Transport};
use bncnode_codec::{find_transfer, AccountRecord, AminoCodec, FeeParam};
use bncnode_errors::{Error, Result};
use bncnode_types::{Address, Balance, Block, NodeStatus, Transaction};
use serde_json::Value;
use tracing::{debug, warn};

/// Client for one node, bound to one address prefix
#[derive(Debug)]
pub struct NodeClient<T = HttpTransport> {
    transport: T,
    codec: AminoCodec,
    hrp: String,
}

impl NodeClient<HttpTransport> {
    /// HTTP client for the configured node and network
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.node, config.timeout())?;
        Ok(Self::new(transport, config.network.hrp()))
    }
}

impl<T: Transport> NodeClient<T> {
    pub fn new(transport: T, hrp: impl Into<String>) -> Self {
        Self {
            transport,
            codec: AminoCodec::new(),
            hrp: hrp.into(),
        }
    }

    /// Replace the amino codec
    pub fn with_codec(mut self, codec: AminoCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Run a query and unwrap its `result`
    async fn call(&self, query: Query) -> Result<Value> {
        debug!(path = %query.path, method = %query.method, "node request");
        let response = self.transport.request(&query.path, &query.method).await?;
        debug!(status = response.status, bytes = response.body.len(), "node response");

        parse_envelope(response.status, &response.body).inspect_err(|err| {
            warn!(path = %query.path, code = err.code(), error = %err, "node request failed");
        })
    }

    fn decode_address(&self, address: &str) -> Result<Address> {
        Ok(Address::decode(address, &self.hrp)?)
    }

    pub async fn get_status(&self) -> Result<NodeStatus> {
        let result = self.call(query::status_query()).await?;
        mapper::map_status(&result)
    }

    /// Height of the latest block the node has
    pub async fn get_block_height(&self) -> Result<u64> {
        Ok(self.get_status().await?.latest_block_height)
    }

    pub async fn get_block_hash(&self, height: u64) -> Result<String> {
        let result = self.call(query::block_by_height_query(height)).await?;
        mapper::block_hash(&result)
    }

    /// Block lookup by hash.
    ///
    /// The node facade offers no hash index this client relies on, so the
    /// lookup is unsupported.
    pub async fn get_block(&self, hash: &str) -> Result<Block> {
        debug!(hash, "block lookup by hash requested");
        Err(Error::Unimplemented("block lookup by hash"))
    }

    pub async fn get_block_by_height(&self, height: u64) -> Result<Block> {
        let result = self.call(query::block_by_height_query(height)).await?;
        mapper::map_block(&result)
    }

    pub async fn get_transaction(&self, txid: &str) -> Result<Transaction> {
        hex::decode(txid)
            .map_err(|e| Error::MalformedPayload(format!("tx hash is not hex:: {e}")))?;

        let result = self.call(query::tx_query(txid)).await?;
        mapper::map_transaction(&result)
    }

    /// Decoded account record; an address never funded yields the zero record
    pub async fn get_account(&self, address: &str) -> Result<AccountRecord> {
        let address = self.decode_address(address)?;
        self.fetch_account(&address).await
    }

    async fn fetch_account(&self, address: &Address) -> Result<AccountRecord> {
        let key = address.store_key();
        let result = self.call(query::account_query(&key.payload_hex())).await?;
        let value = mapper::store_value(&result)?;
        if value.is_empty() {
            debug!(%address, "account not found, using zero record");
        }
        Ok(self.codec.decode_account(&value)?)
    }

    pub async fn get_account_number_and_sequence(&self, address: &str) -> Result<(i64, i64)> {
        let account = self.get_account(address).await?;
        Ok((account.account_number, account.sequence))
    }

    /// Balance of `denom`; zero when the account or the denom is absent
    pub async fn get_balance(&self, address: &str, denom: &str) -> Result<Balance> {
        let address = self.decode_address(address)?;
        let account = self.fetch_account(&address).await?;
        mapper::map_balance(&address, denom, &account)
    }

    /// Whole fee schedule in force at `height`
    pub async fn get_fee_params(&self, height: u64) -> Result<Vec<FeeParam>> {
        let result = self.call(query::fee_param_query(height)).await?;
        let value = mapper::store_value(&result)?;
        Ok(self.codec.decode_fee_params(&value)?)
    }

    /// Fixed fee of a single transfer at `height`
    pub async fn get_fee_by_height(&self, height: u64) -> Result<u64> {
        let params = self.get_fee_params(height).await?;
        let transfer = find_transfer(&params)?;
        non_negative(transfer.fixed.fee, "transfer fee")
    }

    /// Per-output fee of a multi-output transfer at `height`
    pub async fn get_multi_fee_by_height(&self, height: u64) -> Result<u64> {
        let params = self.get_fee_params(height).await?;
        let transfer = find_transfer(&params)?;
        non_negative(transfer.multi_transfer_fee, "multi transfer fee")
    }

    /// Broadcast a signed transaction and wait for commit; returns its hash
    pub async fn send_transaction(&self, signed_tx_hex: &str) -> Result<String> {
        hex::decode(signed_tx_hex)
            .map_err(|e| Error::MalformedPayload(format!("signed tx is not hex:: {e}")))?;

        let result = self.call(query::broadcast_query(signed_tx_hex)).await?;
        mapper::map_broadcast(&result).inspect_err(|err| {
            warn!(error = %err, "broadcast rejected");
        })
    }
}

fn non_negative(fee: i64, what: &str) -> Result<u64> {
    u64::try_from(fee).map_err(|_| Error::MalformedPayload(format!("negative {what} {fee}")))
}
