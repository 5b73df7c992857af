//! Client library for Binance Chain full nodes.
//!
//! [`NodeClient`] builds queries against the node's RPC facade, unwraps the
//! JSON-RPC envelopes and maps the results (amino store values included) to
//! wallet types. The HTTP side sits behind the [`Transport`] trait so the
//! client can be driven by [`MemoryTransport`] in tests.

pub mod cli;
pub mod client;
pub mod config;
pub mod envelope;
pub mod mapper;
pub mod query;
pub mod transport;

pub use bncnode_errors::{Error as NodeError, Result};
pub use client::NodeClient;
pub use config::{ClientConfig, ConfigError, Network, OutputFormat};
pub use envelope::parse_envelope;
pub use query::Query;
pub use transport::{HttpTransport, MemoryTransport, RawResponse, Transport};
