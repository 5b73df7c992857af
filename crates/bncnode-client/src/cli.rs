//! CLI definitions for the bncnode binary

use crate::config::{ClientConfig, ConfigError, Network, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Implementation block for GlobalOpts to resolve values from ClientConfig
impl GlobalOpts {
    /// Home directory holding `config.toml`
    pub fn home_dir(&self) -> PathBuf {
        self.home
            .clone()
            .unwrap_or_else(ClientConfig::default_config_dir)
    }

    /// Load the configuration file and apply command line overrides
    pub fn load_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::load_or_default(Some(&self.home_dir()))?;
        self.apply(&mut config);
        Ok(config)
    }

    /// Override config values given on the command line
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(node) = &self.node {
            config.node = node.clone();
        }
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
    }
}

impl BalanceCmd {
    /// Get the effective denom (from CLI arg or config)
    pub fn get_denom(&self, config: &ClientConfig) -> String {
        self.denom.clone().unwrap_or_else(|| config.denom.clone())
    }
}

/// Binance Chain node client CLI
#[derive(Parser, Debug)]
#[command(name = "bncnode")]
#[command(about = "Query balances, fees and blocks from a Binance Chain node")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global_opts: GlobalOpts,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global CLI options
#[derive(Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Home directory holding config.toml
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Node RPC endpoint
    #[arg(long, global = true)]
    pub node: Option<String>,

    /// Network, selects the address prefix
    #[arg(long, global = true, value_enum)]
    pub network: Option<Network>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Node sync status
    Status,

    /// Latest block height
    Height,

    /// Block at a height
    Block(HeightCmd),

    /// Hash of the block at a height
    BlockHash(HeightCmd),

    /// Transaction by hash
    Tx(TxCmd),

    /// Account number, sequence and coins
    Account(AccountCmd),

    /// Balance of one denom
    Balance(BalanceCmd),

    /// Transfer fees and the full fee schedule at a height
    Fees(HeightCmd),

    /// Broadcast a signed transaction and wait for commit
    Broadcast(BroadcastCmd),

    /// Configuration management
    Config(ConfigCmd),

    /// Display version information
    Version,
}

#[derive(Args, Debug)]
pub struct HeightCmd {
    /// Block height
    pub height: u64,
}

#[derive(Args, Debug)]
pub struct TxCmd {
    /// Transaction hash, hex without 0x
    pub hash: String,
}

#[derive(Args, Debug)]
pub struct AccountCmd {
    /// Bech32 account address
    pub address: String,
}

#[derive(Args, Debug)]
pub struct BalanceCmd {
    /// Bech32 account address
    pub address: String,

    /// Denom, defaults to the configured one
    #[arg(long)]
    pub denom: Option<String>,
}

#[derive(Args, Debug)]
pub struct BroadcastCmd {
    /// Hex-encoded signed transaction
    pub signed_tx: String,
}

#[derive(Args, Debug)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default config.toml
    Init {
        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },

    /// Set one configuration value
    Set {
        /// One of node, network, denom, timeout, output
        key: String,
        value: String,
    },
}

/// Apply `config set` to the file under `home`
pub fn set_config_value(home: &Path, key: &str, value: &str) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::load_or_default(Some(home))?;
    config.set(key, value)?;

    std::fs::create_dir_all(home)?;
    config.save_to_file(ClientConfig::config_file(Some(home)))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_generation() {
        let mut cmd = Cli::command();
        let help = cmd.render_help().to_string();
        assert!(help.contains("bncnode"));
        assert!(help.contains("balance"));
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "bncnode",
            "--node",
            "http://localhost:8080",
            "--network",
            "testnet",
            "--verbose",
            "status",
        ]);

        assert_eq!(
            cli.global_opts.node,
            Some("http://localhost:8080".to_string())
        );
        assert_eq!(cli.global_opts.network, Some(Network::Testnet));
        assert!(cli.global_opts.verbose);
        assert!(!cli.global_opts.log_json);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["bncnode", "height", "--output", "json"]);
        assert_eq!(cli.global_opts.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Height));
    }

    #[test]
    fn test_balance_command() {
        let cli = Cli::parse_from(["bncnode", "balance", "bnb1abc", "--denom", "BUSD-BD1"]);

        if let Commands::Balance(balance_cmd) = cli.command {
            assert_eq!(balance_cmd.address, "bnb1abc");
            assert_eq!(
                balance_cmd.get_denom(&ClientConfig::default()),
                "BUSD-BD1"
            );
        } else {
            panic!("Expected Balance command");
        }
    }

    #[test]
    fn test_balance_denom_from_config() {
        let cli = Cli::parse_from(["bncnode", "balance", "bnb1abc"]);

        if let Commands::Balance(balance_cmd) = cli.command {
            assert_eq!(balance_cmd.get_denom(&ClientConfig::default()), "BNB");
        } else {
            panic!("Expected Balance command");
        }
    }

    #[test]
    fn test_block_hash_command() {
        let cli = Cli::parse_from(["bncnode", "block-hash", "12345"]);

        if let Commands::BlockHash(cmd) = cli.command {
            assert_eq!(cmd.height, 12345);
        } else {
            panic!("Expected BlockHash command");
        }
    }

    #[test]
    fn test_invalid_height_is_rejected() {
        assert!(Cli::try_parse_from(["bncnode", "fees", "minus-one"]).is_err());
    }

    #[test]
    fn test_config_set_command() {
        let cli = Cli::parse_from(["bncnode", "config", "set", "network", "testnet"]);

        if let Commands::Config(ConfigCmd {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "network");
            assert_eq!(value, "testnet");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let temp_dir = tempdir().unwrap();
        let home = temp_dir.path().to_str().unwrap();
        let cli = Cli::parse_from([
            "bncnode",
            "--home",
            home,
            "--node",
            "https://dataseed1.binance.org",
            "status",
        ]);

        let config = cli.global_opts.load_config().unwrap();
        assert_eq!(config.node, "https://dataseed1.binance.org");
        assert_eq!(config.network, Network::Mainnet);
    }

    #[test]
    fn test_set_config_value_persists() {
        let temp_dir = tempdir().unwrap();
        let home = temp_dir.path().join("nested");

        set_config_value(&home, "denom", "XRP-BF2").unwrap();
        let loaded = ClientConfig::load_or_default(Some(&home)).unwrap();
        assert_eq!(loaded.denom, "XRP-BF2");

        assert!(set_config_value(&home, "timeout", "soon").is_err());
    }
}
