use anyhow::{Context, Result};
use bncnode_client::cli::{set_config_value, Cli, Commands, ConfigAction, ConfigCmd, GlobalOpts};
use bncnode_client::{ClientConfig, NodeClient, OutputFormat};
use bncnode_codec::{find_transfer, AccountRecord, FeeParam};
use bncnode_log::LogFormat;
use bncnode_types::{Balance, Block, NodeStatus, Transaction};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.global_opts.verbose, cli.global_opts.log_json)?;

    let opts = cli.global_opts;
    match cli.command {
        Commands::Version => version_command(),
        Commands::Config(ConfigCmd { action }) => config_command(action, &opts),
        command => {
            let config = opts.load_config().context("failed to load configuration")?;
            let client = NodeClient::from_config(&config)?;
            query_command(&client, command, &config).await
        }
    }
}

fn setup_logging(verbose: bool, json: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let format = if json { LogFormat::Json } else { LogFormat::Text };
    bncnode_log::init_tracing_with_level(level, format)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging:: {e}"))
}

fn version_command() -> Result<()> {
    println!("bncnode {}", env!("CARGO_PKG_VERSION"));
    println!("build: {}", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn config_command(action: ConfigAction, opts: &GlobalOpts) -> Result<()> {
    let home = opts.home_dir();
    match action {
        ConfigAction::Show => {
            tracing::debug!(home = %home.display(), "showing configuration");
            let config = opts.load_config().context("failed to load configuration")?;
            emit(config.output, &config, || render_config(&config))
        }
        ConfigAction::Init { overwrite } => {
            // with overwrite an existing file is not parsed
            let mut config = ClientConfig::init(Some(&home), overwrite)?;
            println!(
                "Configuration written to {}",
                ClientConfig::config_file(Some(&home)).display()
            );
            opts.apply(&mut config);
            emit(config.output, &config, || render_config(&config))
        }
        ConfigAction::Set { key, value } => {
            set_config_value(&home, &key, &value)?;
            println!("{key} = {value}");
            Ok(())
        }
    }
}

async fn query_command(
    client: &NodeClient,
    command: Commands,
    config: &ClientConfig,
) -> Result<()> {
    let output = config.output;
    match command {
        Commands::Status => {
            let status = client.get_status().await?;
            emit(output, &status, || render_status(&status))
        }
        Commands::Height => {
            let height = client.get_block_height().await?;
            emit(output, &height, || height.to_string())
        }
        Commands::Block(cmd) => {
            let block = client.get_block_by_height(cmd.height).await?;
            emit(output, &block, || render_block(&block))
        }
        Commands::BlockHash(cmd) => {
            let hash = client.get_block_hash(cmd.height).await?;
            emit(output, &hash, || hash.clone())
        }
        Commands::Tx(cmd) => {
            let tx = client.get_transaction(&cmd.hash).await?;
            emit(output, &tx, || render_transaction(&tx))
        }
        Commands::Account(cmd) => {
            let account = client.get_account(&cmd.address).await?;
            emit(output, &account, || render_account(&cmd.address, &account))
        }
        Commands::Balance(cmd) => {
            let denom = cmd.get_denom(config);
            let balance = client.get_balance(&cmd.address, &denom).await?;
            emit(output, &balance, || render_balance(&balance))
        }
        Commands::Fees(cmd) => {
            let schedule = client.get_fee_params(cmd.height).await?;
            let transfer = find_transfer(&schedule)?;
            let fees = FeeReport {
                height: cmd.height,
                fee: transfer.fixed.fee,
                multi_transfer_fee: transfer.multi_transfer_fee,
                schedule: &schedule,
            };
            emit(output, &fees, || render_fees(&fees))
        }
        Commands::Broadcast(cmd) => {
            let hash = client.send_transaction(&cmd.signed_tx).await?;
            emit(output, &hash, || hash.clone())
        }
        Commands::Config(_) | Commands::Version => Ok(()),
    }
}

#[derive(Serialize)]
struct FeeReport<'a> {
    height: u64,
    fee: i64,
    multi_transfer_fee: i64,
    schedule: &'a [FeeParam],
}

fn emit<T: Serialize>(output: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}

fn render_config(config: &ClientConfig) -> String {
    format!(
        "node:    {}\nnetwork: {}\ndenom:   {}\ntimeout: {}s\noutput:  {}",
        config.node, config.network, config.denom, config.timeout, config.output
    )
}

fn render_status(status: &NodeStatus) -> String {
    format!(
        "network:     {}\nmoniker:     {}\nheight:      {}\nblock hash:  {}\nblock time:  {}\ncatching up: {}",
        status.network,
        status.moniker,
        status.latest_block_height,
        status.latest_block_hash,
        status.latest_block_time,
        status.catching_up
    )
}

fn render_block(block: &Block) -> String {
    let mut text = format!(
        "hash:     {}\nheight:   {}\nchain:    {}\ntime:     {}\nprevious: {}\ntxs:      {}",
        block.hash,
        block.height,
        block.chain_id,
        block.time,
        block.previous_hash,
        block.tx_count()
    );
    for hash in &block.tx_hashes {
        text.push_str("\n  ");
        text.push_str(hash);
    }
    text
}

fn render_transaction(tx: &Transaction) -> String {
    format!(
        "hash:    {}\nheight:  {}\nindex:   {}\nsuccess: {}\ncode:    {}\nlog:     {}",
        tx.hash,
        tx.height,
        tx.index,
        tx.is_success(),
        tx.code,
        tx.log
    )
}

fn render_account(address: &str, account: &AccountRecord) -> String {
    let mut text = format!(
        "address:        {address}\naccount number: {}\nsequence:       {}",
        account.account_number, account.sequence
    );
    if !account.name.is_empty() {
        text.push_str(&format!("\nname:           {}", account.name));
    }
    for (label, coins) in [
        ("coins", &account.coins),
        ("frozen", &account.frozen),
        ("locked", &account.locked),
    ] {
        if coins.is_empty() {
            continue;
        }
        text.push_str(&format!("\n{label}:"));
        for coin in coins {
            text.push_str(&format!("\n  {} {}", coin.amount, coin.denom));
        }
    }
    text
}

fn render_balance(balance: &Balance) -> String {
    format!("{} {}", balance.amount, balance.denom)
}

fn render_fees(fees: &FeeReport<'_>) -> String {
    let mut text = format!(
        "height:             {}\ntransfer fee:       {}\nmulti transfer fee: {}\nschedule:",
        fees.height, fees.fee, fees.multi_transfer_fee
    );
    for param in fees.schedule {
        let msg_type = param.msg_type().unwrap_or("-");
        text.push_str(&format!("\n  {:<10} {}", param.param_type(), msg_type));
    }
    text
}
