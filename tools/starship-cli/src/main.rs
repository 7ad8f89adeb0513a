use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use ethers::providers::{Http, Middleware, Provider};
use serde_json::json;
use starship_bridge::{
    config::known_network, CallOptions, ContractBinding, NetworkBook, NetworkConfig, SendEnvelope,
    TransferIntent,
};
use starship_bridge_encoder::{
    build_envelope, default_compose_options, parse_address, parse_hex_bytes, ExecutorOptions,
};
use starship_bridge_types::IStarshipONFT;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod rpc;
mod transfers;

use crate::{
    rpc::{connect, EthersReader, EthersWallet},
    transfers::{append_transfer, TransferRecord},
};

type Binding = ContractBinding<EthersReader, EthersWallet>;

/// Quote and send Starship ONFT transfers between LayerZero-connected networks.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Network book JSON (network key -> contract address, chain id, endpoint id, rpc url).
    ///
    /// A deployments file written by the deploy tooling works as-is.
    #[arg(long, env = "STARSHIP_NETWORKS", default_value = "networks.json")]
    networks: PathBuf,

    /// Network whose contract is called (eg, base-sepolia).
    #[arg(long, env = "STARSHIP_NETWORK", default_value = "base-sepolia")]
    network: String,

    /// RPC URL for `--network`; overrides the book's `rpc_url`.
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Path to a file containing the signer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<PathBuf>,

    /// Signer private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Seconds to wait on a network switch or a read call.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the send envelope and `quoteSend` calldata (offline).
    Envelope {
        #[command(flatten)]
        transfer: TransferArgs,
    },
    /// Print LayerZero executor options (offline).
    Options {
        #[arg(long, default_value_t = 300_000)]
        lz_receive_gas: u128,
        #[arg(long, default_value_t = 700_000)]
        compose_gas: u128,
        /// Wei forwarded to the composer.
        #[arg(long, default_value_t = 450_000_000_000_000)]
        compose_value: u128,
    },
    /// Price a transfer with `quoteSend`.
    Quote {
        #[command(flatten)]
        transfer: TransferArgs,
        #[arg(long)]
        pay_in_lz_token: bool,
    },
    /// Quote, then submit `send` with the quoted native fee.
    Send {
        #[command(flatten)]
        transfer: TransferArgs,
        /// Refund address; must be the loaded key's address (default).
        #[arg(long)]
        refund_address: Option<String>,
        /// Where submitted transfers are recorded.
        #[arg(long, default_value = "transfers.json")]
        log_path: PathBuf,
    },
    /// Mint tokens (signed by the recipient, default: the loaded key).
    Mint {
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value = "1")]
        amount: String,
    },
    Balance {
        owner: String,
    },
    Owner {
        token_id: String,
    },
    TokenUri {
        token_id: String,
    },
}

#[derive(Args, Debug)]
struct TransferArgs {
    /// Destination network key (or a raw endpoint id); its endpoint id becomes `dstEid`.
    #[arg(long)]
    to_network: String,

    #[arg(long)]
    token_id: String,

    /// Destination composer contract.
    #[arg(long)]
    composer: String,

    #[arg(long)]
    player_id: u8,

    /// Executor options as hex (default: empty).
    #[arg(long, conflicts_with = "compose_options")]
    options: Option<String>,

    /// Use lzReceive 300k gas + compose 700k gas with 0.00045 ether.
    #[arg(long)]
    compose_options: bool,
}

impl TransferArgs {
    fn intent(&self, dst_eid: u32) -> Result<TransferIntent> {
        let token_id = parse_u256(&self.token_id)?;
        let composer = parse_address(&self.composer).context("invalid --composer")?;
        let mut intent = TransferIntent::new(dst_eid, token_id, composer, self.player_id);
        if self.compose_options {
            intent = intent.with_execution_options(default_compose_options());
        } else if let Some(ref options) = self.options {
            let options = parse_hex_bytes(options).context("invalid --options")?;
            intent = intent.with_execution_options(options);
        }
        Ok(intent)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = CallOptions::with_timeout(Duration::from_secs(cli.timeout_secs));

    match &cli.command {
        Command::Envelope { transfer } => {
            let book = load_book_if_present(&cli)?;
            let intent = transfer.intent(destination_eid(book.as_ref(), &transfer.to_network)?)?;
            let envelope = build_envelope(&intent);
            let quote_calldata = IStarshipONFT::quoteSendCall {
                _sendParam: envelope.to_send_param(),
                _payInLzToken: false,
            }
            .abi_encode();
            let mut out = envelope_json(&envelope);
            out["quote_calldata"] = json!(hex0x(&quote_calldata));
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Options {
            lz_receive_gas,
            compose_gas,
            compose_value,
        } => {
            let options = ExecutorOptions::new()
                .add_lz_receive(*lz_receive_gas, 0)
                .add_lz_compose(0, *compose_gas, *compose_value);
            println!("{}", hex0x(options.as_slice()));
        }
        Command::Quote {
            transfer,
            pay_in_lz_token,
        } => {
            let (book, binding) = open_binding(&cli, false).await?;
            let intent = transfer.intent(destination_eid(Some(&book), &transfer.to_network)?)?;
            let quote = binding
                .quote(&build_envelope(&intent), *pay_in_lz_token, &opts)
                .await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "network": binding.network(),
                    "dst_eid": intent.destination_network_id,
                    "native_fee": quote.native_fee.to_string(),
                    "alternate_token_fee": quote.alternate_token_fee.to_string(),
                }))?
            );
        }
        Command::Send {
            transfer,
            refund_address,
            log_path,
        } => {
            let (book, binding) = open_binding(&cli, true).await?;
            let intent = transfer.intent(destination_eid(Some(&book), &transfer.to_network)?)?;
            let refund = match refund_address {
                Some(addr) => parse_address(addr).context("invalid --refund-address")?,
                None => signer_address(&binding)?,
            };
            let composer = intent.recipient_composer_address;

            let mut attempt = binding.prepare_transfer(intent);
            let quote = attempt.quote(&binding, false, &opts).await?;
            info!(native_fee = %quote.native_fee, "submitting send with quoted fee");
            let handle = attempt.submit(&binding, refund, composer, &opts).await?;

            let intent = attempt.intent();
            append_transfer(
                log_path,
                &TransferRecord {
                    network: binding.network(),
                    tx_hash: handle.to_string(),
                    dst_eid: intent.destination_network_id,
                    token_id: intent.token_id.to_string(),
                    player_id: intent.player_id,
                    composer: composer.to_string(),
                    refund_address: refund.to_string(),
                    native_fee: quote.native_fee.to_string(),
                    alternate_token_fee: quote.alternate_token_fee.to_string(),
                },
            )?;
            println!("Submitted transfer of token {} in tx {}", intent.token_id, handle);
        }
        Command::Mint { to, amount } => {
            let (_, binding) = open_binding(&cli, true).await?;
            let to = match to {
                Some(addr) => parse_address(addr).context("invalid --to")?,
                None => signer_address(&binding)?,
            };
            let handle = binding.mint(to, parse_u256(amount)?, &opts).await?;
            println!("Submitted mint to {to} in tx {handle}");
        }
        Command::Balance { owner } => {
            let (_, binding) = open_binding(&cli, false).await?;
            let owner = parse_address(owner).context("invalid owner")?;
            println!("{}", binding.balance_of(owner, &opts).await?);
        }
        Command::Owner { token_id } => {
            let (_, binding) = open_binding(&cli, false).await?;
            println!("{}", binding.owner_of(parse_u256(token_id)?, &opts).await?);
        }
        Command::TokenUri { token_id } => {
            let (_, binding) = open_binding(&cli, false).await?;
            println!("{}", binding.token_uri(parse_u256(token_id)?, &opts).await?);
        }
    }
    Ok(())
}

async fn open_binding(cli: &Cli, with_wallet: bool) -> Result<(NetworkBook, Binding)> {
    let book = NetworkBook::load(&cli.networks)?;
    let config = book.get(&cli.network)?.clone();
    let rpc_url = cli
        .rpc_url
        .clone()
        .or_else(|| config.rpc_url.clone())
        .ok_or_else(|| {
            anyhow!(
                "no RPC URL for `{}`: pass --rpc-url (or RPC_URL) or set rpc_url in {}",
                cli.network,
                cli.networks.display()
            )
        })?;
    let provider = connect(&rpc_url)?;

    let wallet = if with_wallet {
        Some(load_wallet(cli, &book, &config, provider.clone()).await?)
    } else {
        None
    };
    let binding = ContractBinding::new(
        cli.network.clone(),
        &config,
        EthersReader::new(provider),
        wallet,
    );
    Ok((book, binding))
}

async fn load_wallet(
    cli: &Cli,
    book: &NetworkBook,
    config: &NetworkConfig,
    source: Provider<Http>,
) -> Result<EthersWallet> {
    let key = if let Some(ref path) = cli.private_key_path {
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?
    } else if let Some(ref key) = cli.private_key {
        key.clone()
    } else {
        bail!(
            "missing signer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
        );
    };

    let mut providers = HashMap::new();
    for cfg in book.networks.values() {
        if let Some(ref url) = cfg.rpc_url {
            providers.insert(cfg.chain_id, connect(url)?);
        }
    }

    // The wallet starts on whatever chain the source endpoint actually serves.
    let active = match source.get_chainid().await {
        Ok(id) => Some(id.as_u64()),
        Err(e) => {
            tracing::warn!(error = %e, "could not read chain id from source endpoint");
            None
        }
    };
    if let Some(id) = active {
        providers.insert(id, source);
        if id != config.chain_id {
            info!(
                active = id,
                expected = config.chain_id,
                "source endpoint serves a different chain"
            );
        }
    }

    EthersWallet::from_private_key(&key, providers, active)
}

fn load_book_if_present(cli: &Cli) -> Result<Option<NetworkBook>> {
    if cli.networks.exists() {
        Ok(Some(NetworkBook::load(&cli.networks)?))
    } else {
        Ok(None)
    }
}

/// Endpoint id for a network key, a built-in network, or a literal eid.
fn destination_eid(book: Option<&NetworkBook>, key: &str) -> Result<u32> {
    if let Some(cfg) = book.and_then(|b| b.networks.get(key)) {
        return Ok(cfg.endpoint_id);
    }
    if let Some((_, eid)) = known_network(key) {
        return Ok(eid);
    }
    key.parse::<u32>()
        .map_err(|_| anyhow!("unknown destination network `{key}`"))
}

fn signer_address(binding: &Binding) -> Result<Address> {
    binding
        .wallet()
        .map(EthersWallet::address)
        .ok_or_else(|| anyhow!("no signer loaded"))
}

fn parse_u256(raw: &str) -> Result<U256> {
    raw.trim()
        .parse::<U256>()
        .map_err(|e| anyhow!("invalid uint256 `{raw}`: {e}"))
}

fn hex0x(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn envelope_json(envelope: &SendEnvelope) -> serde_json::Value {
    json!({
        "dst_eid": envelope.destination_network_id,
        "to": envelope.recipient_field.to_string(),
        "token_id": envelope.token_id.to_string(),
        "extra_options": hex0x(&envelope.execution_options),
        "compose_msg": hex0x(&envelope.compose_message),
        "onft_cmd": hex0x(&envelope.command),
    })
}
