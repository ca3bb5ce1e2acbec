use clap::{Args, Parser};
use raydium_swap::{
    arguments::{get_enabled_debug_modes, is_any_debug_enabled},
    config::{load_config, load_config_from_path, Config},
    errors::{SwapError, SwapResult},
    logger::{self, LogTag},
    paths,
    pools::SqlitePoolCache,
    rpc::RpcClient,
    swaps::{SessionResult, SwapRequest, SwapSession, TransactionStatus},
};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Exit code for a transaction that was sent but not confirmed in time
const EXIT_UNCONFIRMED: i32 = 2;

/// Swap tokens through a Raydium AMM v4 pool
#[derive(Parser, Debug)]
#[command(name = "raydium-swap", version, about)]
struct Cli {
    /// Mint to sell (`11111111111111111111111111111111` for native SOL)
    #[arg(long)]
    from: String,

    /// Mint to buy
    #[arg(long)]
    to: String,

    /// Amount of the `from` token in human units
    #[arg(long)]
    amount: f64,

    /// Percentage of the expected output accepted as minimum
    #[arg(long, default_value_t = 99.0)]
    slippage: f64,

    /// Config file (defaults to the data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolve, quote and build without submitting
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    #[allow(dead_code)]
    logging: LogFlags,
}

/// Logging flags. Declared so clap accepts them; the logger and debug checks
/// read them through `arguments::has_arg` at runtime.
#[derive(Args, Debug)]
#[allow(dead_code)]
struct LogFlags {
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    quiet: bool,

    #[arg(long)]
    no_log_file: bool,

    /// error, warning, info, debug or verbose
    #[arg(long)]
    log_level: Option<String>,

    /// Comma-separated tags to show, e.g. `swaps,rpc`
    #[arg(long)]
    only_tags: Option<String>,

    #[arg(long, hide = true)]
    debug_swaps: bool,

    #[arg(long, hide = true)]
    debug_pool: bool,

    #[arg(long, hide = true)]
    debug_pool_cache: bool,

    #[arg(long, hide = true)]
    debug_rpc: bool,

    #[arg(long, hide = true)]
    debug_transactions: bool,

    #[arg(long, hide = true)]
    debug_wallet: bool,

    #[arg(long, hide = true)]
    debug_config: bool,

    #[arg(long, hide = true)]
    debug_system: bool,

    #[arg(long, hide = true)]
    verbose_swaps: bool,

    #[arg(long, hide = true)]
    verbose_pool: bool,

    #[arg(long, hide = true)]
    verbose_rpc: bool,

    #[arg(long, hide = true)]
    verbose_transactions: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logger needs the logs directory
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();
    logger::info(LogTag::System, "🚀 raydium-swap starting");
    if is_any_debug_enabled() {
        logger::info(
            LogTag::System,
            &format!("Debug modes: {}", get_enabled_debug_modes().join(", ")),
        );
    }

    let code = tokio::select! {
        result = run(&cli) => match result {
            Ok(code) => code,
            Err(e) => {
                logger::error(LogTag::System, &format!("❌ {}", e));
                if e.is_recoverable() {
                    logger::info(LogTag::System, "Network error; the swap can be retried");
                } else if e.is_user_correctable() {
                    logger::info(LogTag::System, "Adjust the amount, slippage or mints and retry");
                }
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            logger::warning(LogTag::System, "Interrupted, aborting in-flight requests");
            130
        }
    };

    logger::flush();
    std::process::exit(code);
}

async fn run(cli: &Cli) -> SwapResult<i32> {
    let config: Config = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };
    config.validate()?;

    let keypair = config.load_keypair()?;
    let rpc = RpcClient::new(
        config.rpc.url.clone(),
        Duration::from_secs(config.rpc.timeout_secs),
    )?;
    logger::info(LogTag::Rpc, &format!("Using RPC endpoint {}", rpc.url()));
    let cache = SqlitePoolCache::open(&config.cache_path())?;

    let request = SwapRequest {
        from_mint: parse_mint(&cli.from)?,
        to_mint: parse_mint(&cli.to)?,
        amount: cli.amount,
        slippage_pct: cli.slippage,
    };

    let session = SwapSession::new(&rpc, &cache, &keypair, config.swap.clone());
    match session.run(&request, cli.dry_run).await? {
        SessionResult::DryRun(quote) => {
            logger::info(
                LogTag::Swap,
                &format!(
                    "🧪 Dry run: {} in, expected {} out, minimum {} (raw)",
                    quote.amount_in(),
                    quote.expected_out,
                    quote.min_out
                ),
            );
            Ok(0)
        }
        SessionResult::Submitted(outcome) => match outcome.status {
            TransactionStatus::Confirmed => {
                logger::info(LogTag::Swap, &format!("✅ Swap confirmed: {}", outcome.signature));
                println!("{}", outcome.signature);
                Ok(0)
            }
            TransactionStatus::Failed(_) => {
                logger::error(LogTag::Swap, &format!("❌ Swap failed: {}", outcome));
                Ok(1)
            }
            TransactionStatus::TimedOut => {
                logger::warning(LogTag::Swap, &format!("⏳ {}", outcome));
                println!("{}", outcome.signature);
                Ok(EXIT_UNCONFIRMED)
            }
        },
    }
}

fn parse_mint(value: &str) -> SwapResult<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|e| SwapError::InvalidMint(format!("{}: {}", value, e)))
}
