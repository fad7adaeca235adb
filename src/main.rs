use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use mobula::config::{ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_SECS};
use mobula::v2::{
    AssetDetailsRequest, MarketDetailsRequest, TokenDetailsRequest, TokenMarketsRequest,
    TokenSecurityRequest,
};
use mobula::{CancellationToken, Client, ClientConfig, RequestContext};
use serde::Serialize;
use std::time::Duration;

/// mobula - query the Mobula market-data API
///
/// Without an API key requests go to the demo endpoint. Set MOBULA_API_KEY
/// (or pass --api-key) to use the production API.
///
/// Examples:
///   mobula token-details --address 0xc02a... --blockchain ethereum
#[derive(Parser, Debug)]
#[command(author, version = env!("MOBULA_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key sent in the Authorization header
    #[arg(long = "api-key", env = ENV_API_KEY, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API base URL (defaults to the production or demo endpoint)
    #[arg(long = "base-url", env = ENV_BASE_URL, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = ENV_TIMEOUT_SECS, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Security scoring of a token contract
    TokenSecurity(TokenArgs),

    /// Detailed information about a token
    TokenDetails(TokenArgs),

    /// Metadata of an asset
    AssetDetails(TokenArgs),

    /// Details of a market (pair address)
    MarketDetails(TokenArgs),

    /// Markets trading a token
    TokenMarkets(TokenMarketsArgs),
}

#[derive(clap::Args, Debug)]
pub struct TokenArgs {
    /// Contract, pair or asset address
    #[arg(long, short = 'a')]
    pub address: String,

    /// Blockchain name or id (e.g. "ethereum", "solana")
    #[arg(long, short = 'b')]
    pub blockchain: String,
}

#[derive(clap::Args, Debug)]
pub struct TokenMarketsArgs {
    #[command(flatten)]
    pub token: TokenArgs,

    /// Maximum number of markets to return
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config.api_key = self.api_key.clone();
        config.base_url = self.base_url.clone();
        config.timeout = self.timeout.map(Duration::from_secs);
        config
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to format response")?;
    println!("{}", out);
    Ok(())
}

async fn run(cli: Cli, ctx: RequestContext) -> Result<()> {
    let client = Client::new(cli.client_config()).context("Failed to create client")?;
    debug!("Using {:?}", client);

    match cli.command {
        Commands::TokenSecurity(args) => {
            let req = TokenSecurityRequest::new(args.address, args.blockchain);
            print_json(&client.get_token_security(&ctx, &req).await?)
        }
        Commands::TokenDetails(args) => {
            let req = TokenDetailsRequest::new(args.address, args.blockchain);
            print_json(&client.get_token_details(&ctx, &req).await?)
        }
        Commands::AssetDetails(args) => {
            let req = AssetDetailsRequest::new(args.address, args.blockchain);
            print_json(&client.get_asset_details(&ctx, &req).await?)
        }
        Commands::MarketDetails(args) => {
            let req = MarketDetailsRequest::new(args.address, args.blockchain);
            print_json(&client.get_market_details(&ctx, &req).await?)
        }
        Commands::TokenMarkets(args) => {
            let mut req = TokenMarketsRequest::new(args.token.address, args.token.blockchain);
            req.limit = args.limit;
            print_json(&client.get_token_markets(&ctx, &req).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    run(cli, RequestContext::new().with_cancel(cancel)).await
}
