//! Data shapes shared by the Mobula endpoints.
//!
//! Every struct tolerates missing fields and explicit `null`s so that
//! partially populated payloads still decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Deserializes `null` as the type's default value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Common `{"data": ...}` response wrapper.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Response<T> {
    pub data: T,
}

/// Detailed information about a token.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TokenDetails {
    pub id: Value,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(deserialize_with = "nullable")]
    pub contracts: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub blockchains: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub price_change_24h: f64,
    #[serde(deserialize_with = "nullable")]
    pub market_cap: f64,
    #[serde(deserialize_with = "nullable")]
    pub market_cap_diluted: f64,
    #[serde(deserialize_with = "nullable")]
    pub liquidity: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume_7d: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_listed: bool,
    #[serde(deserialize_with = "nullable")]
    pub logo: String,
    #[serde(deserialize_with = "nullable")]
    pub decimals: u32,
    #[serde(deserialize_with = "nullable")]
    pub total_supply: f64,
    #[serde(deserialize_with = "nullable")]
    pub circulating_supply: f64,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub website: String,
    #[serde(deserialize_with = "nullable")]
    pub twitter: String,
    #[serde(deserialize_with = "nullable")]
    pub discord: String,
    #[serde(deserialize_with = "nullable")]
    pub telegram: String,
    #[serde(deserialize_with = "nullable")]
    pub github: String,
    #[serde(deserialize_with = "nullable")]
    pub coingecko: String,
    #[serde(deserialize_with = "nullable")]
    pub coinmarketcap: String,
    #[serde(deserialize_with = "nullable")]
    pub metadata: HashMap<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MarketData {
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub price_change_24h: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume_24h: f64,
    #[serde(deserialize_with = "nullable")]
    pub market_cap: f64,
    #[serde(deserialize_with = "nullable")]
    pub liquidity: f64,
}

/// One point of a price history.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct HistoricalData {
    /// Milliseconds since the Unix epoch.
    #[serde(deserialize_with = "nullable")]
    pub timestamp: i64,
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume: f64,
    #[serde(deserialize_with = "nullable")]
    pub market_cap: f64,
}

/// Open, high, low, close and volume of one candle.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct OhlcvData {
    #[serde(deserialize_with = "nullable")]
    pub timestamp: i64,
    #[serde(deserialize_with = "nullable")]
    pub open: f64,
    #[serde(deserialize_with = "nullable")]
    pub high: f64,
    #[serde(deserialize_with = "nullable")]
    pub low: f64,
    #[serde(deserialize_with = "nullable")]
    pub close: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume: f64,
}

/// A trading pair on some exchange.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Market {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub base_token: String,
    #[serde(deserialize_with = "nullable")]
    pub quote_token: String,
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume_24h: f64,
    #[serde(deserialize_with = "nullable")]
    pub liquidity: f64,
    #[serde(deserialize_with = "nullable")]
    pub exchange: String,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
    #[serde(deserialize_with = "nullable")]
    pub pair_address: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Trade {
    #[serde(deserialize_with = "nullable")]
    pub timestamp: i64,
    /// `buy` or `sell`.
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub side: String,
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub amount: f64,
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub tx_hash: String,
    #[serde(deserialize_with = "nullable")]
    pub from: String,
    #[serde(deserialize_with = "nullable")]
    pub to: String,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
    #[serde(deserialize_with = "nullable")]
    pub exchange: String,
    #[serde(deserialize_with = "nullable")]
    pub pair_address: String,
    #[serde(deserialize_with = "nullable")]
    pub token_address: String,
    #[serde(deserialize_with = "nullable")]
    pub amount_usd: f64,
}

/// Contract risk indicators for a token.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TokenSecurity {
    #[serde(deserialize_with = "nullable")]
    pub is_open_source: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_proxy: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_mintable: bool,
    #[serde(deserialize_with = "nullable")]
    pub can_take_back_ownership: bool,
    #[serde(deserialize_with = "nullable")]
    pub owner_change_balance: bool,
    #[serde(deserialize_with = "nullable")]
    pub hidden_owner: bool,
    #[serde(rename = "selfdestruct", deserialize_with = "nullable")]
    pub self_destruct: bool,
    #[serde(deserialize_with = "nullable")]
    pub external_call: bool,
    #[serde(deserialize_with = "nullable")]
    pub buy_tax: f64,
    #[serde(deserialize_with = "nullable")]
    pub sell_tax: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_honeypot: bool,
    #[serde(deserialize_with = "nullable")]
    pub holder_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub total_supply: f64,
    #[serde(deserialize_with = "nullable")]
    pub holder_concentration: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TokenHolder {
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub balance: f64,
    #[serde(deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(deserialize_with = "nullable")]
    pub percentage: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_contract: bool,
    #[serde(deserialize_with = "nullable")]
    pub labels: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TraderPosition {
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub token_address: String,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
    #[serde(deserialize_with = "nullable")]
    pub balance: f64,
    #[serde(deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(deserialize_with = "nullable")]
    pub average_buy_price: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_bought: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_sold: f64,
    #[serde(deserialize_with = "nullable")]
    pub profit_loss: f64,
    #[serde(deserialize_with = "nullable")]
    pub profit_loss_usd: f64,
    /// RFC 3339 timestamp.
    pub first_buy: Option<String>,
    /// RFC 3339 timestamp.
    pub last_activity: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WalletNft {
    #[serde(deserialize_with = "nullable")]
    pub token_id: String,
    #[serde(deserialize_with = "nullable")]
    pub contract: String,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub image: String,
    #[serde(deserialize_with = "nullable")]
    pub collection: String,
    #[serde(deserialize_with = "nullable")]
    pub floor_price: f64,
    #[serde(deserialize_with = "nullable")]
    pub last_sale: f64,
    #[serde(deserialize_with = "nullable")]
    pub metadata: HashMap<String, Value>,
    #[serde(deserialize_with = "nullable")]
    pub attributes: Vec<NftAttribute>,
}

/// An NFT trait.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct NftAttribute {
    #[serde(deserialize_with = "nullable")]
    pub trait_type: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WalletHolding {
    #[serde(deserialize_with = "nullable")]
    pub asset: String,
    #[serde(deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
    #[serde(deserialize_with = "nullable")]
    pub balance: f64,
    #[serde(deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub logo: String,
    #[serde(deserialize_with = "nullable")]
    pub decimals: u32,
}

/// Net worth of a wallet at one point in time.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WalletNetWorth {
    #[serde(deserialize_with = "nullable")]
    pub timestamp: i64,
    #[serde(deserialize_with = "nullable")]
    pub net_worth: f64,
    #[serde(deserialize_with = "nullable")]
    pub assets: Vec<NetWorthAsset>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct NetWorthAsset {
    #[serde(deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(deserialize_with = "nullable")]
    pub value: f64,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WalletLabel {
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub is_contract: bool,
}

/// Trending, gaining, losing and recently listed tokens.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PulseData {
    #[serde(deserialize_with = "nullable")]
    pub trending: Vec<TrendingToken>,
    #[serde(deserialize_with = "nullable")]
    pub gainers: Vec<TrendingToken>,
    #[serde(deserialize_with = "nullable")]
    pub losers: Vec<TrendingToken>,
    #[serde(deserialize_with = "nullable")]
    pub recent: Vec<TrendingToken>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TrendingToken {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub blockchain: String,
    #[serde(deserialize_with = "nullable")]
    pub price: f64,
    #[serde(deserialize_with = "nullable")]
    pub price_change_24h: f64,
    #[serde(deserialize_with = "nullable")]
    pub volume_24h: f64,
    #[serde(deserialize_with = "nullable")]
    pub market_cap: f64,
    #[serde(deserialize_with = "nullable")]
    pub liquidity: f64,
    #[serde(deserialize_with = "nullable")]
    pub logo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
}
