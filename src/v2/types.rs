//! Request and response types of the v2 endpoints.

use serde::{Deserialize, Serialize};

use crate::types::{Market, TokenDetails, TokenSecurity};

macro_rules! address_request {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        pub struct $name {
            pub address: String,
            pub blockchain: String,
        }

        impl $name {
            pub fn new(address: impl Into<String>, blockchain: impl Into<String>) -> Self {
                Self {
                    address: address.into(),
                    blockchain: blockchain.into(),
                }
            }
        }
    };
}

address_request!(
    /// Security scoring of a token contract.
    TokenSecurityRequest
);
address_request!(TokenDetailsRequest);
address_request!(
    /// Asset metadata. `address` may also be an asset name or id.
    AssetDetailsRequest
);
address_request!(
    /// Details of one market, `address` being the pair address.
    MarketDetailsRequest
);

/// Markets trading a token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenMarketsRequest {
    pub address: String,
    pub blockchain: String,
    /// Maximum number of markets to return, server default when unset.
    pub limit: Option<u32>,
}

impl TokenMarketsRequest {
    pub fn new(address: impl Into<String>, blockchain: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            blockchain: blockchain.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenSecurityResponse {
    #[serde(deserialize_with = "crate::types::nullable")]
    pub data: TokenSecurity,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenDetailsResponse {
    #[serde(deserialize_with = "crate::types::nullable")]
    pub data: TokenDetails,
}

/// Asset-level metadata aggregated over every chain the asset lives on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDetails {
    pub id: serde_json::Value,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub symbol: String,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub logo: String,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub description: String,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub website: String,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub twitter: String,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub blockchains: Vec<String>,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub contracts: Vec<String>,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub price: f64,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub market_cap: f64,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub volume: f64,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub liquidity: f64,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub total_supply: f64,
    #[serde(deserialize_with = "crate::types::nullable")]
    pub circulating_supply: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetDetailsResponse {
    #[serde(deserialize_with = "crate::types::nullable")]
    pub data: AssetDetails,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketDetailsResponse {
    #[serde(deserialize_with = "crate::types::nullable")]
    pub data: Market,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenMarketsResponse {
    #[serde(deserialize_with = "crate::types::nullable")]
    pub data: Vec<Market>,
}
