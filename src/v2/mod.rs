//! Typed endpoints of the v2 REST API.
//!
//! Each function only maps request fields onto query parameters and names the
//! response type; everything else happens in [`GetJson`].

mod types;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::context::RequestContext;
use crate::error::Result;
use crate::query::QueryParams;

pub use types::*;

// https://docs.mobula.io/rest-api-reference/endpoint/token-security-get
pub const TOKEN_SECURITY: &str = "/api/2/token/security";
// https://docs.mobula.io/rest-api-reference/endpoint/token-details
pub const TOKEN_DETAILS: &str = "/api/2/token/details";
// https://docs.mobula.io/rest-api-reference/endpoint/asset-details
pub const ASSET_DETAILS: &str = "/api/2/asset/details";
// https://docs.mobula.io/rest-api-reference/endpoint/market-details
pub const MARKET_DETAILS: &str = "/api/2/market/details";
// https://docs.mobula.io/rest-api-reference/endpoint/token-markets
pub const TOKEN_MARKETS: &str = "/api/2/token/markets";

/// GET a path with query parameters and decode the JSON body as `T`.
#[async_trait]
pub trait GetJson: Send + Sync {
    async fn get_json<T>(&self, ctx: &RequestContext, path: &str, query: QueryParams) -> Result<T>
    where
        T: DeserializeOwned + Send;
}

fn address_params(address: &str, blockchain: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.set("address", address).set("blockchain", blockchain);
    params
}

pub async fn get_token_security<C: GetJson>(
    ctx: &RequestContext,
    client: &C,
    req: &TokenSecurityRequest,
) -> Result<TokenSecurityResponse> {
    let params = address_params(&req.address, &req.blockchain);
    client.get_json(ctx, TOKEN_SECURITY, params).await
}

pub async fn get_token_details<C: GetJson>(
    ctx: &RequestContext,
    client: &C,
    req: &TokenDetailsRequest,
) -> Result<TokenDetailsResponse> {
    let params = address_params(&req.address, &req.blockchain);
    client.get_json(ctx, TOKEN_DETAILS, params).await
}

pub async fn get_asset_details<C: GetJson>(
    ctx: &RequestContext,
    client: &C,
    req: &AssetDetailsRequest,
) -> Result<AssetDetailsResponse> {
    let params = address_params(&req.address, &req.blockchain);
    client.get_json(ctx, ASSET_DETAILS, params).await
}

pub async fn get_market_details<C: GetJson>(
    ctx: &RequestContext,
    client: &C,
    req: &MarketDetailsRequest,
) -> Result<MarketDetailsResponse> {
    let params = address_params(&req.address, &req.blockchain);
    client.get_json(ctx, MARKET_DETAILS, params).await
}

pub async fn get_token_markets<C: GetJson>(
    ctx: &RequestContext,
    client: &C,
    req: &TokenMarketsRequest,
) -> Result<TokenMarketsResponse> {
    let mut params = address_params(&req.address, &req.blockchain);
    params.set_opt("limit", req.limit);
    client.get_json(ctx, TOKEN_MARKETS, params).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::{Client, ClientConfig};
    use mockito::Matcher;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Records calls and answers every request with the same JSON value.
    struct StubClient {
        response: Value,
        calls: Mutex<Vec<(String, QueryParams)>>,
    }

    impl StubClient {
        fn new(response: Value) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn last_call(&self) -> (String, QueryParams) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GetJson for StubClient {
        async fn get_json<T>(
            &self,
            _ctx: &RequestContext,
            path: &str,
            query: QueryParams,
        ) -> Result<T>
        where
            T: DeserializeOwned + Send,
        {
            self.calls.lock().unwrap().push((path.to_string(), query));
            serde_json::from_value(self.response.clone()).map_err(|source| Error::Decode {
                path: path.to_string(),
                source,
            })
        }
    }

    #[tokio::test]
    async fn test_get_token_security() {
        let stub = StubClient::new(json!({
            "data": { "is_honeypot": true, "buy_tax": 0.05, "holder_count": 1200 }
        }));
        let req = TokenSecurityRequest {
            address: "0xdead".to_string(),
            blockchain: "ethereum".to_string(),
        };

        let resp = get_token_security(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert!(resp.data.is_honeypot);
        assert_eq!(resp.data.buy_tax, 0.05);
        assert_eq!(resp.data.holder_count, 1200);

        let (path, query) = stub.last_call();
        assert_eq!(path, TOKEN_SECURITY);
        assert_eq!(query.encode(), "address=0xdead&blockchain=ethereum");
    }

    #[tokio::test]
    async fn test_get_token_details() {
        let stub = StubClient::new(json!({
            "data": { "name": "Wrapped Ether", "symbol": "WETH", "decimals": 18, "price": 3120.5 }
        }));
        let req = TokenDetailsRequest::new("0xc02a", "ethereum");

        let resp = get_token_details(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert_eq!(resp.data.symbol, "WETH");
        assert_eq!(resp.data.decimals, 18);
        assert_eq!(stub.last_call().0, TOKEN_DETAILS);
    }

    #[tokio::test]
    async fn test_get_asset_details() {
        let stub = StubClient::new(json!({
            "data": { "name": "Bitcoin", "symbol": "BTC", "blockchains": ["Bitcoin"] }
        }));
        let req = AssetDetailsRequest::new("bitcoin", "Bitcoin");

        let resp = get_asset_details(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert_eq!(resp.data.name, "Bitcoin");
        assert_eq!(resp.data.blockchains, vec!["Bitcoin".to_string()]);
        assert_eq!(stub.last_call().0, ASSET_DETAILS);
    }

    #[tokio::test]
    async fn test_get_market_details() {
        let stub = StubClient::new(json!({
            "data": { "pair_address": "0xpair", "exchange": "Uniswap V3", "liquidity": 1.5e6 }
        }));
        let req = MarketDetailsRequest::new("0xpair", "base");

        let resp = get_market_details(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert_eq!(resp.data.exchange, "Uniswap V3");
        let (path, query) = stub.last_call();
        assert_eq!(path, MARKET_DETAILS);
        assert_eq!(query.get("blockchain"), Some("base"));
        assert_eq!(query.get("address"), Some("0xpair"));
    }

    #[tokio::test]
    async fn test_get_token_markets_with_limit() {
        let stub = StubClient::new(json!({
            "data": [
                { "pair_address": "0x1", "exchange": "Uniswap V2" },
                { "pair_address": "0x2", "exchange": "SushiSwap" }
            ]
        }));
        let req = TokenMarketsRequest::new("0xc02a", "ethereum").with_limit(2);

        let resp = get_token_markets(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].exchange, "SushiSwap");
        let (path, query) = stub.last_call();
        assert_eq!(path, TOKEN_MARKETS);
        assert_eq!(query.encode(), "address=0xc02a&blockchain=ethereum&limit=2");
    }

    #[tokio::test]
    async fn test_get_token_markets_without_limit() {
        let stub = StubClient::new(json!({ "data": [] }));
        let req = TokenMarketsRequest::new("0xc02a", "ethereum");

        let resp = get_token_markets(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert!(resp.data.is_empty());
        assert_eq!(stub.last_call().1.get("limit"), None);
    }

    #[tokio::test]
    async fn test_get_token_details_with_nulls() {
        let stub = StubClient::new(json!({
            "data": { "name": "Pepe", "logo": null, "website": null, "price": null, "decimals": null }
        }));
        let req = TokenDetailsRequest::new("0x6982", "ethereum");

        let resp = get_token_details(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();

        assert_eq!(resp.data.name, "Pepe");
        assert!(resp.data.logo.is_empty());
        assert_eq!(resp.data.price, 0.0);
    }

    #[tokio::test]
    async fn test_null_data_decodes_to_default() {
        let stub = StubClient::new(json!({ "data": null }));
        let req = MarketDetailsRequest::new("0xpair", "base");

        let resp = get_market_details(&RequestContext::new(), &stub, &req)
            .await
            .unwrap();
        assert_eq!(resp.data, crate::types::Market::default());
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let stub = StubClient::new(json!({ "data": "unexpected" }));
        let req = TokenMarketsRequest::new("0xc02a", "ethereum");

        let err = get_token_markets(&RequestContext::new(), &stub, &req)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn test_client_token_security_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", TOKEN_SECURITY)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("address".into(), "0xdead".into()),
                Matcher::UrlEncoded("blockchain".into(), "ethereum".into()),
            ]))
            .match_header("authorization", "key-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"is_mintable":true,"sell_tax":0.1}}"#)
            .create_async()
            .await;

        let client = Client::new(
            ClientConfig::new()
                .with_base_url(server.url())
                .with_api_key("key-1"),
        )
        .unwrap();

        let resp = client
            .get_token_security(
                &RequestContext::new(),
                &TokenSecurityRequest::new("0xdead", "ethereum"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(resp.data.is_mintable);
        assert_eq!(resp.data.sell_tax, 0.1);
    }

    #[tokio::test]
    async fn test_client_token_markets_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", TOKEN_MARKETS)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"message":"Unsupported blockchain"}"#)
            .create_async()
            .await;

        let client = Client::new(ClientConfig::new().with_base_url(server.url())).unwrap();
        let err = client
            .get_token_markets(
                &RequestContext::new(),
                &TokenMarketsRequest::new("0x1", "nowhere").with_limit(5),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_error().unwrap().message, "Unsupported blockchain");
    }
}
