//! Mobula API client and the generic request pipeline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::codec;
use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{Error, Result, classify};
use crate::query::QueryParams;
use crate::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::v2::{self, GetJson};

const APPLICATION_JSON: &str = "application/json";

/// Client for the Mobula REST API.
///
/// Cheap to clone and safe to share between tasks: each call builds and reads
/// its own request, and the only shared state is the transport's connection pool.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    api_key: Option<HeaderValue>,
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client, applying the defaults described on [`ClientConfig`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        let resolved = config.resolve();

        let api_key = if resolved.api_key.is_empty() {
            None
        } else {
            let mut value = HeaderValue::from_bytes(resolved.api_key.as_bytes())
                .map_err(|_| Error::InvalidApiKey)?;
            value.set_sensitive(true);
            Some(value)
        };

        let transport: Arc<dyn Transport> = match config.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::untimed()?),
        };

        debug!(
            "Mobula client using {} ({})",
            resolved.base_url,
            if api_key.is_some() {
                "authenticated"
            } else {
                "demo mode"
            }
        );

        Ok(Self {
            base_url: resolved.base_url,
            api_key,
            transport,
            timeout: resolved.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Default per-request timeout, `None` when a custom transport is in charge.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Sends one request and returns the raw body of a 2xx response.
    ///
    /// The base URL keeps only its scheme, host and port; `path` replaces the
    /// rest. Non-2xx responses become [`Error::Api`].
    #[tracing::instrument(skip(self, ctx, query, body))]
    pub async fn execute<B>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<Bytes>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.build_url(path, query)?;
        let body = body.map(codec::encode).transpose()?;

        debug!("{} {}", method, url);

        let request = TransportRequest {
            method,
            url,
            headers: self.headers(),
            body,
        };

        let (status, bytes) = ctx
            .run(self.timeout, async {
                let response = self.transport.send(request).await?;
                let status = response.status;
                let bytes = response.read_body().await.map_err(Error::Io)?;
                Ok::<_, Error>((status, bytes))
            })
            .await?;

        debug!("{} responded with {} ({} bytes)", path, status, bytes.len());

        if !(200..300).contains(&status) {
            return Err(Error::Api(classify(status, &bytes)));
        }

        Ok(bytes)
    }

    /// Performs a GET request and decodes the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<T> {
        let bytes = self
            .execute::<()>(ctx, Method::GET, path, query, None)
            .await?;
        codec::decode(&bytes, path)
    }

    /// Performs a POST request with a JSON body and decodes the JSON response.
    pub async fn post<B, T>(&self, ctx: &RequestContext, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let bytes = self
            .execute(ctx, Method::POST, path, None, Some(body))
            .await?;
        codec::decode(&bytes, path)
    }

    fn build_url(&self, path: &str, query: Option<&QueryParams>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|source| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;

        // Only scheme, host and port of the base URL are kept.
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.set_fragment(None);
        url.set_path(path);

        match query {
            Some(params) => params.apply_to(&mut url),
            None => url.set_query(None),
        }

        Ok(url)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        if let Some(key) = &self.api_key {
            headers.insert(AUTHORIZATION, key.clone());
        }
        headers
    }

    pub async fn get_token_security(
        &self,
        ctx: &RequestContext,
        req: &v2::TokenSecurityRequest,
    ) -> Result<v2::TokenSecurityResponse> {
        v2::get_token_security(ctx, self, req).await
    }

    pub async fn get_token_details(
        &self,
        ctx: &RequestContext,
        req: &v2::TokenDetailsRequest,
    ) -> Result<v2::TokenDetailsResponse> {
        v2::get_token_details(ctx, self, req).await
    }

    pub async fn get_asset_details(
        &self,
        ctx: &RequestContext,
        req: &v2::AssetDetailsRequest,
    ) -> Result<v2::AssetDetailsResponse> {
        v2::get_asset_details(ctx, self, req).await
    }

    pub async fn get_market_details(
        &self,
        ctx: &RequestContext,
        req: &v2::MarketDetailsRequest,
    ) -> Result<v2::MarketDetailsResponse> {
        v2::get_market_details(ctx, self, req).await
    }

    pub async fn get_token_markets(
        &self,
        ctx: &RequestContext,
        req: &v2::TokenMarketsRequest,
    ) -> Result<v2::TokenMarketsResponse> {
        v2::get_token_markets(ctx, self, req).await
    }
}

#[async_trait]
impl GetJson for Client {
    async fn get_json<T>(&self, ctx: &RequestContext, path: &str, query: QueryParams) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        self.get(ctx, path, Some(&query)).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
