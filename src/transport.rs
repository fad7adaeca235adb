//! HTTP transport abstraction.
//!
//! The client only needs to send one request and read back a status, headers
//! and a body stream. Anything implementing [`Transport`] can be injected
//! through [`ClientConfig::with_transport`](crate::ClientConfig::with_transport),
//! which is how tests replace the network.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt, TryStreamExt};
use log::debug;
use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::{Error, Result};

/// Response body as a stream of chunks.
pub type BodyStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// A fully built outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status line and headers of a response whose body has not been read yet.
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: BodyStream,
}

impl TransportResponse {
    pub fn new(status: u16, headers: HeaderMap, body: BodyStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response with an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self::new(
            status,
            HeaderMap::new(),
            Box::pin(futures_util::stream::once(async move { Ok::<_, io::Error>(body) })),
        )
    }

    /// Reads the remaining body into memory.
    pub async fn read_body(self) -> io::Result<Bytes> {
        let mut buf = BytesMut::new();
        let mut body = self.body;
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Sends a request and returns the response head with a lazily read body.
///
/// Implementations report send failures as [`Error::Transport`] or
/// [`Error::Timeout`]; failures while streaming the body belong in the
/// [`BodyStream`] as I/O errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing client. Its timeout and pooling settings are used as is.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with an overall per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mobula-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(Error::transport)?;
        Ok(Self::new(client))
    }

    /// Builds a client without a timeout of its own.
    pub(crate) fn untimed() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mobula-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::transport)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                debug!("Request timed out: {}", e);
                Error::Timeout
            } else {
                Error::transport(e)
            }
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes_stream().map_err(io::Error::other).boxed();

        Ok(TransportResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, HeaderValue};

    fn request(url: &str) -> TransportRequest {
        TransportRequest {
            method: Method::GET,
            url: Url::parse(url).unwrap(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_read_body_concatenates_chunks() {
        let chunks: Vec<io::Result<Bytes>> =
            vec![Ok(Bytes::from_static(b"{\"a\":")), Ok(Bytes::from_static(b"1}"))];
        let response = TransportResponse::new(
            200,
            HeaderMap::new(),
            Box::pin(futures_util::stream::iter(chunks)),
        );
        assert_eq!(response.read_body().await.unwrap(), Bytes::from_static(b"{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_read_body_propagates_io_error() {
        let chunks: Vec<io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let response = TransportResponse::new(
            200,
            HeaderMap::new(),
            Box::pin(futures_util::stream::iter(chunks)),
        );
        let err = response.read_body().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[tokio::test]
    async fn test_reqwest_transport_send() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/echo")
            .match_header("accept", "application/json")
            .match_body(r#"{"x":1}"#)
            .with_status(201)
            .with_header("x-request-id", "abc")
            .with_body("created")
            .create_async()
            .await;

        let mut req = request(&format!("{}/echo", server.url()));
        req.method = Method::POST;
        req.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        req.body = Some(br#"{"x":1}"#.to_vec());

        let transport = ReqwestTransport::untimed().unwrap();
        let response = transport.send(req).await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.headers.get("x-request-id").unwrap(), "abc");
        assert_eq!(response.read_body().await.unwrap(), Bytes::from_static(b"created"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reqwest_transport_connection_refused() {
        // Port 1 on loopback is never listening.
        let transport = ReqwestTransport::untimed().unwrap();
        let err = transport
            .send(request("http://127.0.0.1:1/"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_reqwest_transport_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let transport = ReqwestTransport::with_timeout(Duration::from_millis(100)).unwrap();
        let err = transport
            .send(request(&format!("http://{}/", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout));
        server.abort();
    }
}
