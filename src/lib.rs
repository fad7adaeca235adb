//! Typed client for the Mobula market-data REST API.
//!
//! ```no_run
//! use mobula::{Client, ClientConfig, RequestContext, v2::TokenDetailsRequest};
//!
//! # async fn example() -> mobula::Result<()> {
//! let client = Client::new(ClientConfig::from_env())?;
//! let details = client
//!     .get_token_details(
//!         &RequestContext::new(),
//!         &TokenDetailsRequest::new("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "ethereum"),
//!     )
//!     .await?;
//! println!("{} = ${}", details.data.symbol, details.data.price);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;
pub mod v2;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEMO_BASE_URL};
pub use context::RequestContext;
pub use error::{ApiError, Error, ErrorKind, Result};
pub use query::QueryParams;
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use tokio_util::sync::CancellationToken;
