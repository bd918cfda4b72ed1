//! Product Advertising API signing implementation for ecsign.
//!
//! This crate signs requests for the Amazon Product Advertising API, which
//! authenticates callers with a shared-secret HMAC-SHA256 scheme over a
//! canonical query string (signature version 2). It also ships a small
//! client that dispatches signed operations and preserves fault bodies.
//!
//! ## Overview
//!
//! Signing is a deterministic transformation: the caller's parameters are
//! merged with the reserved fields (access key, associate tag, timestamp,
//! version, ...), strictly percent encoded, sorted byte-wise and joined into
//! a canonical query string. The signature is the base64 HMAC-SHA256 of
//! `GET\n<host>\n<path>\n<canonical query>` under the secret key, appended
//! as a final `Signature` parameter.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ecsign_core::{Context, OsEnv, Result};
//! use ecsign_http_send_reqwest::ReqwestHttpSend;
//! use ecsign_paapi::{Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Create context
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Configure credentials; unset fields fall back to AMAZON_* env values
//!     let config = Config {
//!         access_key: Some("your-access-key".to_string()),
//!         secret_key: Some("your-secret-key".to_string()),
//!         associate_tag: Some("your-tag-20".to_string()),
//!         locale: Some("co.uk".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let client = Client::new(ctx, config);
//!
//!     let resp = client.item_search("harry potter", 1).await?;
//!     if resp.is_success() {
//!         let value = ecsign_paapi::decode::xml_to_json(resp.body())?;
//!         println!("{value:#}");
//!     } else {
//!         eprintln!("service fault {}: {}", resp.status(), resp.body());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export AMAZON_ACCESS_KEY=your-access-key
//! export AMAZON_SECRET_KEY=your-secret-key
//! export AMAZON_ASSOCIATE_TAG=your-tag-20
//! export AMAZON_LOCALE=co.uk
//! ```
//!
//! ### Static Credential
//!
//! Construct a [`Credential`] directly and wrap it in a
//! [`StaticCredentialProvider`] when the keys come from elsewhere. The
//! credential is validated at construction: an empty key or an unsupported
//! locale fails immediately, never on the first request.
//!
//! ## Lower level use
//!
//! The [`RequestSigner`] implements [`SignRequest`](ecsign_core::SignRequest)
//! and can be combined with any provider through
//! [`Signer`](ecsign_core::Signer) when the high level [`Client`] is more
//! than you need.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod config;
pub use config::Config;

mod credential;
pub use credential::{Credential, Locale};

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, EnvCredentialProvider,
    StaticCredentialProvider,
};

mod sign_request;
pub use sign_request::RequestSigner;

mod operation;
pub use operation::{BrowseNodeSearch, ItemLookup, ItemSearch, Operation};

mod client;
pub use client::{ApiResponse, Client};

pub mod decode;

mod constants;
