//! HttpSend implementation backed by [`reqwest`].
//!
//! This crate wires a `reqwest::Client` into the ecsign [`Context`] so that
//! signed requests can be dispatched over HTTP. HTTP error responses (4xx,
//! 5xx) are returned as responses with their bodies intact; only
//! network-level failures become errors.
//!
//! [`Context`]: ecsign_core::Context

use async_trait::async_trait;
use bytes::Bytes;
use ecsign_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// HttpSend implementation that dispatches requests via `reqwest`.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// Use this to share a client that carries custom settings like proxies
    /// or timeouts.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("request is not convertible").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("http dispatch failed").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
