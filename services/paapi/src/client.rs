use crate::constants::DEFAULT_REQUEST_PATH;
use crate::operation::{BrowseNodeSearch, ItemLookup, ItemSearch, Operation};
use crate::provide_credential::DefaultCredentialProvider;
use crate::sign_request::RequestSigner;
use crate::{Config, Credential};
use bytes::Bytes;
use ecsign_core::{Context, CredentialLoader, Error, Result, SignRequest};
use http::{Method, StatusCode};
use log::debug;
use std::sync::Arc;

/// Outcome of a dispatched API call.
///
/// An HTTP error response is not a transport failure: the service returns
/// fault details in the body, and losing them would leave the caller with an
/// opaque error. Only failures without any response at all surface as `Err`
/// from [`Client::execute`].
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// The service accepted the request (2xx).
    Success {
        /// HTTP status code.
        status: StatusCode,
        /// Raw response body, usually XML.
        body: String,
    },
    /// The service answered with an HTTP error; the fault body is preserved.
    Fault {
        /// HTTP status code.
        status: StatusCode,
        /// Raw fault body, usually XML.
        body: String,
    },
}

impl ApiResponse {
    /// The HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiResponse::Success { status, .. } => *status,
            ApiResponse::Fault { status, .. } => *status,
        }
    }

    /// The raw response body, for success and fault alike.
    pub fn body(&self) -> &str {
        match self {
            ApiResponse::Success { body, .. } => body,
            ApiResponse::Fault { body, .. } => body,
        }
    }

    /// Whether the service accepted the request.
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }
}

/// High level Product Advertising API client.
///
/// Wires credential loading, request signing and HTTP dispatch together
/// explicitly: the context supplies the transport and environment, the
/// config supplies credentials and per-call defaults.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    loader: CredentialLoader<Credential>,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config);
        let loader = CredentialLoader::new(DefaultCredentialProvider::new(config.clone()));

        Self {
            ctx,
            config,
            loader,
        }
    }

    /// Search items by keyword, applying the configured search index and
    /// response group defaults.
    pub async fn item_search(&self, keywords: &str, page: u32) -> Result<ApiResponse> {
        let mut op = ItemSearch::new(keywords).with_page(page);
        if let Some(v) = &self.config.search_index {
            op = op.with_search_index(v);
        }
        if let Some(v) = &self.config.response_group {
            op = op.with_response_group(v);
        }

        self.execute(&op).await
    }

    /// Look up a single item by its identifier (ASIN).
    pub async fn item_lookup(&self, item_id: &str) -> Result<ApiResponse> {
        self.execute(&ItemLookup::new(item_id)).await
    }

    /// Search items within a category and browse node, applying the
    /// configured response group default.
    pub async fn browse_node_search(
        &self,
        search_index: &str,
        browse_node: &str,
        page: u32,
    ) -> Result<ApiResponse> {
        let mut op = BrowseNodeSearch::new(search_index, browse_node).with_page(page);
        if let Some(v) = &self.config.response_group {
            op = op.with_response_group(v);
        }

        self.execute(&op).await
    }

    /// Sign and dispatch an operation.
    ///
    /// The client always signs against the standard endpoint path
    /// (`/onca/xml`) and API version. To override those, drop down to
    /// [`RequestSigner`]'s `with_path`/`with_version` builders combined with
    /// [`Signer`](ecsign_core::Signer).
    pub async fn execute(&self, op: &dyn Operation) -> Result<ApiResponse> {
        let cred = self.load_credential().await?;

        let params = op.parameters();
        let mut uri = format!("https://{}{}", cred.locale.host(), DEFAULT_REQUEST_PATH);
        if !params.is_empty() {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (k, v) in &params {
                serializer.append_pair(k, v);
            }
            uri.push('?');
            uri.push_str(&serializer.finish());
        }

        let mut parts = http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(())?
            .into_parts()
            .0;

        RequestSigner::new(op.name())
            .sign_request(&self.ctx, &mut parts, Some(&cred), None)
            .await?;

        let req = http::Request::from_parts(parts, Bytes::new());
        let (resp_parts, body) = self.ctx.http_send_as_string(req).await?.into_parts();
        debug!("{} responded with {}", op.name(), resp_parts.status);

        if resp_parts.status.is_success() {
            Ok(ApiResponse::Success {
                status: resp_parts.status,
                body,
            })
        } else {
            Ok(ApiResponse::Fault {
                status: resp_parts.status,
                body,
            })
        }
    }

    async fn load_credential(&self) -> Result<Credential> {
        self.loader
            .load(&self.ctx)
            .await?
            .ok_or_else(|| Error::config_invalid("no access key or secret key has been set"))
    }
}
