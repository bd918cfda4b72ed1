use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use ecsign_core::hash::base64_hmac_sha256;
use ecsign_core::time::{format_iso8601, now, DateTime};
use ecsign_core::{Context, Error, Result, SignRequest, SigningRequest};
use http::request::Parts;
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::time::Duration;

/// RequestSigner that implements the Product Advertising API request
/// signing scheme (HMAC-SHA256 over a canonical query string, signature
/// version 2).
///
/// The signer is a pure transformation over the request: it injects the
/// reserved parameters, canonicalizes and signs the query, and rewrites the
/// request URI to the dispatch-ready form
/// `https://<host>/onca/xml?<canonical query>&Signature=<sig>`.
#[derive(Debug)]
pub struct RequestSigner {
    operation: String,
    path: String,
    version: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given operation, e.g. `ItemSearch`.
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.into(),
            path: DEFAULT_REQUEST_PATH.into(),
            version: DEFAULT_API_VERSION.into(),

            time: None,
        }
    }

    /// Specify the request path. Defaults to `/onca/xml`.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.into();
        self
    }

    /// Specify the API version string. Defaults to `2013-08-01`.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.into();
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "presigned URLs are not supported by this signing scheme",
            ));
        }
        if self.operation.is_empty() {
            return Err(Error::request_invalid("operation must not be empty"));
        }
        let Some(cred) = credential else {
            return Err(Error::credential_invalid("no credential loaded"));
        };

        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req)?;

        // The endpoint is a function of the credential's locale; whatever
        // authority the caller put on the request is replaced so that the
        // signed host and the dispatched host can never disagree.
        signed_req.scheme = http::uri::Scheme::HTTPS;
        signed_req.authority = cred
            .locale
            .host()
            .parse()
            .map_err(|e| Error::unexpected("failed to parse endpoint host").with_source(e))?;

        canonicalize_query(&mut signed_req, self, cred, now)?;

        let string_to_sign = string_to_sign(&signed_req);
        debug!("calculated string to sign: {string_to_sign}");

        let signature = base64_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes());

        // The signature itself is base64 and must be percent encoded like any
        // other value. It is appended after signing, never signed itself.
        signed_req.query_push(
            SIGNATURE,
            utf8_percent_encode(&signature, &STRICT_ENCODE_SET).to_string(),
        );

        signed_req.apply(req)
    }
}

/// Merge the reserved parameters into the query, then percent encode and
/// sort it into its canonical form.
fn canonicalize_query(
    ctx: &mut SigningRequest,
    signer: &RequestSigner,
    cred: &Credential,
    now: DateTime,
) -> Result<()> {
    for (k, _) in ctx.query.iter() {
        if RESERVED_PARAMETERS.contains(&k.as_str()) {
            return Err(Error::request_invalid(format!(
                "parameter {k} is reserved and injected by the signer"
            )));
        }
    }

    ctx.query_push(SERVICE, SERVICE_NAME);
    ctx.query_push(OPERATION, signer.operation.as_str());
    ctx.query_push(AWS_ACCESS_KEY_ID, cred.access_key.as_str());
    ctx.query_push(ASSOCIATE_TAG, cred.associate_tag.as_str());
    ctx.query_push(TIMESTAMP, format_iso8601(now));
    ctx.query_push(VERSION, signer.version.as_str());
    ctx.query_push(SIGNATURE_METHOD, SIGNATURE_METHOD_VALUE);
    ctx.query_push(SIGNATURE_VERSION, SIGNATURE_VERSION_VALUE);

    // Encode first, then sort byte-wise on the encoded keys. Ordering is a
    // function of key byte values only, never locale collation.
    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &STRICT_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &STRICT_ENCODE_SET).to_string(),
            )
        })
        .collect();
    ctx.query.sort();

    Ok(())
}

/// Build the string to sign:
///
/// ```text
/// GET
/// webservices.amazon.com
/// /onca/xml
/// AWSAccessKeyId=...&...&Version=...
/// ```
///
/// Four components joined by `\n`, no trailing newline.
fn string_to_sign(ctx: &SigningRequest) -> String {
    let canonical_query = ctx
        .query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    debug!("calculated canonical query: {canonical_query}");

    format!(
        "{}\n{}\n{}\n{}",
        ctx.method,
        ctx.authority.as_str().to_lowercase(),
        ctx.path,
        canonical_query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Locale;
    use ecsign_core::time::parse_iso8601;
    use pretty_assertions::assert_eq;

    fn test_credential() -> Credential {
        Credential::new("AKIDEXAMPLE", "secret", "tag-20", Locale::Com).expect("must be valid")
    }

    fn test_time() -> DateTime {
        parse_iso8601("2024-01-01T00:00:00Z").expect("must parse")
    }

    fn parts_for(uri: &str) -> Parts {
        http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    async fn sign(signer: RequestSigner, uri: &str) -> Result<String> {
        let mut parts = parts_for(uri);
        signer
            .sign_request(&Context::new(), &mut parts, Some(&test_credential()), None)
            .await?;
        Ok(parts.uri.to_string())
    }

    #[tokio::test]
    async fn test_golden_item_lookup() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let signer = RequestSigner::new("ItemLookup").with_time(test_time());
        let uri = sign(
            signer,
            "https://webservices.amazon.com/onca/xml?ItemId=0679722769",
        )
        .await?;

        assert_eq!(
            uri,
            "https://webservices.amazon.com/onca/xml?\
             AWSAccessKeyId=AKIDEXAMPLE\
             &AssociateTag=tag-20\
             &ItemId=0679722769\
             &Operation=ItemLookup\
             &Service=AWSECommerceService\
             &SignatureMethod=HmacSHA256\
             &SignatureVersion=2\
             &Timestamp=2024-01-01T00%3A00%3A00Z\
             &Version=2013-08-01\
             &Signature=Nw6ikVK4qBy1yCK1tKxT8GoGzalefQGV5sRyV4qyFrE%3D"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_determinism() -> Result<()> {
        let uri = "https://webservices.amazon.com/onca/xml?Keywords=rust&ItemPage=3";

        let first = sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri).await?;
        let second = sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri).await?;

        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn test_sort_invariant_over_insertion_order() -> Result<()> {
        let permutations = [
            "https://webservices.amazon.com/onca/xml?Keywords=rust&ItemPage=3&SearchIndex=Books",
            "https://webservices.amazon.com/onca/xml?SearchIndex=Books&Keywords=rust&ItemPage=3",
            "https://webservices.amazon.com/onca/xml?ItemPage=3&SearchIndex=Books&Keywords=rust",
        ];

        let mut uris = Vec::new();
        for uri in permutations {
            uris.push(sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri).await?);
        }

        assert_eq!(uris[0], uris[1]);
        assert_eq!(uris[1], uris[2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_encoding_invariant() -> Result<()> {
        // "harry potter & co +/=" with percent encoded input query.
        let uri =
            "https://webservices.amazon.com/onca/xml?Keywords=harry%20potter%20%26%20co%20%2B%2F%3D";
        let signed = sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri).await?;

        assert!(signed.contains("Keywords=harry%20potter%20%26%20co%20%2B%2F%3D"));
        // Space is %20, never '+'.
        assert!(!signed.contains('+'));

        Ok(())
    }

    #[tokio::test]
    async fn test_encoding_unicode() -> Result<()> {
        let uri = "https://webservices.amazon.com/onca/xml?Keywords=caf%C3%A9";
        let signed = sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri).await?;

        assert!(signed.contains("Keywords=caf%C3%A9"));

        Ok(())
    }

    #[tokio::test]
    async fn test_reserved_key_rejected() {
        let uri = "https://webservices.amazon.com/onca/xml?Timestamp=2024-01-01T00%3A00%3A00Z";
        let err = sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ecsign_core::ErrorKind::RequestInvalid);
        assert!(err.to_string().contains("Timestamp"));
    }

    #[tokio::test]
    async fn test_empty_parameters_sign_fine() -> Result<()> {
        let uri = "https://webservices.amazon.com/onca/xml";
        let signed = sign(RequestSigner::new("ItemSearch").with_time(test_time()), uri).await?;

        assert!(signed.contains("Operation=ItemSearch"));
        assert!(signed.contains("&Signature="));

        Ok(())
    }

    #[tokio::test]
    async fn test_host_follows_credential_locale() -> Result<()> {
        let cred = Credential::new("AKIDEXAMPLE", "secret", "tag-20", Locale::CoJp)
            .expect("must be valid");

        let mut parts = parts_for("https://example.com/onca/xml?ItemId=1");
        RequestSigner::new("ItemLookup")
            .with_time(test_time())
            .sign_request(&Context::new(), &mut parts, Some(&cred), None)
            .await?;

        assert!(parts
            .uri
            .to_string()
            .starts_with("https://webservices.amazon.co.jp/onca/xml?"));

        Ok(())
    }

    #[tokio::test]
    async fn test_expires_in_unsupported() {
        let mut parts = parts_for("https://webservices.amazon.com/onca/xml");
        let err = RequestSigner::new("ItemSearch")
            .sign_request(
                &Context::new(),
                &mut parts,
                Some(&test_credential()),
                Some(Duration::from_secs(60)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ecsign_core::ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_missing_credential_is_an_error() {
        let mut parts = parts_for("https://webservices.amazon.com/onca/xml");
        let err = RequestSigner::new("ItemSearch")
            .sign_request(&Context::new(), &mut parts, None, None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ecsign_core::ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_signature_round_trips_through_reparse() -> Result<()> {
        // Re-parse the signed URL, keep only the caller-supplied parameters,
        // and sign again: the identical signature must come back out.
        let signed = sign(
            RequestSigner::new("ItemLookup").with_time(test_time()),
            "https://webservices.amazon.com/onca/xml?ItemId=0679722769",
        )
        .await?;

        let (base, query) = signed.split_once('?').expect("signed url must have a query");
        let caller_query = query
            .split('&')
            .filter(|pair| {
                let key = pair.split('=').next().unwrap_or_default();
                !RESERVED_PARAMETERS.contains(&key)
            })
            .collect::<Vec<_>>()
            .join("&");

        let resigned = sign(
            RequestSigner::new("ItemLookup").with_time(test_time()),
            &format!("{base}?{caller_query}"),
        )
        .await?;

        assert_eq!(signed, resigned);

        Ok(())
    }
}
