use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use ecsign_core::{Context, Error, ProvideCredential, Result};

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `AMAZON_ACCESS_KEY`: the access key
/// - `AMAZON_SECRET_KEY`: the secret key
/// - `AMAZON_ASSOCIATE_TAG`: the associate tag
/// - `AMAZON_LOCALE`: the marketplace suffix, e.g. `co.uk`
///
/// If neither key is set the provider yields nothing, allowing the next
/// provider in a chain to run. If keys are set but the locale is missing or
/// unsupported, loading fails fast with a configuration error.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let (Some(access_key), Some(secret_key)) =
            (envs.get(AMAZON_ACCESS_KEY), envs.get(AMAZON_SECRET_KEY))
        else {
            return Ok(None);
        };

        let locale = envs
            .get(AMAZON_LOCALE)
            .ok_or_else(|| Error::config_invalid("no locale has been set"))?
            .parse()?;
        let associate_tag = envs.get(AMAZON_ASSOCIATE_TAG).cloned().unwrap_or_default();

        Credential::new(access_key, secret_key, &associate_tag, locale).map(Some)
    }
}
