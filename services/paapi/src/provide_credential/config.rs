use crate::{Config, Credential};
use async_trait::async_trait;
use ecsign_core::{Context, Error, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider loads credentials from an explicit [`Config`].
///
/// The config is validated here, eagerly: an unsupported locale or a missing
/// key surfaces as a configuration error on the first load instead of a
/// rejected request later.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(ak), Some(sk)) = (&self.config.access_key, &self.config.secret_key) else {
            return Ok(None);
        };

        let locale = self
            .config
            .locale
            .as_deref()
            .ok_or_else(|| Error::config_invalid("no locale has been set"))?
            .parse()?;
        let associate_tag = self.config.associate_tag.clone().unwrap_or_default();

        Credential::new(ak, sk, &associate_tag, locale).map(Some)
    }
}
