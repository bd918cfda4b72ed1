use crate::provide_credential::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};
use async_trait::async_trait;
use ecsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider loads credentials via the default chain.
///
/// Resolution order:
///
/// 1. Environment variables (`AMAZON_ACCESS_KEY` etc.)
/// 2. The supplied [`Config`]
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default().into())
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new(config: std::sync::Arc<Config>) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(ConfigCredentialProvider::new(config));

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::Locale;
    use ecsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_default_credential_provider_without_env() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::new(),
        });

        let provider = DefaultCredentialProvider::default();
        assert!(provider.provide_credential(&ctx).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_default_credential_provider_with_env() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AMAZON_ACCESS_KEY.to_string(), "env_access_key".to_string()),
                (AMAZON_SECRET_KEY.to_string(), "env_secret_key".to_string()),
                (AMAZON_LOCALE.to_string(), "fr".to_string()),
            ]),
        });

        let provider = DefaultCredentialProvider::default();
        let cred = provider
            .provide_credential(&ctx)
            .await?
            .expect("credential must be present");
        assert_eq!(cred.access_key, "env_access_key");
        assert_eq!(cred.locale, Locale::Fr);

        Ok(())
    }

    #[tokio::test]
    async fn test_default_credential_provider_env_wins_over_config() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AMAZON_ACCESS_KEY.to_string(), "env_access_key".to_string()),
                (AMAZON_SECRET_KEY.to_string(), "env_secret_key".to_string()),
                (AMAZON_LOCALE.to_string(), "it".to_string()),
            ]),
        });

        let config = Config {
            access_key: Some("cfg_access_key".to_string()),
            secret_key: Some("cfg_secret_key".to_string()),
            locale: Some("com".to_string()),
            ..Default::default()
        };
        let provider = DefaultCredentialProvider::new(config.into());

        let cred = provider
            .provide_credential(&ctx)
            .await?
            .expect("credential must be present");
        assert_eq!(cred.access_key, "env_access_key");

        Ok(())
    }

    #[tokio::test]
    async fn test_default_credential_provider_falls_back_to_config() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::new(),
        });

        let config = Config {
            access_key: Some("cfg_access_key".to_string()),
            secret_key: Some("cfg_secret_key".to_string()),
            locale: Some("com".to_string()),
            ..Default::default()
        };
        let provider = DefaultCredentialProvider::new(config.into());

        let cred = provider
            .provide_credential(&ctx)
            .await?
            .expect("credential must be present");
        assert_eq!(cred.access_key, "cfg_access_key");

        Ok(())
    }
}
