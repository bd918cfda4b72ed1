use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Loads credentials through a provider and caches the result while it
/// stays valid.
///
/// This is the single place where a provider is consulted: [`Signer`] and
/// higher level clients both go through it, so a credential is loaded once
/// and reused until it turns invalid.
#[derive(Clone, Debug)]
pub struct CredentialLoader<C: SigningCredential> {
    provider: Arc<dyn ProvideCredential<Credential = C>>,
    cached: Arc<Mutex<Option<C>>>,
}

impl<C: SigningCredential> CredentialLoader<C> {
    /// Create a new loader around the given provider.
    pub fn new(provider: impl ProvideCredential<Credential = C>) -> Self {
        Self {
            provider: Arc::new(provider),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the cached credential while it is valid, consulting the
    /// provider otherwise.
    ///
    /// `Ok(None)` means the provider had nothing to offer; deciding whether
    /// that is an error is left to the caller.
    pub async fn load(&self, ctx: &Context) -> Result<Option<C>> {
        let cached = self.cached.lock().expect("lock poisoned").clone();
        if cached.is_valid() {
            return Ok(cached);
        }

        let fresh = self.provider.provide_credential(ctx).await?;
        *self.cached.lock().expect("lock poisoned") = fresh.clone();

        Ok(fresh)
    }
}

/// Signer is the main struct used to sign the request.
///
/// It pairs a [`CredentialLoader`] with a request builder: each `sign` call
/// loads (or reuses) the credential and hands it to the builder.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    loader: CredentialLoader<C>,
    builder: Arc<dyn SignRequest<Credential = C>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,
            loader: CredentialLoader::new(provider),
            builder: Arc::new(builder),
        }
    }

    /// Signing request.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let cred = self.loader.load(&self.ctx).await?;

        self.builder
            .sign_request(&self.ctx, req, cred.as_ref(), expires_in)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential {
        key: String,
    }

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.key.is_empty()
        }
    }

    /// Provider that counts how often it is consulted.
    #[derive(Debug)]
    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        key: &'static str,
    }

    #[async_trait::async_trait]
    impl ProvideCredential for CountingProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<TestCredential>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential {
                key: self.key.to_string(),
            }))
        }
    }

    #[tokio::test]
    async fn test_loader_reuses_valid_credential() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CredentialLoader::new(CountingProvider {
            calls: calls.clone(),
            key: "ak",
        });
        let ctx = Context::new();

        assert!(loader.load(&ctx).await?.is_some());
        assert!(loader.load(&ctx).await?.is_some());

        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_loader_reloads_while_invalid() -> Result<()> {
        // An empty key never validates, so every load goes back to the
        // provider instead of the cache.
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CredentialLoader::new(CountingProvider {
            calls: calls.clone(),
            key: "",
        });
        let ctx = Context::new();

        loader.load(&ctx).await?;
        loader.load(&ctx).await?;

        assert_eq!(calls.load(Ordering::SeqCst), 2);

        Ok(())
    }
}
