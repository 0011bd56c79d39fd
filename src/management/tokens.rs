use crate::{error::AppResult, management::KeyValueStore, types::Service};

/// Per-service user tokens kept in the key-value store.
///
/// Tokens are opaque and never validated here. An empty value counts as no
/// token at all.
pub struct TokenManager<'a> {
    store: &'a mut dyn KeyValueStore,
}

impl<'a> TokenManager<'a> {
    pub fn new(store: &'a mut dyn KeyValueStore) -> Self {
        TokenManager { store }
    }

    pub async fn cached(&self, service: Service) -> AppResult<Option<String>> {
        let token = self.store.get(service.token_key()).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub async fn persist(&mut self, service: Service, token: &str) -> AppResult<()> {
        self.store.set(service.token_key(), token).await
    }

    pub async fn clear(&mut self, service: Service) -> AppResult<()> {
        self.store.remove(service.token_key()).await
    }

    /// True iff every service has a token, which is when migrating is possible.
    pub async fn all_authorized(&self) -> AppResult<bool> {
        for service in Service::ALL {
            if !self.store.has(service.token_key()).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
