use crate::{
    backend::Backend, debug, error::AppResult, management::KeyValueStore, types::CachedMessage,
    warning,
};

pub const WELCOME_MESSAGE_KEY: &str = "welcomeMessage";
pub const WELCOME_MESSAGE_EXPIRY_KEY: &str = "welcomeMessageExpiry";

/// A fetched welcome message stays valid for 24 hours.
pub const WELCOME_MESSAGE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Shown when the backend cannot provide a welcome message. Never cached.
pub const FALLBACK_WELCOME_MESSAGE: &str =
    "Welcome! Move your playlists from Spotify to Apple Music.";

pub struct WelcomeMessageManager<'a> {
    store: &'a mut dyn KeyValueStore,
}

impl<'a> WelcomeMessageManager<'a> {
    pub fn new(store: &'a mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Reads the cached message. A missing or unparsable expiry yields none.
    pub async fn load(&self) -> AppResult<Option<CachedMessage>> {
        let Some(message) = self.store.get(WELCOME_MESSAGE_KEY).await? else {
            return Ok(None);
        };
        let expiry_ms = self
            .store
            .get(WELCOME_MESSAGE_EXPIRY_KEY)
            .await?
            .and_then(|v| v.parse::<i64>().ok());

        Ok(expiry_ms.map(|expiry_ms| CachedMessage { message, expiry_ms }))
    }

    pub async fn persist(&mut self, cached: &CachedMessage) -> AppResult<()> {
        self.store.set(WELCOME_MESSAGE_KEY, &cached.message).await?;
        self.store
            .set(WELCOME_MESSAGE_EXPIRY_KEY, &cached.expiry_ms.to_string())
            .await
    }

    /// Returns the welcome message valid at `now_ms`.
    ///
    /// A cached message is returned while `now_ms` is before its expiry,
    /// without contacting the backend. Otherwise the message is fetched and
    /// cached with a fresh 24 hour expiry. If fetching fails the fallback
    /// message is returned and the cache is left alone, so the next call
    /// fetches again.
    pub async fn get_or_fetch(&mut self, backend: &dyn Backend, now_ms: i64) -> String {
        match self.load().await {
            Ok(Some(cached)) if cached.is_valid_at(now_ms) => {
                debug!("Using cached welcome message.");
                return cached.message;
            }
            Ok(_) => {}
            Err(e) => warning!("Failed to read cached welcome message: {}", e),
        }

        let message = match backend.welcome_message().await {
            Ok(message) => message,
            Err(e) => {
                warning!("Failed to fetch welcome message: {}", e);
                return FALLBACK_WELCOME_MESSAGE.to_string();
            }
        };

        let cached = CachedMessage {
            message,
            expiry_ms: now_ms + WELCOME_MESSAGE_TTL_MS,
        };
        if let Err(e) = self.persist(&cached).await {
            warning!("Failed to cache welcome message: {}", e);
        }
        cached.message
    }
}
