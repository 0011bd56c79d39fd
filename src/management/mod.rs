mod store;
mod tokens;
mod welcome;

pub use store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
pub use tokens::TokenManager;
pub use welcome::FALLBACK_WELCOME_MESSAGE;
pub use welcome::WELCOME_MESSAGE_EXPIRY_KEY;
pub use welcome::WELCOME_MESSAGE_KEY;
pub use welcome::WELCOME_MESSAGE_TTL_MS;
pub use welcome::WelcomeMessageManager;
