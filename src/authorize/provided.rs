use async_trait::async_trait;

use crate::{
    authorize::Authorizer,
    config,
    error::{AppError, AppResult},
    types::Service,
};

/// Authorizer for a token handed to the application from outside, through
/// configuration or the command line.
pub struct ProvidedTokenAuthorizer {
    service: Service,
    token: Option<String>,
}

impl ProvidedTokenAuthorizer {
    pub fn new(service: Service, token: Option<String>) -> Self {
        Self {
            service,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Spotify authorizer backed by `SPOTIFY_USER_TOKEN`.
    pub fn spotify_from_env() -> Self {
        Self::new(Service::Spotify, config::spotify_user_token())
    }
}

#[async_trait]
impl Authorizer for ProvidedTokenAuthorizer {
    fn service(&self) -> Service {
        self.service
    }

    async fn authorize(&self) -> AppResult<String> {
        self.token.clone().ok_or_else(|| {
            AppError::Authorization(match self.service {
                Service::Spotify => {
                    "no Spotify user token provided; set SPOTIFY_USER_TOKEN or pass --token"
                        .to_string()
                }
                Service::AppleMusic => "no Apple Music user token provided".to_string(),
            })
        })
    }
}
