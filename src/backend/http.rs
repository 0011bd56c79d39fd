use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{
    backend::Backend,
    config, debug,
    error::{AppError, AppResult},
    types::{DeveloperTokenResponse, MigrateRequest, Playlist, Service, WelcomeMessageResponse},
};

const DEVELOPER_TOKEN_PATH: &str = "/api/developer-token";
const WELCOME_MESSAGE_PATH: &str = "/api/welcome-message";
const MIGRATE_PLAYLISTS_PATH: &str = "/api/migrate-playlists";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Backend at the configured `PLMCLI_BACKEND_URL`.
    pub fn from_env() -> Self {
        Self::new(config::backend_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url, path = path)
    }

    async fn get(&self, path: &str) -> AppResult<Response> {
        debug!("GET {}", self.url(path));
        let response = self.client.get(self.url(path)).send().await?;
        check_status(path, response)
    }
}

fn check_status(path: &str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::Http {
            path: path.to_string(),
            status,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn developer_token(&self) -> AppResult<String> {
        let response = self.get(DEVELOPER_TOKEN_PATH).await?;
        let body = response.json::<DeveloperTokenResponse>().await?;
        Ok(body.token)
    }

    async fn welcome_message(&self) -> AppResult<String> {
        let response = self.get(WELCOME_MESSAGE_PATH).await?;
        let body = response.json::<WelcomeMessageResponse>().await?;
        Ok(body.response)
    }

    async fn playlists(&self, service: Service) -> AppResult<Vec<Playlist>> {
        let response = self.get(service.playlists_path()).await?;
        Ok(response.json::<Vec<Playlist>>().await?)
    }

    async fn migrate(&self, request: &MigrateRequest) -> AppResult<Value> {
        debug!(
            "POST {} with {} playlists",
            self.url(MIGRATE_PLAYLISTS_PATH),
            request.playlists.len()
        );
        let response = self
            .client
            .post(self.url(MIGRATE_PLAYLISTS_PATH))
            .json(request)
            .send()
            .await?;
        let response = check_status(MIGRATE_PLAYLISTS_PATH, response)?;

        // any 2xx counts as success, whatever the body looks like
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}
