use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use tokio::{net::TcpListener, sync::Mutex, time::Instant};

use crate::{
    authorize::Authorizer,
    backend::Backend,
    config, debug,
    error::{AppError, AppResult},
    server::start_api_server,
    types::{AuthorizationOutcome, AuthorizationState, Service},
    utils, warning,
};

/// Opens the authorization page for the user.
#[derive(Clone)]
pub enum BrowserLauncher {
    /// The system default browser.
    System,
    /// Any other way of visiting the URL.
    Custom(Arc<dyn Fn(String) + Send + Sync>),
}

impl BrowserLauncher {
    fn open(&self, url: &str) {
        match self {
            BrowserLauncher::System => {
                if webbrowser::open(url).is_err() {
                    warning!(
                        "Failed to open browser. Please navigate to the following URL manually:\n{}",
                        url
                    )
                }
            }
            BrowserLauncher::Custom(open) => open(url.to_string()),
        }
    }
}

/// Apple Music authorization through the SDK hosted by the backend.
///
/// The SDK page is configured with the backend's developer token, asks the
/// user to sign in, and redirects to the local `/callback` endpoint with
/// either `music_user_token` or `error`. The `state` query parameter must
/// round-trip unchanged.
pub struct MusicKitAuthorizer {
    backend: Arc<dyn Backend>,
    auth_page_url: String,
    callback_addr: SocketAddr,
    timeout: Duration,
    app_name: String,
    launcher: BrowserLauncher,
}

impl MusicKitAuthorizer {
    pub fn new(
        backend: Arc<dyn Backend>,
        auth_page_url: impl Into<String>,
        callback_addr: SocketAddr,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            auth_page_url: auth_page_url.into(),
            callback_addr,
            timeout,
            app_name: config::DEFAULT_APP_NAME.to_string(),
            launcher: BrowserLauncher::System,
        }
    }

    pub fn from_env(backend: Arc<dyn Backend>) -> Self {
        let mut authorizer = Self::new(
            backend,
            config::auth_page_url(),
            config::callback_addr(),
            config::auth_timeout(),
        );
        authorizer.app_name = config::app_name();
        authorizer
    }

    pub fn with_launcher(mut self, launcher: BrowserLauncher) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn authorization_url(
        &self,
        developer_token: &str,
        redirect_uri: &str,
        state: &str,
    ) -> AppResult<Url> {
        Url::parse_with_params(
            &self.auth_page_url,
            &[
                ("developer_token", developer_token),
                ("app_name", self.app_name.as_str()),
                ("app_build", config::APP_BUILD),
                ("redirect_uri", redirect_uri),
                ("state", state),
            ],
        )
        .map_err(|e| {
            AppError::Authorization(format!(
                "invalid authorization page URL {}: {}",
                self.auth_page_url, e
            ))
        })
    }
}

#[async_trait]
impl Authorizer for MusicKitAuthorizer {
    fn service(&self) -> Service {
        Service::AppleMusic
    }

    async fn authorize(&self) -> AppResult<String> {
        let developer_token = self.backend.developer_token().await?;
        debug!("Fetched developer token for the Apple Music SDK.");

        let state = utils::generate_state();
        let shared_state = Arc::new(Mutex::new(Some(AuthorizationState::new(state.clone()))));

        let listener = TcpListener::bind(self.callback_addr).await?;
        let redirect_uri = format!("http://{}/callback", listener.local_addr()?);

        let server_state = Arc::clone(&shared_state);
        let server = tokio::spawn(async move {
            if let Err(e) = start_api_server(listener, server_state).await {
                warning!("Authorization callback server stopped: {}", e);
            }
        });

        let auth_url = match self.authorization_url(&developer_token, &redirect_uri, &state) {
            Ok(url) => url,
            Err(e) => {
                server.abort();
                return Err(e);
            }
        };
        self.launcher.open(auth_url.as_str());

        let outcome = wait_for_outcome(Arc::clone(&shared_state), self.timeout).await;
        server.abort();

        match outcome {
            Some(AuthorizationOutcome::Authorized(token)) => Ok(token),
            Some(AuthorizationOutcome::Declined(reason)) => {
                Err(AppError::AuthorizationDeclined(reason))
            }
            None => Err(AppError::AuthorizationTimedOut(self.timeout.as_secs())),
        }
    }
}

async fn wait_for_outcome(
    shared_state: Arc<Mutex<Option<AuthorizationState>>>,
    max_wait: Duration,
) -> Option<AuthorizationOutcome> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for Apple Music authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(outcome) = lock.as_ref().and_then(|s| s.outcome.clone()) {
            pb.finish_and_clear();
            return Some(outcome);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    pb.finish_and_clear();
    None
}
