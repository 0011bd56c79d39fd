//! Session state and command handlers.
//!
//! [`Session`] holds everything the handlers share: the key-value store with
//! the cached tokens and welcome message, the backend client and one
//! authorizer per service. [`Controller`] pairs a session with a UI adapter,
//! wires the controls to their handlers and runs them one at a time.

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;

use crate::{
    authorize::Authorizer,
    backend::Backend,
    debug,
    error::{AppError, AppResult},
    info,
    management::{KeyValueStore, TokenManager, WelcomeMessageManager},
    success,
    types::{MigrateRequest, Playlist, Service},
    ui::{Control, Handler, LoginState, PlaylistTarget, UiAdapter},
    utils, warning,
};

/// Migrated playlists end up here.
pub const DESTINATION: Service = Service::AppleMusic;

pub struct Session {
    store: Box<dyn KeyValueStore>,
    backend: Arc<dyn Backend>,
    authorizers: HashMap<Service, Box<dyn Authorizer>>,
}

impl Session {
    pub fn new(store: Box<dyn KeyValueStore>, backend: Arc<dyn Backend>) -> Self {
        Self {
            store,
            backend,
            authorizers: HashMap::new(),
        }
    }

    /// Registers the authorizer for its service, replacing an earlier one.
    pub fn with_authorizer(mut self, authorizer: Box<dyn Authorizer>) -> Self {
        self.authorizers.insert(authorizer.service(), authorizer);
        self
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub async fn cached_token(&mut self, service: Service) -> AppResult<Option<String>> {
        TokenManager::new(&mut *self.store).cached(service).await
    }

    /// Returns the token for `service`, authorizing the user if none is cached.
    ///
    /// A cached token is returned as is, without authorization or network
    /// access. A freshly obtained token is persisted before it is returned.
    /// Either way the service's login control ends up logged in. On error
    /// nothing is persisted and the control is left alone.
    pub async fn get_or_request_token(
        &mut self,
        service: Service,
        ui: &mut dyn UiAdapter,
    ) -> AppResult<String> {
        if let Some(token) = self.cached_token(service).await? {
            debug!("{} user token found in cache.", service);
            ui.set_login_state(service, LoginState::LoggedIn);
            return Ok(token);
        }

        info!("Authorizing user for {}...", service);
        let authorizer = self.authorizers.get(&service).ok_or_else(|| {
            AppError::Authorization(format!("no authorization available for {}", service))
        })?;
        let token = authorizer.authorize().await?;
        if token.is_empty() {
            return Err(AppError::Authorization(format!(
                "{} returned an empty user token",
                service
            )));
        }

        TokenManager::new(&mut *self.store)
            .persist(service, &token)
            .await?;
        success!("{} user authorized successfully.", service);
        ui.set_login_state(service, LoginState::LoggedIn);
        Ok(token)
    }

    /// Drops the cached token of `service`.
    pub async fn forget_token(
        &mut self,
        service: Service,
        ui: &mut dyn UiAdapter,
    ) -> AppResult<()> {
        TokenManager::new(&mut *self.store).clear(service).await?;
        ui.set_login_state(service, LoginState::LoggedOut);
        self.refresh_migrate_button_visibility(ui).await;
        Ok(())
    }

    pub async fn get_cached_welcome_message(&mut self) -> String {
        self.get_cached_welcome_message_at(utils::now_millis())
            .await
    }

    pub async fn get_cached_welcome_message_at(&mut self, now_ms: i64) -> String {
        WelcomeMessageManager::new(&mut *self.store)
            .get_or_fetch(self.backend.as_ref(), now_ms)
            .await
    }

    /// Shows the migrate control iff both services have a cached token.
    pub async fn refresh_migrate_button_visibility(&mut self, ui: &mut dyn UiAdapter) -> bool {
        let visible = match TokenManager::new(&mut *self.store).all_authorized().await {
            Ok(visible) => visible,
            Err(e) => {
                warning!("Failed to read cached tokens: {}", e);
                false
            }
        };
        ui.set_migrate_visible(visible);
        visible
    }

    /// Lists the playlists of `service`. Any failure shows an error and
    /// yields an empty list.
    pub async fn load_playlists(&self, service: Service, ui: &mut dyn UiAdapter) -> Vec<Playlist> {
        match self.backend.playlists(service).await {
            Ok(playlists) => playlists,
            Err(e) => {
                warning!("Failed to load {} playlists: {}", service, e);
                let message = match e {
                    AppError::Http { .. } => format!("Failed to load {} playlists.", service),
                    _ => format!("An error occurred while loading {} playlists.", service),
                };
                ui.show_error(&message);
                Vec::new()
            }
        }
    }

    /// Replaces the content of `target` with one checkbox per playlist.
    pub fn render_playlists(
        &self,
        playlists: &[Playlist],
        target: PlaylistTarget,
        ui: &mut dyn UiAdapter,
    ) {
        ui.render_playlists(target, &utils::playlist_checkboxes(playlists));
    }

    /// Loads and renders the playlists of `service` in its target.
    pub async fn show_playlists(&self, service: Service, ui: &mut dyn UiAdapter) -> Vec<Playlist> {
        let playlists = self.load_playlists(service, ui).await;
        let target = PlaylistTarget::for_service(service);
        self.render_playlists(&playlists, target, ui);
        if target == PlaylistTarget::Source {
            ui.show_playlist_selection();
        }
        playlists
    }

    /// Requests migration of the selected playlists into Apple Music.
    ///
    /// An empty selection or a missing Apple Music token is rejected before
    /// any request is made. Failures are shown in the UI and returned; nothing
    /// local changes. On success the destination playlists are reloaded.
    pub async fn submit_migration(
        &mut self,
        selected_ids: &[String],
        ui: &mut dyn UiAdapter,
    ) -> AppResult<Value> {
        match self.request_migration(selected_ids).await {
            Ok(result) => {
                debug!("Playlists migrated successfully: {}", result);
                ui.show_success(&format!(
                    "Requested migration of {} playlist(s) to {}.",
                    selected_ids.len(),
                    DESTINATION
                ));
                self.show_playlists(DESTINATION, ui).await;
                Ok(result)
            }
            Err(e) => {
                warning!("Playlist migration failed: {}", e);
                let message = match &e {
                    AppError::EmptySelection | AppError::MissingToken(_) => e.to_string(),
                    AppError::Http { .. } => {
                        "Failed to migrate the playlists. Please try again.".to_string()
                    }
                    _ => "An error occurred during playlist migration. Please try again."
                        .to_string(),
                };
                ui.show_error(&message);
                Err(e)
            }
        }
    }

    async fn request_migration(&mut self, selected_ids: &[String]) -> AppResult<Value> {
        if selected_ids.is_empty() {
            return Err(AppError::EmptySelection);
        }

        let user_token = self
            .cached_token(DESTINATION)
            .await?
            .ok_or(AppError::MissingToken(DESTINATION))?;

        let request = MigrateRequest {
            user_token,
            playlists: selected_ids.to_vec(),
        };
        self.backend.migrate(&request).await
    }
}

/// Drives a [`Session`] from the clicks of a UI.
pub struct Controller<U: UiAdapter> {
    session: Session,
    ui: U,
    initialized: bool,
}

impl<U: UiAdapter> Controller<U> {
    pub fn new(session: Session, ui: U) -> Self {
        Self {
            session,
            ui,
            initialized: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Session and UI at once, for running a session operation directly.
    pub fn parts_mut(&mut self) -> (&mut Session, &mut U) {
        (&mut self.session, &mut self.ui)
    }

    /// Page-load initialization. Runs once; later calls do nothing.
    ///
    /// Binds the controls, marks services with a cached token as logged in
    /// (without authorizing anyone) and lists their playlists, updates the
    /// migrate control and shows the welcome message.
    pub async fn init(&mut self) {
        if self.initialized {
            debug!("Controller already initialized.");
            return;
        }
        self.initialized = true;

        for service in Service::ALL {
            self.ui
                .on_click(Control::login(service), Handler::Login(service));
        }
        self.ui.on_click(Control::MigrateButton, Handler::Migrate);

        let mut cached = Vec::new();
        for service in Service::ALL {
            let state = match self.session.cached_token(service).await {
                Ok(Some(_)) => {
                    debug!("{} user token found in cache.", service);
                    cached.push(service);
                    LoginState::LoggedIn
                }
                Ok(None) => LoginState::LoggedOut,
                Err(e) => {
                    warning!("Failed to read cached {} token: {}", service, e);
                    LoginState::LoggedOut
                }
            };
            self.ui.set_login_state(service, state);
        }
        for service in cached {
            self.session.show_playlists(service, &mut self.ui).await;
        }
        self.session
            .refresh_migrate_button_visibility(&mut self.ui)
            .await;

        let message = self.session.get_cached_welcome_message().await;
        self.ui.show_welcome(&message);
    }

    pub async fn dispatch(&mut self, handler: Handler) {
        match handler {
            Handler::Login(service) => {
                self.login(service).await;
            }
            Handler::Migrate => {
                self.migrate().await;
            }
        }
    }

    /// Login click: authorize, then list the service's playlists.
    pub async fn login(&mut self, service: Service) -> bool {
        if let Err(e) = self
            .session
            .get_or_request_token(service, &mut self.ui)
            .await
        {
            warning!("{} authorization failed: {}", service, e);
            self.ui.show_error(&format!(
                "{} authorization failed. Please try again.",
                service
            ));
            return false;
        }

        self.session.show_playlists(service, &mut self.ui).await;
        self.session
            .refresh_migrate_button_visibility(&mut self.ui)
            .await;
        true
    }

    /// Migrate click: submit whatever the user has checked.
    pub async fn migrate(&mut self) -> Option<Value> {
        info!("Migrate button clicked.");
        let selected = self.ui.selected_playlist_ids().await;
        self.session
            .submit_migration(&selected, &mut self.ui)
            .await
            .ok()
    }

    /// Initializes, then handles clicks until the UI has no more.
    pub async fn run(&mut self) {
        self.init().await;
        while let Some(handler) = self.ui.next_handler().await {
            self.dispatch(handler).await;
        }
    }
}
