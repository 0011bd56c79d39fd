#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use plmcli::{
    authorize::Authorizer,
    backend::Backend,
    controller::Session,
    error::{AppError, AppResult},
    management::MemoryStore,
    types::{Checkbox, MigrateRequest, Playlist, Service},
    ui::{Control, Handler, LoginState, PlaylistTarget, UiAdapter},
};
use reqwest::StatusCode;
use serde_json::{Value, json};

pub fn playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn http_error(path: &str, status: u16) -> AppError {
    AppError::Http {
        path: path.to_string(),
        status: StatusCode::from_u16(status).unwrap(),
    }
}

/// Backend answering from canned data and recording every call.
pub struct FakeBackend {
    pub welcome: Mutex<Result<String, u16>>,
    pub playlists: Mutex<HashMap<Service, Result<Vec<Playlist>, u16>>>,
    pub migrate_result: Mutex<Result<Value, u16>>,
    pub calls: Mutex<Vec<String>>,
    pub migrate_requests: Mutex<Vec<MigrateRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            welcome: Mutex::new(Ok("Hello from the backend".to_string())),
            playlists: Mutex::new(HashMap::new()),
            migrate_result: Mutex::new(Ok(json!({"migrated": true}))),
            calls: Mutex::new(Vec::new()),
            migrate_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_welcome(&self, welcome: Result<&str, u16>) {
        *self.welcome.lock().unwrap() = welcome.map(str::to_string);
    }

    pub fn set_playlists(&self, service: Service, playlists: Result<Vec<Playlist>, u16>) {
        self.playlists.lock().unwrap().insert(service, playlists);
    }

    pub fn set_migrate_result(&self, result: Result<Value, u16>) {
        *self.migrate_result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn developer_token(&self) -> AppResult<String> {
        self.record("developer-token");
        Ok("developer-token".to_string())
    }

    async fn welcome_message(&self) -> AppResult<String> {
        self.record("welcome-message");
        self.welcome
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| http_error("/api/welcome-message", status))
    }

    async fn playlists(&self, service: Service) -> AppResult<Vec<Playlist>> {
        self.record(service.playlists_path());
        self.playlists
            .lock()
            .unwrap()
            .get(&service)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
            .map_err(|status| http_error(service.playlists_path(), status))
    }

    async fn migrate(&self, request: &MigrateRequest) -> AppResult<Value> {
        self.record("migrate-playlists");
        self.migrate_requests.lock().unwrap().push(request.clone());
        self.migrate_result
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| http_error("/api/migrate-playlists", status))
    }
}

/// Authorizer with a fixed answer that counts how often it is asked.
pub struct FakeAuthorizer {
    service: Service,
    answer: Result<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeAuthorizer {
    pub fn granting(service: Service, token: &str) -> Self {
        Self {
            service,
            answer: Ok(token.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn declining(service: Service) -> Self {
        Self {
            service,
            answer: Err("user cancelled".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Authorizer for FakeAuthorizer {
    fn service(&self) -> Service {
        self.service
    }

    async fn authorize(&self) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(AppError::AuthorizationDeclined)
    }
}

/// UI adapter recording what the controller shows.
#[derive(Default)]
pub struct FakeUi {
    pub bindings: HashMap<Control, Handler>,
    pub login: HashMap<Service, LoginState>,
    pub migrate_visible: Option<bool>,
    pub welcome: Vec<String>,
    pub error: Option<String>,
    pub errors_shown: usize,
    pub successes: Vec<String>,
    pub rendered: HashMap<PlaylistTarget, Vec<Checkbox>>,
    pub render_count: usize,
    pub selection_shown: bool,
    pub selection: Vec<String>,
    pub clicks: VecDeque<Control>,
}

impl FakeUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(ids: &[&str]) -> Self {
        Self {
            selection: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn click(&mut self, control: Control) {
        self.clicks.push_back(control);
    }

    pub fn login_state(&self, service: Service) -> Option<LoginState> {
        self.login.get(&service).copied()
    }

    pub fn rendered_ids(&self, target: PlaylistTarget) -> Option<Vec<String>> {
        self.rendered
            .get(&target)
            .map(|cs| cs.iter().map(|c| c.value.clone()).collect())
    }
}

#[async_trait]
impl UiAdapter for FakeUi {
    fn on_click(&mut self, control: Control, handler: Handler) {
        self.bindings.insert(control, handler);
    }

    async fn next_handler(&mut self) -> Option<Handler> {
        while let Some(control) = self.clicks.pop_front() {
            if let Some(handler) = self.bindings.get(&control) {
                return Some(*handler);
            }
        }
        None
    }

    fn set_login_state(&mut self, service: Service, state: LoginState) {
        self.login.insert(service, state);
    }

    fn set_migrate_visible(&mut self, visible: bool) {
        self.migrate_visible = Some(visible);
    }

    fn show_welcome(&mut self, message: &str) {
        self.welcome.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.errors_shown += 1;
    }

    fn show_success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn render_playlists(&mut self, target: PlaylistTarget, checkboxes: &[Checkbox]) {
        self.rendered.insert(target, checkboxes.to_vec());
        self.render_count += 1;
    }

    fn show_playlist_selection(&mut self) {
        self.selection_shown = true;
    }

    async fn selected_playlist_ids(&mut self) -> Vec<String> {
        self.selection.clone()
    }
}

/// Session over an in-memory store seeded with `entries`.
pub fn session_with(
    entries: &[(&str, &str)],
    backend: Arc<FakeBackend>,
    authorizers: Vec<FakeAuthorizer>,
) -> Session {
    let store = MemoryStore::with_entries(entries.iter().map(|(k, v)| (*k, *v)));
    authorizers.into_iter().fold(
        Session::new(Box::new(store), backend),
        |session, authorizer| session.with_authorizer(Box::new(authorizer)),
    )
}
