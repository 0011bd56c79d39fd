use std::{collections::HashMap, io::Write};

use async_trait::async_trait;
use colored::Colorize;
use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    debug, info, success,
    types::{Checkbox, Service},
    ui::{Control, Handler, LoginState, PlaylistTarget, UiAdapter},
    utils,
};

const CONTROL_ORDER: [Control; 3] = [
    Control::SpotifyLogin,
    Control::AppleMusicLogin,
    Control::MigrateButton,
];

/// Terminal rendition of the migration page.
///
/// Controls become a numbered menu, checkboxes become a table, and the
/// selection is typed in as row numbers or playlist ids.
pub struct TerminalUi {
    bindings: HashMap<Control, Handler>,
    login: HashMap<Service, LoginState>,
    migrate_visible: bool,
    selection_visible: bool,
    error: Option<String>,
    source: Vec<Checkbox>,
    destination: Vec<Checkbox>,
    preselected: Option<Vec<String>>,
    input: Lines<BufReader<Stdin>>,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            login: HashMap::new(),
            migrate_visible: false,
            selection_visible: false,
            error: None,
            source: Vec::new(),
            destination: Vec::new(),
            preselected: None,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Answers the next selection request with `ids` instead of prompting.
    pub fn with_selection(mut self, ids: Vec<String>) -> Self {
        self.preselected = Some(ids);
        self
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn login_state(&self, service: Service) -> LoginState {
        self.login
            .get(&service)
            .copied()
            .unwrap_or(LoginState::LoggedOut)
    }

    /// Controls offered in the menu. A logged-in service keeps its login
    /// entry, which then only reloads the playlists.
    fn enabled_controls(&self) -> Vec<Control> {
        CONTROL_ORDER
            .into_iter()
            .filter(|c| self.bindings.contains_key(c))
            .filter(|c| *c != Control::MigrateButton || self.migrate_visible)
            .collect()
    }

    fn menu_label(&self, control: Control) -> String {
        match control.service() {
            Some(service) if self.login_state(service) == LoginState::LoggedIn => {
                format!("Reload {} playlists", service)
            }
            _ => control.label().to_string(),
        }
    }

    async fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{} ", message.bold());
        if let Err(e) = std::io::stdout().flush() {
            debug!("Failed to flush stdout: {}", e);
        }
        match self.input.next_line().await {
            Ok(line) => line.map(|l| l.trim().to_string()),
            Err(e) => {
                self.show_error(&format!("Failed to read input: {}", e));
                None
            }
        }
    }

    fn print_status(&self) {
        for service in Service::ALL {
            let status = match self.login_state(service) {
                LoginState::LoggedIn => "logged in".green(),
                LoginState::LoggedOut => "not logged in".yellow(),
            };
            println!("    {}: {}", service, status);
        }
    }

    fn print_playlists(title: &str, checkboxes: &[Checkbox], checked: &[String]) {
        info!("{} ({})", title, checkboxes.len());
        if checkboxes.is_empty() {
            return;
        }
        let table = Table::new(utils::playlist_table_rows(checkboxes, checked));
        println!("{}", table);
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UiAdapter for TerminalUi {
    fn on_click(&mut self, control: Control, handler: Handler) {
        self.bindings.insert(control, handler);
    }

    async fn next_handler(&mut self) -> Option<Handler> {
        loop {
            let controls = self.enabled_controls();
            if controls.is_empty() {
                return None;
            }

            println!();
            self.print_status();
            for (i, control) in controls.iter().enumerate() {
                println!("  {}) {}", i + 1, self.menu_label(*control));
            }

            let line = self.prompt("Choose an action (q to quit):").await?;
            if line.eq_ignore_ascii_case("q") {
                return None;
            }

            match line.parse::<usize>() {
                Ok(n) if n >= 1 && n <= controls.len() => {
                    if let Some(handler) = self.bindings.get(&controls[n - 1]) {
                        return Some(*handler);
                    }
                }
                _ => self.show_error(&format!("Unknown action: {}", line)),
            }
        }
    }

    fn set_login_state(&mut self, service: Service, state: LoginState) {
        self.login.insert(service, state);
    }

    fn set_migrate_visible(&mut self, visible: bool) {
        self.migrate_visible = visible;
    }

    fn show_welcome(&mut self, message: &str) {
        println!("{}", message.bold());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        println!("[{}] {}", "!".red().bold(), message);
    }

    fn show_success(&mut self, message: &str) {
        success!("{}", message);
    }

    fn render_playlists(&mut self, target: PlaylistTarget, checkboxes: &[Checkbox]) {
        match target {
            PlaylistTarget::Source => {
                self.source = checkboxes.to_vec();
                Self::print_playlists("Spotify playlists", &self.source, &[]);
            }
            PlaylistTarget::Destination => {
                self.destination = checkboxes.to_vec();
                Self::print_playlists("Apple Music playlists", &self.destination, &[]);
            }
        }
    }

    fn show_playlist_selection(&mut self) {
        self.selection_visible = true;
    }

    async fn selected_playlist_ids(&mut self) -> Vec<String> {
        if let Some(ids) = self.preselected.take() {
            return ids;
        }
        if !self.selection_visible || self.source.is_empty() {
            return Vec::new();
        }

        let Some(line) = self
            .prompt("Select playlists to migrate (row numbers or ids, comma separated):")
            .await
        else {
            return Vec::new();
        };

        let selected = utils::parse_selection(&line, &self.source);
        Self::print_playlists("Selected playlists", &self.source, &selected);
        selected
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::{
        backend::Backend,
        controller::{Controller, Session},
        error::AppResult,
        management::MemoryStore,
        types::{MigrateRequest, Playlist},
    };

    struct StaticBackend;

    fn playlist(id: &str, name: &str) -> Playlist {
        Playlist {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[async_trait]
    impl Backend for StaticBackend {
        async fn developer_token(&self) -> AppResult<String> {
            Ok("developer-token".to_string())
        }

        async fn welcome_message(&self) -> AppResult<String> {
            Ok("Hello".to_string())
        }

        async fn playlists(&self, service: Service) -> AppResult<Vec<Playlist>> {
            Ok(match service {
                Service::Spotify => vec![playlist("a", "Road Trip"), playlist("b", "Focus")],
                Service::AppleMusic => vec![playlist("p.1", "Existing")],
            })
        }

        async fn migrate(&self, request: &MigrateRequest) -> AppResult<Value> {
            Ok(json!({"migrated": request.playlists.len()}))
        }
    }

    fn controller_with(entries: &[(&str, &str)], ui: TerminalUi) -> Controller<TerminalUi> {
        let store = MemoryStore::with_entries(entries.iter().copied());
        let session = Session::new(Box::new(store), Arc::new(StaticBackend));
        Controller::new(session, ui)
    }

    fn ids(checkboxes: &[Checkbox]) -> Vec<&str> {
        checkboxes.iter().map(|c| c.value.as_str()).collect()
    }

    #[tokio::test]
    async fn test_menu_without_cached_tokens() {
        let mut controller = controller_with(&[], TerminalUi::new());
        controller.init().await;

        let ui = controller.ui();
        assert_eq!(
            ui.enabled_controls(),
            vec![Control::SpotifyLogin, Control::AppleMusicLogin]
        );
        assert_eq!(ui.menu_label(Control::SpotifyLogin), "Log in to Spotify");
        assert!(ui.source.is_empty());
        assert!(!ui.selection_visible);
    }

    #[tokio::test]
    async fn test_menu_with_cached_tokens_offers_reload_and_migrate() {
        let mut controller = controller_with(
            &[("SpotifyUserToken", "tok1"), ("AppleMusicUserToken", "tok2")],
            TerminalUi::new(),
        );
        controller.init().await;

        let ui = controller.ui();
        assert_eq!(
            ui.enabled_controls(),
            vec![
                Control::SpotifyLogin,
                Control::AppleMusicLogin,
                Control::MigrateButton
            ]
        );
        assert_eq!(ui.menu_label(Control::SpotifyLogin), "Reload Spotify playlists");
        assert_eq!(
            ui.menu_label(Control::AppleMusicLogin),
            "Reload Apple Music playlists"
        );
        assert_eq!(ui.menu_label(Control::MigrateButton), "Migrate selected playlists");
    }

    #[tokio::test]
    async fn test_returning_user_can_migrate() {
        let mut controller = controller_with(
            &[("SpotifyUserToken", "tok1"), ("AppleMusicUserToken", "tok2")],
            TerminalUi::new().with_selection(vec!["b".to_string()]),
        );
        controller.init().await;

        // source playlists are listed and selectable without a login click
        assert!(controller.ui().selection_visible);
        assert_eq!(ids(&controller.ui().source), vec!["a", "b"]);
        assert_eq!(ids(&controller.ui().destination), vec!["p.1"]);

        let result = controller.migrate().await;

        assert_eq!(result, Some(json!({"migrated": 1})));
        assert_eq!(controller.ui().last_error(), None);
    }

    #[tokio::test]
    async fn test_preselection_answers_once() {
        let mut ui = TerminalUi::new().with_selection(vec!["a".to_string()]);

        assert_eq!(ui.selected_playlist_ids().await, vec!["a".to_string()]);
        // nothing rendered, so there is nothing to prompt for
        assert!(ui.selected_playlist_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_render_replaces_previous_list() {
        let mut ui = TerminalUi::new();
        let first = utils::playlist_checkboxes(&[playlist("a", "A"), playlist("b", "B")]);
        let second = utils::playlist_checkboxes(&[playlist("c", "C")]);

        ui.render_playlists(PlaylistTarget::Source, &first);
        ui.render_playlists(PlaylistTarget::Source, &second);
        ui.render_playlists(PlaylistTarget::Destination, &first);

        assert_eq!(ids(&ui.source), vec!["c"]);
        assert_eq!(ids(&ui.destination), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_error_slot_keeps_latest() {
        let mut ui = TerminalUi::new();

        ui.show_error("first");
        ui.show_error("second");

        assert_eq!(ui.last_error(), Some("second"));
    }
}
