use std::collections::HashSet;

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

use crate::types::{Checkbox, Playlist, PlaylistTableRow};

/// Random nonce tying an authorization callback to the request that started it.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn remove_duplicate_playlists(playlists: &mut Vec<Playlist>) {
    let mut seen_ids = HashSet::new();
    playlists.retain(|playlist| seen_ids.insert(playlist.id.clone()));
}

/// One checkbox per playlist, keyed by playlist id. Later duplicates of an
/// id are dropped so element ids stay unique.
pub fn playlist_checkboxes(playlists: &[Playlist]) -> Vec<Checkbox> {
    let mut unique = playlists.to_vec();
    remove_duplicate_playlists(&mut unique);

    unique
        .into_iter()
        .map(|p| Checkbox {
            element_id: format!("playlist-{}", p.id),
            value: p.id,
            label: p.name,
        })
        .collect()
}

pub fn playlist_table_rows(checkboxes: &[Checkbox], checked: &[String]) -> Vec<PlaylistTableRow> {
    checkboxes
        .iter()
        .enumerate()
        .map(|(i, c)| PlaylistTableRow {
            index: i + 1,
            checked: if checked.contains(&c.value) {
                "x".to_string()
            } else {
                String::new()
            },
            name: c.label.clone(),
            id: c.value.clone(),
        })
        .collect()
}

/// Turns user input into the ids of the chosen checkboxes.
///
/// Accepts comma or whitespace separated entries, each either a 1-based row
/// number or a playlist id. Unknown entries are ignored, and each id is
/// returned once in the order first chosen.
pub fn parse_selection(input: &str, checkboxes: &[Checkbox]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();

    for entry in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|e| !e.is_empty())
    {
        let id = match entry.parse::<usize>() {
            Ok(n) if n >= 1 && n <= checkboxes.len() => Some(checkboxes[n - 1].value.clone()),
            _ => checkboxes
                .iter()
                .find(|c| c.value == entry)
                .map(|c| c.value.clone()),
        };

        if let Some(id) = id {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
    }

    selected
}
