use plmcli::types::{Playlist, Service};
use plmcli::utils::*;

// Helper function to create a test playlist
fn create_test_playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_playlist_checkboxes() {
    let playlists = vec![
        create_test_playlist("37i9", "Chill"),
        create_test_playlist("p.xyz", "Workout"),
    ];

    let checkboxes = playlist_checkboxes(&playlists);

    assert_eq!(checkboxes.len(), 2);
    assert_eq!(checkboxes[0].element_id, "playlist-37i9");
    assert_eq!(checkboxes[0].value, "37i9");
    assert_eq!(checkboxes[0].label, "Chill");
    assert_eq!(checkboxes[1].element_id, "playlist-p.xyz");
}

#[test]
fn test_playlist_checkboxes_keeps_first_duplicate() {
    let playlists = vec![
        create_test_playlist("a", "First"),
        create_test_playlist("b", "Other"),
        create_test_playlist("a", "Second"),
    ];

    let checkboxes = playlist_checkboxes(&playlists);

    let labels: Vec<&str> = checkboxes.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["First", "Other"]);
}

#[test]
fn test_playlist_checkboxes_empty() {
    assert!(playlist_checkboxes(&[]).is_empty());
}

#[test]
fn test_remove_duplicate_playlists() {
    let mut playlists = vec![
        create_test_playlist("a", "A"),
        create_test_playlist("a", "A again"),
        create_test_playlist("b", "B"),
    ];

    remove_duplicate_playlists(&mut playlists);

    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].name, "A");
    assert_eq!(playlists[1].id, "b");
}

#[test]
fn test_parse_selection() {
    let checkboxes = playlist_checkboxes(&[
        create_test_playlist("a", "A"),
        create_test_playlist("b", "B"),
        create_test_playlist("c", "C"),
    ]);

    // row numbers, ids, duplicates and garbage mixed
    let selected = parse_selection("3, a 1,,zzz 9", &checkboxes);
    assert_eq!(selected, vec!["c".to_string(), "a".to_string()]);

    assert!(parse_selection("", &checkboxes).is_empty());
    assert!(parse_selection("0", &checkboxes).is_empty());
}

#[test]
fn test_playlist_table_rows_mark_checked() {
    let checkboxes = playlist_checkboxes(&[
        create_test_playlist("a", "A"),
        create_test_playlist("b", "B"),
    ]);

    let rows = playlist_table_rows(&checkboxes, &["b".to_string()]);

    assert_eq!(rows[0].index, 1);
    assert_eq!(rows[0].checked, "");
    assert_eq!(rows[1].checked, "x");
}

#[test]
fn test_now_millis_is_recent() {
    // 2023-11-14
    assert!(now_millis() > 1_700_000_000_000);
}

#[test]
fn test_service_keys() {
    assert_eq!(Service::Spotify.token_key(), "SpotifyUserToken");
    assert_eq!(Service::AppleMusic.token_key(), "AppleMusicUserToken");
    assert_eq!(Service::Spotify.playlists_path(), "/api/spotify-playlists");
    assert_eq!(Service::AppleMusic.playlists_path(), "/api/applemusic-playlists");
    assert_eq!(Service::AppleMusic.to_string(), "Apple Music");
}
