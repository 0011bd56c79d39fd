use tabled::Table;

use crate::{
    cli::build_controller,
    info,
    types::{Service, StatusTableRow},
    ui::TerminalUi,
    warning,
};

pub async fn status() {
    let mut controller = build_controller(TerminalUi::new(), None);

    let mut rows: Vec<StatusTableRow> = Vec::new();
    for service in Service::ALL {
        let status = match controller.session_mut().cached_token(service).await {
            Ok(Some(_)) => "logged in".to_string(),
            Ok(None) => "not logged in".to_string(),
            Err(e) => {
                warning!("Failed to read cached {} token: {}", service, e);
                "unknown".to_string()
            }
        };
        rows.push(StatusTableRow {
            service: service.to_string(),
            status,
        });
    }
    println!("{}", Table::new(rows));

    let (session, ui) = controller.parts_mut();
    if session.refresh_migrate_button_visibility(ui).await {
        info!("Ready to migrate playlists.");
    } else {
        info!("Log in to both services to migrate playlists.");
    }
}
