use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plmcli::{cli, config, error, types::Service};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the welcome message
    Welcome,

    /// Show login state of both services
    Status,

    /// Log in to a streaming service
    Login(LoginOptions),

    /// Forget the cached token of a streaming service
    Logout(ServiceOption),

    /// List playlists of a streaming service
    Playlists(ServiceOption),

    #[clap(about = "Migrate Spotify playlists to Apple Music")]
    Migrate(MigrateOptions),

    /// Walk through login, selection and migration step by step
    Interactive,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    #[clap(value_enum)]
    service: Service,

    /// User token obtained elsewhere; skips interactive authorization
    #[clap(long)]
    token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServiceOption {
    #[clap(value_enum)]
    service: Service,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateOptions {
    /// Spotify playlist id to migrate; can be repeated. Prompts when omitted
    #[clap(long = "playlist", num_args = 1)]
    playlists: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Welcome => cli::welcome().await,
        Command::Status => cli::status().await,
        Command::Login(opt) => cli::login(opt.service, opt.token).await,
        Command::Logout(opt) => cli::logout(opt.service).await,
        Command::Playlists(opt) => cli::playlists(opt.service).await,
        Command::Migrate(opt) => cli::migrate(opt.playlists).await,
        Command::Interactive => cli::interactive().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
