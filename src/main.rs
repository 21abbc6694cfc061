use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodlist::{cli, config, error};

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
    /// Run the HTTP backend
    Serve(ServeOptions),

    /// Authorize with Spotify API
    Auth,

    /// Generate a playlist from a prompt
    Generate(GenerateOptions),

    /// Recommend songs based on listening history
    Recommend(TokenOptions),

    /// Show listening statistics
    Stats(TokenOptions),

    /// Handle liked songs
    Liked(LikedOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the login page in the browser once the server is up
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    /// Spotify access token; defaults to the cached login
    #[clap(long)]
    pub token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// What the playlist should sound like
    #[clap(long)]
    pub prompt: String,

    /// Playlist name; defaults to the prompt
    #[clap(long)]
    pub name: Option<String>,

    /// Playlist description
    #[clap(long)]
    pub description: Option<String>,

    /// Spotify access token; defaults to the cached login
    #[clap(long)]
    pub token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle liked songs",
    args_conflicts_with_subcommands = true
)]
pub struct LikedOptions {
    #[command(subcommand)]
    pub command: Option<LikedSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LikedSubcommand {
    /// Remove a liked song by its id
    Unlike(UnlikeOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct UnlikeOpts {
    pub id: String,
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
        Command::Serve(opt) => cli::serve(opt.open).await,
        Command::Auth => cli::auth().await,
        Command::Generate(opt) => {
            cli::generate(opt.prompt, opt.name, opt.description, opt.token).await
        }
        Command::Recommend(opt) => cli::recommend(opt.token).await,
        Command::Stats(opt) => cli::stats(opt.token).await,
        Command::Liked(opt) => match opt.command {
            Some(LikedSubcommand::Unlike(u)) => cli::liked(Some(u.id)).await,
            None => cli::liked(None).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
