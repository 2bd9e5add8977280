use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_cover::{
    cli::{self, Context, TrackChoice},
    config, error, utils,
};

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
    /// Log in to Spotify
    Login,

    /// Show login state
    Status(StatusOptions),

    /// End the session and forget everything stored in it
    Logout,

    /// List a user's playlists
    Playlists(PlaylistsOptions),

    /// List the tracks of a playlist
    Tracks(TracksOptions),

    /// Select the playlist to create a cover for
    Select(SelectOptions),

    /// Show the selected playlist and the last generated cover
    Show,

    /// Generate a cover from selected tracks
    Generate(GenerateOptions),

    /// Push the generated cover to Spotify
    Push,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct StatusOptions {
    /// URL the browser was redirected to after authorizing
    #[clap(long)]
    pub url: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Spotify user id
    pub user_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    pub playlist_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SelectOptions {
    pub playlist_id: String,

    /// Owner of the playlist; defaults to the last searched user
    #[clap(long = "user")]
    pub user_id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Generation method, one of THUMBNAIL_METHODS
    #[clap(long)]
    pub method: String,

    /// Mood to steer the generation
    #[clap(long)]
    pub mood: Option<String>,

    /// Put the playlist title on the cover
    #[clap(long)]
    pub include_title: bool,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SelectionArgs {
    /// Track numbers as listed by `show`, e.g. 0,2,5
    #[clap(long, value_parser = utils::parse_track_indices)]
    pub tracks: Option<utils::TrackIndices>,

    /// Use every track
    #[clap(long)]
    pub all: bool,

    /// Use three random tracks
    #[clap(long)]
    pub random: bool,
}

impl SelectionArgs {
    fn choice(self) -> TrackChoice {
        match self.tracks {
            Some(utils::TrackIndices(indices)) => TrackChoice::Indices(indices),
            None if self.all => TrackChoice::All,
            None => TrackChoice::Random,
        }
    }
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

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let ctx = match Context::load().await {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot start. Err: {}", e),
    };

    let outcome = match cli.command {
        Command::Generate(opt) => {
            cli::generate(
                &ctx,
                opt.method,
                opt.mood,
                opt.include_title,
                opt.selection.choice(),
            )
            .await
        }
        Command::Push => cli::push(&ctx).await,
        command => {
            run(&ctx, command).await;
            Ok(())
        }
    };

    // Failures were already rendered; only the exit code is left to set.
    if outcome.is_err() {
        std::process::exit(1);
    }
}

async fn run(ctx: &Context, command: Command) {
    match command {
        Command::Login => cli::login(ctx).await,
        Command::Status(opt) => cli::status(ctx, opt.url).await,
        Command::Logout => cli::logout(ctx).await,
        Command::Playlists(opt) => cli::playlists(ctx, opt.user_id).await,
        Command::Tracks(opt) => cli::tracks(ctx, opt.playlist_id).await,
        Command::Select(opt) => cli::select(ctx, opt.playlist_id, opt.user_id).await,
        Command::Show => cli::show(ctx).await,
        Command::Generate(_) | Command::Push | Command::Completions(_) => {}
    }
}
