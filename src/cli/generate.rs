use tabled::Table;

use super::{Context, playlist::track_rows};
use crate::{
    error::{Error, ValidationError},
    info,
    types::GenerationMethod,
    warning,
};

/// How the tracks feeding the generation are picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackChoice {
    Indices(Vec<usize>),
    All,
    Random,
}

pub async fn generate(
    ctx: &Context,
    method: String,
    mood: Option<String>,
    include_title: bool,
    choice: TrackChoice,
) -> Result<(), Error> {
    let workflow = ctx.workflow();
    if workflow.restore().is_none() {
        return Err(no_playlist());
    }

    workflow.load_tracks().await?;

    match choice {
        TrackChoice::Indices(indices) => workflow.select_tracks(&indices)?,
        TrackChoice::All => workflow.select_all(),
        TrackChoice::Random => workflow.select_random(),
    }

    let offered = workflow
        .methods()
        .iter()
        .map(GenerationMethod::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    info!("Generating with method {} (offered: {})", method, offered);
    println!(
        "{}",
        Table::new(track_rows(&workflow.tracks(), &workflow.selected()))
    );

    let method = GenerationMethod::new(method);
    workflow
        .generate(&method, mood.as_deref().unwrap_or_default(), include_title)
        .await
        .map(|_| ())
        .inspect_err(report)
}

pub async fn push(ctx: &Context) -> Result<(), Error> {
    let workflow = ctx.workflow();
    if workflow.restore().is_none() {
        return Err(no_playlist());
    }

    workflow.push().await.map(|_| ()).inspect_err(report)
}

fn no_playlist() -> Error {
    warning!("No playlist selected. Run `playlist-cover select <id>` first.");
    ValidationError::NoPlaylistSelected.into()
}

/// Prints failures the renderer has no event for.
fn report(err: &Error) {
    if let Error::Busy(_) | Error::InvalidUrl(_) = err {
        warning!("{}", err);
    }
}
