mod common;

use playlist_cover::backend::BackendClient;
use playlist_cover::cli::{self, Context, TrackChoice};
use playlist_cover::error::{Error, ValidationError};
use playlist_cover::events::EventBus;
use playlist_cover::management::{FileStorage, SessionStore};
use tempfile::tempdir;

use common::Mock;

async fn context(base: &str, session_path: std::path::PathBuf) -> Context {
    Context {
        config: common::config(base),
        session: SessionStore::new(FileStorage::open(session_path).await.unwrap()),
        events: EventBus::new(),
        backend: BackendClient::new(base),
    }
}

#[tokio::test]
async fn generate_without_selected_playlist_fails() {
    let dir = tempdir().expect("tempdir");
    let (base, requests) = common::start(Mock::default()).await;
    let ctx = context(&base, dir.path().join("session.json")).await;

    let result = cli::generate(&ctx, "collage".into(), None, false, TrackChoice::All).await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::NoPlaylistSelected))
    ));
    assert_eq!(requests.total(), 0);
}

#[tokio::test]
async fn generate_reports_success_and_failure() {
    let dir = tempdir().expect("tempdir");
    let (base, requests) = common::start(Mock::default()).await;
    let ctx = context(&base, dir.path().join("session.json")).await;
    ctx.workflow()
        .select_playlist(&common::road_trip())
        .await
        .unwrap();

    let generated = cli::generate(&ctx, "collage".into(), None, false, TrackChoice::All).await;
    assert!(generated.is_ok());
    assert_eq!(ctx.session.generated_image().as_deref(), Some("https://x/y.png"));

    let unknown = cli::generate(&ctx, "stickers".into(), None, false, TrackChoice::Random).await;
    assert!(matches!(
        unknown,
        Err(Error::Validation(ValidationError::UnknownMethod(_)))
    ));

    let out_of_range =
        cli::generate(&ctx, "collage".into(), None, false, TrackChoice::Indices(vec![9])).await;
    assert!(out_of_range.is_err());
    assert_eq!(requests.count("thumbnail/collage"), 1);
}

#[tokio::test]
async fn push_without_token_fails() {
    let dir = tempdir().expect("tempdir");
    let (base, requests) = common::start(Mock::default()).await;
    let ctx = context(&base, dir.path().join("session.json")).await;
    ctx.workflow()
        .select_playlist(&common::road_trip())
        .await
        .unwrap();
    ctx.session.set_generated_image("https://x/y.png").await.unwrap();

    assert!(cli::push(&ctx).await.is_err());
    assert_eq!(requests.count("upload"), 0);

    ctx.session.set_access_token("tok1").await.unwrap();
    assert!(cli::push(&ctx).await.is_ok());
    assert_eq!(requests.count("upload"), 1);
}
