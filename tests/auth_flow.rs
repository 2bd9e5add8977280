mod common;

use axum::http::StatusCode;
use playlist_cover::events::{EventBus, UiEvent};
use playlist_cover::management::{
    AuthMachine, AuthState, MemoryStorage, SessionStore, UNAUTHORIZED_NOTICE,
};
use playlist_cover::spotify::profile::DEFAULT_AVATAR_URL;
use playlist_cover::utils;
use reqwest::Url;
use serde_json::json;

use common::{Mock, Reply};

fn redirect(query: &str) -> Url {
    Url::parse(&format!("http://127.0.0.1:8080/callback?{}", query)).expect("redirect url")
}

#[tokio::test]
async fn first_visit_without_code_is_logged_out() {
    let (base, requests) = common::start(Mock::default()).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(None).await;

    assert_eq!(state, AuthState::LoggedOut);
    assert_eq!(seen.borrow().as_slice(), &[UiEvent::LoginVisible]);
    assert_eq!(requests.total(), 0);
    assert!(auth.profile().is_none());
}

#[tokio::test]
async fn redirect_with_code_exchanges_once_and_logs_in() {
    let (base, requests) = common::start(Mock::default()).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    session.set_code_verifier("v1").await.unwrap();
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(Some(&redirect("code=abc123"))).await;

    assert_eq!(state, AuthState::LoggedIn);
    assert_eq!(session.access_token().as_deref(), Some("tok1"));
    assert_eq!(session.code_verifier(), None);
    assert_eq!(requests.count("token"), 1);

    let form = &requests.payloads("token")[0];
    assert!(form.contains("client_id=client-123"));
    assert!(form.contains("grant_type=authorization_code"));
    assert!(form.contains("code=abc123"));
    assert!(form.contains("code_verifier=v1"));

    assert_eq!(requests.payloads("me"), vec!["Bearer tok1".to_string()]);
    assert!(seen.borrow().contains(&UiEvent::ProfileLoaded {
        display_name: Some("Tester".to_string()),
        avatar_url: "https://i.example/avatar.png".to_string(),
    }));
    assert_eq!(
        auth.profile().and_then(|p| p.display_name).as_deref(),
        Some("Tester")
    );
}

#[tokio::test]
async fn stored_token_skips_the_exchange() {
    let (base, requests) = common::start(Mock::default()).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    session.set_access_token("tok0").await.unwrap();
    session.set_code_verifier("v1").await.unwrap();
    let events = EventBus::new();
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(Some(&redirect("code=abc123"))).await;

    assert_eq!(state, AuthState::LoggedIn);
    assert_eq!(requests.count("token"), 0);
    assert_eq!(session.access_token().as_deref(), Some("tok0"));
    assert_eq!(requests.payloads("me"), vec!["Bearer tok0".to_string()]);
}

#[tokio::test]
async fn profile_without_images_falls_back_to_default_avatar() {
    let mock = Mock {
        profile: Reply::ok(json!({ "display_name": null, "images": [] })),
        ..Mock::default()
    };
    let (base, _requests) = common::start(mock).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    session.set_access_token("tok0").await.unwrap();
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    auth.on_page_load(None).await;

    assert!(seen.borrow().contains(&UiEvent::ProfileLoaded {
        display_name: None,
        avatar_url: DEFAULT_AVATAR_URL.to_string(),
    }));
}

#[tokio::test]
async fn expired_token_demotes_to_logged_out() {
    let mock = Mock {
        profile: Reply::status(
            StatusCode::UNAUTHORIZED,
            json!({ "error": { "status": 401, "message": "The access token expired" } }),
        ),
        ..Mock::default()
    };
    let (base, requests) = common::start(mock).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    session.set_access_token("stale").await.unwrap();
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(None).await;

    assert_eq!(state, AuthState::LoggedOut);
    assert_eq!(session.access_token(), None);
    assert_eq!(requests.count("me"), 1);
    assert_eq!(seen.borrow().last(), Some(&UiEvent::LoginVisible));
}

#[tokio::test]
async fn rejected_exchange_is_unauthorized() {
    let mock = Mock {
        token: Reply::status(
            StatusCode::BAD_REQUEST,
            json!({ "error": "invalid_grant", "error_description": "Invalid authorization code" }),
        ),
        ..Mock::default()
    };
    let (base, requests) = common::start(mock).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    session.set_code_verifier("v1").await.unwrap();
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(Some(&redirect("code=abc123"))).await;

    assert_eq!(state, AuthState::Unauthorized);
    assert_eq!(session.access_token(), None);
    assert_eq!(session.code_verifier(), None);
    assert_eq!(requests.count("token"), 1);
    assert_eq!(requests.count("me"), 0);
    assert!(
        seen.borrow()
            .contains(&UiEvent::Notice(UNAUTHORIZED_NOTICE.to_string()))
    );
    assert_eq!(seen.borrow().last(), Some(&UiEvent::LoginVisible));
}

#[tokio::test]
async fn token_response_without_access_token_is_unauthorized() {
    let mock = Mock {
        token: Reply::ok(json!({ "token_type": "Bearer" })),
        ..Mock::default()
    };
    let (base, _requests) = common::start(mock).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    session.set_code_verifier("v1").await.unwrap();
    let events = EventBus::new();
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(Some(&redirect("code=abc123"))).await;

    assert_eq!(state, AuthState::Unauthorized);
    assert_eq!(session.access_token(), None);
}

#[tokio::test]
async fn code_without_stored_verifier_makes_no_request() {
    let (base, requests) = common::start(Mock::default()).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    let events = EventBus::new();
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth.on_page_load(Some(&redirect("code=abc123"))).await;

    assert_eq!(state, AuthState::Unauthorized);
    assert_eq!(requests.total(), 0);
}

#[tokio::test]
async fn denied_authorization_shows_notice() {
    let (base, requests) = common::start(Mock::default()).await;
    let config = common::config(&base);
    let session = SessionStore::new(MemoryStorage::default());
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    let state = auth
        .on_page_load(Some(&redirect("error=access_denied")))
        .await;

    assert_eq!(state, AuthState::LoggedOut);
    assert_eq!(requests.total(), 0);
    assert!(seen.borrow().iter().any(
        |e| matches!(e, UiEvent::Notice(text) if text.contains("access_denied"))
    ));
}

#[tokio::test]
async fn begin_login_stores_verifier_and_builds_url() {
    let config = common::config("http://127.0.0.1:9");
    let session = SessionStore::new(MemoryStorage::default());
    let events = EventBus::new();
    let auth = AuthMachine::new(&config, &session, &events);

    let url = auth.begin_login().await.unwrap();

    assert_eq!(auth.state(), AuthState::PendingRedirect);
    let verifier = session.code_verifier().expect("verifier stored");
    assert_eq!(verifier.len(), utils::CODE_VERIFIER_LENGTH);
    assert_eq!(
        utils::query_param(&url, "code_challenge"),
        Some(utils::generate_code_challenge(&verifier))
    );
    assert_eq!(
        utils::query_param(&url, "redirect_uri").as_deref(),
        Some("http://127.0.0.1:8080/callback")
    );
    assert!(url.as_str().starts_with("http://127.0.0.1:9/authorize?"));
}

#[tokio::test]
async fn begin_login_replaces_previous_verifier() {
    let config = common::config("http://127.0.0.1:9");
    let session = SessionStore::new(MemoryStorage::default());
    session.set_code_verifier("old").await.unwrap();
    let events = EventBus::new();
    let auth = AuthMachine::new(&config, &session, &events);

    auth.begin_login().await.unwrap();

    assert_ne!(session.code_verifier().as_deref(), Some("old"));
}

#[tokio::test]
async fn end_session_forgets_everything() {
    let config = common::config("http://127.0.0.1:9");
    let session = SessionStore::new(MemoryStorage::default());
    session.set_access_token("tok1").await.unwrap();
    session.set_generated_image("https://x/y.png").await.unwrap();
    session.set_user_id_searched("someone").await.unwrap();
    let events = EventBus::new();
    let seen = common::record(&events);
    let auth = AuthMachine::new(&config, &session, &events);

    auth.end_session().await.unwrap();

    assert_eq!(auth.state(), AuthState::LoggedOut);
    assert_eq!(auth.access_token(), None);
    assert_eq!(session.generated_image(), None);
    assert_eq!(session.user_id_searched(), None);
    assert_eq!(seen.borrow().as_slice(), &[UiEvent::LoginVisible]);
}
