#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use playlist_cover::config::{self, Config};
use playlist_cover::events::{EventBus, UiEvent};
use playlist_cover::types::PlaylistSummary;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Canned reply of one mocked route.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Replies of the mocked Spotify accounts service, Web API and cover backend.
#[derive(Clone)]
pub struct Mock {
    pub token: Reply,
    pub profile: Reply,
    pub playlists: Reply,
    pub tracks: Reply,
    pub thumbnail: Reply,
    pub upload: Reply,
}

impl Default for Mock {
    fn default() -> Self {
        Self {
            token: Reply::ok(json!({
                "access_token": "tok1",
                "token_type": "Bearer",
                "scope": config::DEFAULT_SCOPE,
                "expires_in": 3600
            })),
            profile: Reply::ok(json!({
                "display_name": "Tester",
                "images": [{ "url": "https://i.example/avatar.png" }]
            })),
            playlists: Reply::ok(json!([
                {
                    "id": "p1",
                    "name": "Road Trip",
                    "image_url": "https://i.example/p1.png",
                    "track_count": 3
                },
                {
                    "id": "p2",
                    "name": "Focus",
                    "image_url": "",
                    "track_count": 0
                }
            ])),
            tracks: Reply::ok(json!([
                { "image_url": "https://i.example/a.png", "artist": "Artist A", "track_name": "Song A" },
                { "image_url": "https://i.example/b.png", "artist": "Artist B", "track_name": "Song B" },
                { "image_url": "https://i.example/c.png", "artist": "Artist C", "name": "Song C" }
            ])),
            thumbnail: Reply::ok(json!({ "image_url": "https://x/y.png" })),
            upload: Reply::ok(json!({ "message": "Image uploaded successfully!" })),
        }
    }
}

/// Every request the mock server received, as `(route, payload)`.
///
/// The payload is the raw body, or the `Authorization` header for `me`.
#[derive(Clone, Default)]
pub struct Requests {
    seen: Arc<Mutex<Vec<(String, String)>>>,
}

impl Requests {
    fn push(&self, route: String, payload: String) {
        self.seen.lock().expect("requests lock").push((route, payload));
    }

    pub fn count(&self, route: &str) -> usize {
        self.payloads(route).len()
    }

    pub fn total(&self) -> usize {
        self.seen.lock().expect("requests lock").len()
    }

    pub fn payloads(&self, route: &str) -> Vec<String> {
        self.seen
            .lock()
            .expect("requests lock")
            .iter()
            .filter(|(r, _)| r == route)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn json(&self, route: &str) -> Vec<Value> {
        self.payloads(route)
            .iter()
            .map(|p| serde_json::from_str(p).expect("json payload"))
            .collect()
    }
}

#[derive(Clone)]
struct Shared {
    mock: Mock,
    requests: Requests,
}

type Answer = (StatusCode, Json<Value>);

fn answer(shared: &Shared, route: String, payload: String, reply: &Reply) -> Answer {
    shared.requests.push(route, payload);
    (reply.status, Json(reply.body.clone()))
}

async fn token(State(s): State<Shared>, body: String) -> Answer {
    answer(&s, "token".into(), body, &s.mock.token)
}

async fn me(State(s): State<Shared>, headers: HeaderMap) -> Answer {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    answer(&s, "me".into(), auth, &s.mock.profile)
}

async fn playlists(State(s): State<Shared>, Path(user_id): Path<String>) -> Answer {
    answer(&s, format!("playlists/{}", user_id), String::new(), &s.mock.playlists)
}

async fn tracks(State(s): State<Shared>, Path(playlist_id): Path<String>) -> Answer {
    answer(&s, format!("tracks/{}", playlist_id), String::new(), &s.mock.tracks)
}

async fn thumbnail(State(s): State<Shared>, Path(method): Path<String>, body: String) -> Answer {
    answer(&s, format!("thumbnail/{}", method), body, &s.mock.thumbnail)
}

async fn upload(State(s): State<Shared>, body: String) -> Answer {
    answer(&s, "upload".into(), body, &s.mock.upload)
}

/// Serves `mock` on an ephemeral local port.
///
/// Returns the base URL and the request log.
pub async fn start(mock: Mock) -> (String, Requests) {
    let requests = Requests::default();
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(me))
        .route("/playlists/{user_id}", get(playlists))
        .route("/tracks/{playlist_id}", get(tracks))
        .route("/thumbnail/{method}", post(thumbnail))
        .route("/upload-playlist-image", post(upload))
        .with_state(Shared {
            mock,
            requests: requests.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });

    (format!("http://{}", addr), requests)
}

/// Configuration pointing every endpoint at the mock server at `base_url`.
pub fn config(base_url: &str) -> Config {
    Config {
        client_id: "client-123".to_string(),
        redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
        scope: config::DEFAULT_SCOPE.to_string(),
        auth_url: format!("{}/authorize", base_url),
        token_url: format!("{}/api/token", base_url),
        api_url: format!("{}/v1", base_url),
        backend_url: base_url.to_string(),
        server_addr: config::DEFAULT_SERVER_ADDRESS.to_string(),
        thumbnail_methods: vec!["collage".to_string()],
    }
}

/// Collects every event emitted on `bus`.
pub fn record(bus: &EventBus) -> Rc<RefCell<Vec<UiEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

pub fn road_trip() -> PlaylistSummary {
    PlaylistSummary {
        id: "p1".to_string(),
        name: "Road Trip".to_string(),
        image_url: "https://i.example/p1.png".to_string(),
        track_count: 3,
    }
}
