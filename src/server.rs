use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api};

/// Query string of the redirect the authorization server sent the browser
/// back with, once it arrived.
pub type CallbackState = Arc<Mutex<Option<String>>>;

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

pub async fn start_api_server(addr: &str, state: CallbackState) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
