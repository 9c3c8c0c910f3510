pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod store;
pub mod trivia;
pub mod utils;
pub mod views;

use axum::extract::FromRef;
use axum::http::{header, HeaderValue};
use axum::{middleware, Router};
use axum_extra::extract::cookie::Key;

use store::Sessions;
use trivia::TriviaClient;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Sessions,
    pub trivia: TriviaClient,
    pub key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::menu::routes())
        .merge(handlers::game::routes())
        .layer(middleware::from_fn(no_store))
        .nest("/static", statics::routes())
        .with_state(state)
}

/// Dynamic pages must never come out of the browser cache: a cached
/// question page would let the back button revisit an already-scored
/// answer. Static assets are nested outside this layer and stay cacheable.
async fn no_store(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
