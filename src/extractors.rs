use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::SignedCookieJar;

use crate::models::GameSession;
use crate::rejections::{AppError, ResultExt};
use crate::{names, AppState};

/// Guard extractor for every page behind the entry page.
///
/// Verifies the signed visitor cookie, loads the stored session, and
/// requires an API token to be present. Handlers add their own
/// prerequisite checks on top (mode chosen, questions fetched, ...).
/// This orders navigation, it is not a security boundary.
pub struct Game {
    pub sid: String,
    pub session: GameSession,
}

impl FromRequestParts<AppState> for Game {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());

        let sid = jar
            .get(names::SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or(AppError::SessionNotInitialized)?;

        let session = state
            .sessions
            .load(&sid)
            .reject("could not load session")?
            .ok_or(AppError::SessionNotInitialized)?;

        if session.token.is_none() {
            return Err(AppError::SessionNotInitialized);
        }

        Ok(Game { sid, session })
    }
}
