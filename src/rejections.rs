use axum::http::{header::SET_COOKIE, HeaderMap};
use axum::response::{IntoResponse, Redirect, Response};

use crate::trivia::ResponseCode;
use crate::utils::{self, Level};
use crate::names;

/// Everything that can go wrong while handling a page.
///
/// None of these are fatal: each renders as a redirect to the entry page
/// with a one-shot notice, so the player always lands somewhere playable.
#[derive(Debug)]
pub enum AppError {
    /// A required session field is missing, usually from a deep link.
    SessionNotInitialized,
    /// The trivia API could not be reached or returned garbage; the
    /// payload is the user-facing context line.
    Transport(&'static str),
    /// The questions endpoint answered with a non-zero response code.
    Domain(ResponseCode),
    /// Rejected form input; the payload is the user-facing message.
    Input(&'static str),
    /// Session store or serialization fault, already logged at the source.
    Internal(&'static str),
}

impl AppError {
    fn notice(&self) -> &'static str {
        match self {
            AppError::SessionNotInitialized => "Session not initialized. Please try again.",
            AppError::Transport(message) | AppError::Input(message) => message,
            AppError::Domain(code) => domain_notice(*code),
            AppError::Internal(_) => "There was an unexpected error. Please try again.",
        }
    }
}

fn domain_notice(code: ResponseCode) -> &'static str {
    match code {
        ResponseCode::Success => "There was an unexpected error. Please try again.",
        ResponseCode::NotEnoughQuestions => {
            "Could not return results. The API doesn't have enough questions for your query."
        }
        ResponseCode::InvalidParameters => "Arguments passed in aren't valid.",
        ResponseCode::TokenNotFound => "Session not initialized. Please try again.",
        ResponseCode::TokenExhausted => {
            "The session token has returned all possible questions for this query. \
             The token has been reset."
        }
        ResponseCode::RateLimited => {
            "Too many requests have occurred. Each IP can only access the API once every 5 seconds."
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Ok(cookie) = utils::flash_cookie(Level::Error, self.notice()) {
            headers.insert(SET_COOKIE, cookie);
        }
        (headers, Redirect::to(names::INDEX_URL)).into_response()
    }
}

/// Shorthand for turning infrastructure failures into `AppError`s while
/// logging the underlying cause.
pub trait ResultExt<T> {
    fn reject(self, context: &'static str) -> Result<T, AppError>;
    fn reject_input(self, context: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            AppError::Internal(context)
        })
    }

    fn reject_input(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{context}: {e}");
            AppError::Input(context)
        })
    }
}
