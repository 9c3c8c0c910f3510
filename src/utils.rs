use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use color_eyre::Result;

use crate::names;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Success,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Success => "success",
        }
    }

    fn parse(value: &str) -> Option<Level> {
        match value {
            "error" => Some(Level::Error),
            "success" => Some(Level::Success),
            _ => None,
        }
    }
}

/// A one-shot user notice, carried between requests in a short-lived cookie
/// and rendered by the next page.
#[derive(Clone, Debug)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Success,
            message: message.into(),
        }
    }
}

pub fn flash_cookie(level: Level, message: &str) -> Result<HeaderValue> {
    let cookie = format!(
        "{}={}:{}; Max-Age=60; Path=/; SameSite=Lax",
        names::FLASH_COOKIE_NAME,
        level.as_str(),
        urlencoding::encode(message),
    );
    Ok(cookie.parse()?)
}

fn parse_notice(value: &str) -> Option<Notice> {
    let (level, message) = value.split_once(':')?;
    Some(Notice {
        level: Level::parse(level)?,
        message: urlencoding::decode(message).ok()?.into_owned(),
    })
}

/// Read the pending notice, if any, and return the jar with it cleared.
pub fn consume_flash(jar: CookieJar) -> (Option<Notice>, CookieJar) {
    match jar.get(names::FLASH_COOKIE_NAME) {
        Some(cookie) => {
            let notice = parse_notice(cookie.value());
            let removal = Cookie::build((names::FLASH_COOKIE_NAME, "")).path("/");
            (notice, jar.remove(removal))
        }
        None => (None, jar),
    }
}

/// Redirect with a notice attached for the destination page.
pub fn redirect_flash(target: &'static str, level: Level, message: &str) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(cookie) = flash_cookie(level, message) {
        headers.insert(SET_COOKIE, cookie);
    }
    (headers, Redirect::to(target)).into_response()
}
