mod config;
mod play;

use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::models::{Difficulty, GameMode};
use crate::{names, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            names::GAME_MODE_URL,
            get(config::mode_page).post(config::set_mode),
        )
        .route(
            names::GAME_CONFIG_URL,
            get(config::config_page).post(config::set_config),
        )
        .route(
            names::COUNTDOWN_URL,
            get(config::countdown_page).post(config::fetch_questions),
        )
        .route(
            names::GAME_SESSION_URL,
            get(play::game_session).post(play::submit),
        )
        .route(names::ANSWER_URL, get(play::answer_page))
}

// Per-page user actions, decoded once at the form boundary.

#[derive(Deserialize)]
pub(crate) enum ModeChoice {
    #[serde(rename = "1 player")]
    OnePlayer,
    #[serde(rename = "2 players")]
    TwoPlayers,
}

impl From<ModeChoice> for GameMode {
    fn from(choice: ModeChoice) -> GameMode {
        match choice {
            ModeChoice::OnePlayer => GameMode::OnePlayer,
            ModeChoice::TwoPlayers => GameMode::TwoPlayers,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ModeForm {
    pub game_mode: ModeChoice,
}

#[derive(Deserialize)]
pub(crate) enum DifficultyChoice {
    #[serde(rename = "")]
    Any,
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "hard")]
    Hard,
}

impl From<DifficultyChoice> for Option<Difficulty> {
    fn from(choice: DifficultyChoice) -> Option<Difficulty> {
        match choice {
            DifficultyChoice::Any => None,
            DifficultyChoice::Easy => Some(Difficulty::Easy),
            DifficultyChoice::Medium => Some(Difficulty::Medium),
            DifficultyChoice::Hard => Some(Difficulty::Hard),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ConfigForm {
    pub category: String,
    pub difficulty: DifficultyChoice,
}

#[derive(Deserialize)]
pub(crate) enum EndAction {
    #[serde(rename = "Play again")]
    PlayAgain,
    #[serde(rename = "Main Menu")]
    MainMenu,
}

/// The game-session page posts either an end-screen action or an answer.
#[derive(Deserialize)]
pub(crate) struct PlayForm {
    #[serde(default)]
    pub next: Option<EndAction>,
    #[serde(default)]
    pub option: Option<String>,
}
