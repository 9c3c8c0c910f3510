use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::{ConfigForm, ModeForm};
use crate::extractors::Game;
use crate::rejections::{AppError, ResultExt};
use crate::services::token;
use crate::trivia::ResponseCode;
use crate::utils::Notice;
use crate::views::game as game_views;
use crate::{names, views, AppState};

pub(crate) async fn mode_page(_game: Game) -> maud::Markup {
    views::page("Game Mode", None, game_views::mode_select())
}

pub(crate) async fn set_mode(
    State(state): State<AppState>,
    mut game: Game,
    Form(form): Form<ModeForm>,
) -> Result<Redirect, AppError> {
    game.session.game_mode = Some(form.game_mode.into());
    state
        .sessions
        .save(&game.sid, &game.session)
        .reject("could not save session")?;

    Ok(Redirect::to(names::GAME_CONFIG_URL))
}

fn sorted_category_names(game: &Game) -> Vec<String> {
    let mut names: Vec<String> = game
        .session
        .categories
        .iter()
        .map(|c| c.name.clone())
        .collect();
    names.sort();
    names
}

pub(crate) async fn config_page(
    State(state): State<AppState>,
    mut game: Game,
) -> Result<maud::Markup, AppError> {
    if game.session.game_mode.is_none() {
        return Err(AppError::SessionNotInitialized);
    }

    let categories = state.trivia.categories().await.map_err(|e| {
        tracing::error!("could not fetch categories: {e}");
        AppError::Transport("There was an error fetching the categories. Please try again.")
    })?;
    game.session.categories = categories;

    state
        .sessions
        .save(&game.sid, &game.session)
        .reject("could not save session")?;

    Ok(views::page(
        "Game Setup",
        None,
        game_views::config(&sorted_category_names(&game)),
    ))
}

pub(crate) async fn set_config(
    State(state): State<AppState>,
    mut game: Game,
    Form(form): Form<ConfigForm>,
) -> Result<Response, AppError> {
    if game.session.game_mode.is_none() {
        return Err(AppError::SessionNotInitialized);
    }

    // A category name that no longer matches the cached list means the
    // list went stale under the player; make them pick again.
    let known = form.category == names::RANDOM_CATEGORY
        || game.session.categories.iter().any(|c| c.name == form.category);
    if !known {
        tracing::warn!("submitted category not in cached list: {}", form.category);
        let notice = Notice::error("That category is no longer available. Please pick another.");
        let page = views::page(
            "Game Setup",
            Some(&notice),
            game_views::config(&sorted_category_names(&game)),
        );
        return Ok(page.into_response());
    }

    game.session.chosen_category = Some(form.category);
    game.session.chosen_difficulty = form.difficulty.into();

    state
        .sessions
        .save(&game.sid, &game.session)
        .reject("could not save session")?;

    Ok(Redirect::to(names::COUNTDOWN_URL).into_response())
}

/// Shows the short countdown that spaces successive API calls, and
/// re-seeds the round state so "Play again" starts from zero.
pub(crate) async fn countdown_page(
    State(state): State<AppState>,
    mut game: Game,
) -> Result<maud::Markup, AppError> {
    if game.session.chosen_category.is_none() {
        return Err(AppError::SessionNotInitialized);
    }

    game.session.start_round();
    state
        .sessions
        .save(&game.sid, &game.session)
        .reject("could not save session")?;

    Ok(views::page("Get Ready", None, game_views::countdown()))
}

/// The actual question fetch, dispatched on the API's response code.
pub(crate) async fn fetch_questions(
    State(state): State<AppState>,
    mut game: Game,
) -> Result<Response, AppError> {
    let session = &mut game.session;
    let chosen_category = session
        .chosen_category
        .clone()
        .ok_or(AppError::SessionNotInitialized)?;
    let token_value = session
        .token
        .clone()
        .ok_or(AppError::SessionNotInitialized)?;

    let category_id = if chosen_category == names::RANDOM_CATEGORY {
        None
    } else {
        let id = session
            .categories
            .iter()
            .find(|c| c.name == chosen_category)
            .map(|c| c.id)
            .ok_or(AppError::Input(
                "That category is no longer available. Please pick another.",
            ))?;
        Some(id)
    };

    let (code, questions) = state
        .trivia
        .fetch_questions(
            session.questions_number,
            category_id,
            session.chosen_difficulty,
            &token_value,
        )
        .await
        .map_err(|e| {
            tracing::error!("could not fetch questions: {e}");
            AppError::Transport("There was an error fetching questions. Please try again.")
        })?;

    match code {
        ResponseCode::Success => {
            tracing::info!(
                "fetched {} questions for {}",
                questions.len(),
                chosen_category
            );
            session.install_questions(questions);
            state
                .sessions
                .save(&game.sid, session)
                .reject("could not save session")?;
            Ok(Redirect::to(names::GAME_SESSION_URL).into_response())
        }
        ResponseCode::TokenExhausted => {
            // The fetch that hit the exhaustion signal is abandoned; the
            // player retries explicitly from the menu.
            token::rotate_token(&state.trivia, session)
                .await
                .map_err(|e| {
                    tracing::error!("could not reset trivia token: {e}");
                    AppError::Transport(
                        "There was an error resetting the session token. Please try again.",
                    )
                })?;
            state
                .sessions
                .save(&game.sid, session)
                .reject("could not save session")?;
            Err(AppError::Domain(ResponseCode::TokenExhausted))
        }
        other => {
            tracing::warn!("questions fetch returned response code {other:?}");
            Err(AppError::Domain(other))
        }
    }
}
