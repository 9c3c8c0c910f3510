use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::{CookieJar, SignedCookieJar};
use serde::Deserialize;
use ulid::Ulid;

use crate::extractors::Game;
use crate::rejections::{AppError, ResultExt};
use crate::services::token;
use crate::utils::{self, Level, Notice};
use crate::{names, views, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::INDEX_URL, get(index).post(menu_dispatch))
        .route(names::INSTRUCTIONS_URL, get(instructions))
        .route(names::OPTIONS_URL, get(options_page).post(options_post))
}

/// Entry page. The only page that works without an initialized session:
/// it mints the visitor id and requests the API token on first visit.
async fn index(
    State(state): State<AppState>,
    signed: SignedCookieJar,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (mut notice, jar) = utils::consume_flash(jar);

    let (sid, signed) = match signed.get(names::SESSION_COOKIE_NAME) {
        Some(cookie) => (cookie.value().to_string(), signed),
        None => {
            let sid = Ulid::new().to_string();
            let cookie = Cookie::build((names::SESSION_COOKIE_NAME, sid.clone()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict);
            (sid, signed.add(cookie))
        }
    };

    let mut session = state
        .sessions
        .load(&sid)
        .reject("could not load session")?
        .unwrap_or_default();

    if session.token.is_none() {
        if let Err(e) = token::ensure_token(&state.trivia, &mut session).await {
            tracing::error!("could not request trivia token: {e}");
            notice = Some(Notice::error(
                "There was an error retrieving a token. Please try again.",
            ));
        }
    }

    state
        .sessions
        .save(&sid, &session)
        .reject("could not save session")?;

    let page = views::page("Main Menu", notice.as_ref(), views::menu::index());
    Ok((signed, jar, page).into_response())
}

#[derive(Deserialize)]
enum MenuAction {
    #[serde(rename = "Play")]
    Play,
    #[serde(rename = "Instructions")]
    Instructions,
    #[serde(rename = "Options")]
    Options,
    #[serde(rename = "Main menu")]
    MainMenu,
}

#[derive(Deserialize)]
struct MenuForm {
    menu: MenuAction,
}

async fn menu_dispatch(Form(form): Form<MenuForm>) -> Redirect {
    match form.menu {
        MenuAction::Play => Redirect::to(names::GAME_MODE_URL),
        MenuAction::Instructions => Redirect::to(names::INSTRUCTIONS_URL),
        MenuAction::Options => Redirect::to(names::OPTIONS_URL),
        MenuAction::MainMenu => Redirect::to(names::INDEX_URL),
    }
}

async fn instructions(_game: Game) -> maud::Markup {
    views::page("Instructions", None, views::menu::instructions())
}

async fn options_page(game: Game, jar: CookieJar) -> Response {
    let (notice, jar) = utils::consume_flash(jar);
    let page = views::page(
        "Options",
        notice.as_ref(),
        views::menu::options(&game.session),
    );
    (jar, page).into_response()
}

#[derive(Deserialize)]
enum OptionsAction {
    #[serde(rename = "Apply")]
    Apply,
    #[serde(rename = "Main menu")]
    MainMenu,
}

#[derive(Deserialize)]
struct OptionsForm {
    #[serde(default)]
    button: Option<OptionsAction>,
    p1_name: String,
    p2_name: String,
    questions_number: String,
}

async fn options_post(
    State(state): State<AppState>,
    mut game: Game,
    Form(form): Form<OptionsForm>,
) -> Result<Response, AppError> {
    if let Some(OptionsAction::MainMenu) = form.button {
        return Ok(Redirect::to(names::INDEX_URL).into_response());
    }

    let questions_number: usize = form
        .questions_number
        .trim()
        .parse()
        .reject_input("Please enter a whole number of questions.")?;
    if questions_number == 0 {
        return Err(AppError::Input("A game needs at least one question."));
    }

    game.session.p1_name = form.p1_name;
    game.session.p2_name = form.p2_name;
    game.session.questions_number = questions_number;

    state
        .sessions
        .save(&game.sid, &game.session)
        .reject("could not save session")?;

    Ok(utils::redirect_flash(
        names::OPTIONS_URL,
        Level::Success,
        "Changes have been applied successfully!",
    ))
}
