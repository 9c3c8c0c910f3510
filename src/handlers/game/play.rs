use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::{EndAction, PlayForm};
use crate::extractors::Game;
use crate::models::{GameMode, Player};
use crate::rejections::{AppError, ResultExt};
use crate::views::game as game_views;
use crate::{names, views, AppState};

fn player_name(session: &crate::models::GameSession, player: Player) -> String {
    match player {
        Player::One => session.p1_name.clone(),
        Player::Two => session.p2_name.clone(),
    }
}

/// Current question, or the end screen once the batch is exhausted.
pub(crate) async fn game_session(game: Game) -> Result<maud::Markup, AppError> {
    let session = &game.session;
    let mode = session.game_mode.ok_or(AppError::SessionNotInitialized)?;

    if session.is_over() {
        let data = game_views::EndView {
            p1_name: session.p1_name.clone(),
            p2_name: session.p2_name.clone(),
            score: session.score,
            total: session.questions_number,
            two_players: mode == GameMode::TwoPlayers,
        };
        return Ok(views::page("Game Over", None, game_views::end_screen(&data)));
    }

    let question = session
        .current_question()
        .ok_or(AppError::SessionNotInitialized)?;

    let active_name = match mode {
        GameMode::OnePlayer => None,
        GameMode::TwoPlayers => Some(player_name(session, session.active_player)),
    };

    let data = game_views::QuestionView {
        number: session.question_count + 1,
        total: session.questions_number,
        category: question.category.clone(),
        difficulty: question.difficulty.clone(),
        text: question.question.clone(),
        options: question.shuffled_options(),
        active_name,
    };

    Ok(views::page("Question", None, game_views::question(&data)))
}

/// Either an end-screen action or an answer for the current question.
pub(crate) async fn submit(
    State(state): State<AppState>,
    mut game: Game,
    Form(form): Form<PlayForm>,
) -> Result<Response, AppError> {
    match form.next {
        Some(EndAction::PlayAgain) => {
            // Names, question count, and mode carry over; the countdown
            // page re-seeds score and progress.
            return Ok(Redirect::to(names::GAME_CONFIG_URL).into_response());
        }
        Some(EndAction::MainMenu) => {
            game.session.reset_for_menu();
            state
                .sessions
                .save(&game.sid, &game.session)
                .reject("could not save session")?;
            return Ok(Redirect::to(names::INDEX_URL).into_response());
        }
        None => {}
    }

    let choice = form.option.ok_or(AppError::Input("No answer was submitted."))?;

    game.session
        .submit_answer(&choice)
        .ok_or(AppError::SessionNotInitialized)?;

    state
        .sessions
        .save(&game.sid, &game.session)
        .reject("could not save session")?;

    Ok(Redirect::to(names::ANSWER_URL).into_response())
}

/// Feedback for the answer that was just scored.
pub(crate) async fn answer_page(game: Game) -> Result<maud::Markup, AppError> {
    let session = &game.session;
    let mode = session.game_mode.ok_or(AppError::SessionNotInitialized)?;
    let verdict = session.answer.ok_or(AppError::SessionNotInitialized)?;
    let correct_answer = session
        .current_correct_answer
        .clone()
        .ok_or(AppError::SessionNotInitialized)?;

    let two_players = mode == GameMode::TwoPlayers;
    let next_name = if two_players && !session.is_over() {
        Some(player_name(session, session.active_player))
    } else {
        None
    };

    let data = game_views::AnswerView {
        verdict,
        correct_answer,
        score: session.score,
        p1_name: session.p1_name.clone(),
        p2_name: session.p2_name.clone(),
        two_players,
        next_name,
        finished: session.is_over(),
    };

    Ok(views::page("Answer", None, game_views::answer(&data)))
}
