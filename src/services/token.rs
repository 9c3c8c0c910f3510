//! Token lifecycle: each session holds exactly one API token at a time.

use crate::models::GameSession;
use crate::trivia::{TriviaClient, TriviaError};

/// Request a token on first need. An existing token is left untouched.
pub async fn ensure_token(
    trivia: &TriviaClient,
    session: &mut GameSession,
) -> Result<(), TriviaError> {
    if session.token.is_none() {
        let token = trivia.request_token().await?;
        tracing::info!("requested new trivia token");
        session.token = Some(token);
    }
    Ok(())
}

/// Replace an exhausted token with a reset one. The fetch that hit the
/// exhaustion signal is abandoned by the caller, never retried here.
pub async fn rotate_token(
    trivia: &TriviaClient,
    session: &mut GameSession,
) -> Result<(), TriviaError> {
    let fresh = match session.token.as_deref() {
        Some(token) => trivia.reset_token(token).await?,
        None => trivia.request_token().await?,
    };
    tracing::info!("trivia token was exhausted and has been reset");
    session.token = Some(fresh);
    Ok(())
}
