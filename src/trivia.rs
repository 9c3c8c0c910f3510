//! Client for the Open Trivia DB HTTP API.
//!
//! Transport problems (timeouts, connection failures, undecodable JSON) are
//! `TriviaError`s; the numeric response code on the questions endpoint is a
//! domain signal and is handed back to the caller untouched.

use std::time::Duration;

use serde::Deserialize;

use crate::models::{Category, Difficulty, Question};

const API_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    #[error("trivia api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("trivia api returned unknown response code {0}")]
    UnknownCode(u8),
}

/// Status of a questions fetch, as defined by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    NotEnoughQuestions,
    InvalidParameters,
    TokenNotFound,
    TokenExhausted,
    RateLimited,
}

impl ResponseCode {
    pub fn from_code(code: u8) -> Result<Self, TriviaError> {
        match code {
            0 => Ok(ResponseCode::Success),
            1 => Ok(ResponseCode::NotEnoughQuestions),
            2 => Ok(ResponseCode::InvalidParameters),
            3 => Ok(ResponseCode::TokenNotFound),
            4 => Ok(ResponseCode::TokenExhausted),
            5 => Ok(ResponseCode::RateLimited),
            other => Err(TriviaError::UnknownCode(other)),
        }
    }
}

#[derive(Deserialize)]
struct TokenEnvelope {
    token: String,
}

#[derive(Deserialize)]
struct CategoryEnvelope {
    trivia_categories: Vec<Category>,
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    response_code: u8,
    results: Vec<Question>,
}

#[derive(Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TriviaError> {
        let http = reqwest::Client::builder().timeout(API_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Request a fresh session token. The token prevents the API from
    /// serving duplicate questions within one play session.
    pub async fn request_token(&self) -> Result<String, TriviaError> {
        let envelope: TokenEnvelope = self
            .http
            .get(format!("{}/api_token.php", self.base_url))
            .query(&[("command", "request")])
            .send()
            .await?
            .json()
            .await?;
        Ok(envelope.token)
    }

    /// Reset an exhausted token, returning the value to use from now on.
    pub async fn reset_token(&self, token: &str) -> Result<String, TriviaError> {
        let envelope: TokenEnvelope = self
            .http
            .get(format!("{}/api_token.php", self.base_url))
            .query(&[("command", "reset"), ("token", token)])
            .send()
            .await?
            .json()
            .await?;
        Ok(envelope.token)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, TriviaError> {
        let envelope: CategoryEnvelope = self
            .http
            .get(format!("{}/api_category.php", self.base_url))
            .send()
            .await?
            .json()
            .await?;
        Ok(envelope.trivia_categories)
    }

    /// Fetch a question batch. A non-zero response code is not an error at
    /// this layer; the caller dispatches on it.
    pub async fn fetch_questions(
        &self,
        amount: usize,
        category_id: Option<u32>,
        difficulty: Option<Difficulty>,
        token: &str,
    ) -> Result<(ResponseCode, Vec<Question>), TriviaError> {
        let mut params = questions_query(amount, category_id, difficulty);
        params.push(("token", token.to_string()));

        let envelope: QuestionsEnvelope = self
            .http
            .get(format!("{}/api.php", self.base_url))
            .query(&params)
            .send()
            .await?
            .json()
            .await?;

        let code = ResponseCode::from_code(envelope.response_code)?;
        Ok((code, envelope.results))
    }
}

/// Query parameters for the questions endpoint. Category and difficulty are
/// omitted entirely when unset; the API treats absence as "any".
fn questions_query(
    amount: usize,
    category_id: Option<u32>,
    difficulty: Option<Difficulty>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("amount", amount.to_string())];
    if let Some(id) = category_id {
        params.push(("category", id.to_string()));
    }
    if let Some(difficulty) = difficulty {
        params.push(("difficulty", difficulty.as_str().to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_codes_map_to_domain_signals() {
        assert_eq!(ResponseCode::from_code(0).unwrap(), ResponseCode::Success);
        assert_eq!(
            ResponseCode::from_code(4).unwrap(),
            ResponseCode::TokenExhausted
        );
        assert_eq!(
            ResponseCode::from_code(5).unwrap(),
            ResponseCode::RateLimited
        );
        assert!(matches!(
            ResponseCode::from_code(9),
            Err(TriviaError::UnknownCode(9))
        ));
    }

    #[test]
    fn unset_filters_are_omitted_from_the_query() {
        let params = questions_query(10, None, None);
        assert_eq!(params, vec![("amount", "10".to_string())]);

        let params = questions_query(5, Some(9), Some(Difficulty::Hard));
        assert_eq!(
            params,
            vec![
                ("amount", "5".to_string()),
                ("category", "9".to_string()),
                ("difficulty", "hard".to_string()),
            ]
        );
    }

    #[test]
    fn questions_envelope_decodes_api_json() {
        let raw = r#"{
            "response_code": 0,
            "results": [{
                "category": "Entertainment: Film",
                "type": "multiple",
                "difficulty": "medium",
                "question": "Who directed &quot;Alien&quot; (1979)?",
                "correct_answer": "Ridley Scott",
                "incorrect_answers": ["James Cameron", "Stanley Kubrick", "David Fincher"]
            }]
        }"#;
        let envelope: QuestionsEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.response_code, 0);
        assert_eq!(envelope.results.len(), 1);
        let q = &envelope.results[0];
        assert_eq!(q.kind, "multiple");
        assert_eq!(q.correct_answer, "Ridley Scott");
        assert_eq!(q.incorrect_answers.len(), 3);
    }

    #[test]
    fn token_and_category_envelopes_decode() {
        let token: TokenEnvelope = serde_json::from_str(
            r#"{"response_code": 0, "response_message": "Token Generated.", "token": "abc123"}"#,
        )
        .unwrap();
        assert_eq!(token.token, "abc123");

        let categories: CategoryEnvelope = serde_json::from_str(
            r#"{"trivia_categories": [{"id": 9, "name": "General Knowledge"}]}"#,
        )
        .unwrap();
        assert_eq!(categories.trivia_categories[0].id, 9);
    }
}
