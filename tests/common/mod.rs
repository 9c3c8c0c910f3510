use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use trivia_duel::store::Sessions;
use trivia_duel::trivia::TriviaClient;
use trivia_duel::{names, router, AppState};

const TEST_KEY: &[u8] = b"an-entirely-unremarkable-signing-key-used-only-by-the-test-suite";

/// A stand-in Open Trivia DB, served on an ephemeral local port.
///
/// Questions are deterministic: question `i` has correct answer `Right {i}`
/// and wrong answers `Wrong {i}a..c`, so tests can answer on purpose.
#[derive(Clone, Default)]
pub struct StubTrivia {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    questions_code: Mutex<u8>,
    broken: Mutex<bool>,
    tokens: AtomicU32,
    resets: AtomicU32,
    last_query: Mutex<Option<BTreeMap<String, String>>>,
}

impl StubTrivia {
    pub fn set_questions_code(&self, code: u8) {
        *self.inner.questions_code.lock().unwrap() = code;
    }

    /// Make the questions endpoint return garbage instead of JSON.
    pub fn set_broken(&self, broken: bool) {
        *self.inner.broken.lock().unwrap() = broken;
    }

    pub fn resets(&self) -> u32 {
        self.inner.resets.load(Ordering::SeqCst)
    }

    pub fn tokens_issued(&self) -> u32 {
        self.inner.tokens.load(Ordering::SeqCst)
    }

    /// Query parameters of the most recent questions fetch.
    pub fn last_query(&self) -> Option<BTreeMap<String, String>> {
        self.inner.last_query.lock().unwrap().clone()
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api_token.php", get(stub_token))
            .route("/api_category.php", get(stub_categories))
            .route("/api.php", get(stub_questions))
            .with_state(self.clone())
    }
}

async fn stub_token(
    State(stub): State<StubTrivia>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    let token = match params.get("command").map(String::as_str) {
        Some("reset") => {
            let n = stub.inner.resets.fetch_add(1, Ordering::SeqCst) + 1;
            format!("reset-token-{n}")
        }
        _ => {
            let n = stub.inner.tokens.fetch_add(1, Ordering::SeqCst) + 1;
            format!("token-{n}")
        }
    };
    Json(json!({
        "response_code": 0,
        "response_message": "Token Generated Successfully!",
        "token": token,
    }))
}

async fn stub_categories() -> Json<Value> {
    Json(json!({
        "trivia_categories": [
            { "id": 9, "name": "General Knowledge" },
            { "id": 11, "name": "Entertainment: Film" },
            { "id": 18, "name": "Science: Computers" },
        ]
    }))
}

async fn stub_questions(
    State(stub): State<StubTrivia>,
    Query(params): Query<BTreeMap<String, String>>,
) -> axum::response::Response {
    *stub.inner.last_query.lock().unwrap() = Some(params.clone());

    if *stub.inner.broken.lock().unwrap() {
        return "this is not json".into_response();
    }

    let code = *stub.inner.questions_code.lock().unwrap();
    if code != 0 {
        return Json(json!({ "response_code": code, "results": [] })).into_response();
    }

    let amount: usize = params
        .get("amount")
        .and_then(|a| a.parse().ok())
        .unwrap_or(0);
    let results: Vec<Value> = (0..amount)
        .map(|i| {
            json!({
                "category": "General Knowledge",
                "type": "multiple",
                "difficulty": "easy",
                "question": format!("Question {i}?"),
                "correct_answer": format!("Right {i}"),
                "incorrect_answers": [
                    format!("Wrong {i}a"),
                    format!("Wrong {i}b"),
                    format!("Wrong {i}c"),
                ],
            })
        })
        .collect();
    Json(json!({ "response_code": 0, "results": results })).into_response()
}

pub struct TestApp {
    pub app: Router,
    pub stub: StubTrivia,
}

/// Build the app under test, wired to a freshly spawned stub API.
pub async fn test_app() -> TestApp {
    let stub = StubTrivia::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub api listener");
    let addr = listener.local_addr().expect("stub api address");
    let stub_router = stub.router();
    tokio::spawn(async move {
        axum::serve(listener, stub_router)
            .await
            .expect("stub api server");
    });

    let state = AppState {
        sessions: Sessions::in_memory(),
        trivia: TriviaClient::new(format!("http://{addr}")).expect("trivia client"),
        key: Key::derive_from(TEST_KEY),
    };
    TestApp {
        app: router(state),
        stub,
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// Drives the router like a browser would: keeps cookies between requests
/// and honors Set-Cookie on every response.
pub struct Browser {
    app: Router,
    pub cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> Reply {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, form: &str) -> Reply {
        self.request(Method::POST, uri, Some(form)).await
    }

    /// The pending flash notice, percent-decoded.
    pub fn decoded_notice(&self) -> Option<String> {
        let raw = self.cookies.get(names::FLASH_COOKIE_NAME)?;
        let (_level, message) = raw.split_once(':')?;
        Some(urlencoding::decode(message).ok()?.into_owned())
    }

    async fn request(&mut self, method: Method, uri: &str, form: Option<&str>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie_header);
        }
        let body = match form {
            Some(data) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(data.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("request build should succeed"))
            .await
            .expect("router should respond");

        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().expect("set-cookie should be ascii");
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                if value.is_empty() {
                    self.cookies.remove(name);
                } else {
                    self.cookies.insert(name.to_string(), value.to_string());
                }
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();

        Reply {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
