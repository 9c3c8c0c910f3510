pub const INDEX_URL: &str = "/";
pub const INSTRUCTIONS_URL: &str = "/instructions";
pub const OPTIONS_URL: &str = "/options";
pub const GAME_MODE_URL: &str = "/game-mode";
pub const GAME_CONFIG_URL: &str = "/game-config";
pub const COUNTDOWN_URL: &str = "/countdown";
pub const GAME_SESSION_URL: &str = "/game-session";
pub const ANSWER_URL: &str = "/answer";

pub const SESSION_COOKIE_NAME: &str = "sid";
pub const FLASH_COOKIE_NAME: &str = "notice";

// Game defaults
pub const DEFAULT_P1_NAME: &str = "Player 1";
pub const DEFAULT_P2_NAME: &str = "Player 2";
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Sentinel category meaning "no category filter" on the questions fetch.
pub const RANDOM_CATEGORY: &str = "Random";
