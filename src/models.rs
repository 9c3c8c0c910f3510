use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::names;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    OnePlayer,
    TwoPlayers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// One fetched trivia question, kept verbatim as the API returned it.
/// The correct answer never reaches the page in a marked form; it is
/// shuffled in with the incorrect ones and only the server remembers it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    /// All answer options in uniformly random order. Unseeded on purpose:
    /// re-rendering the same question may reorder the options.
    pub fn shuffled_options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.incorrect_answers.len() + 1);
        options.push(self.correct_answer.clone());
        options.extend(self.incorrect_answers.iter().cloned());
        options.shuffle(&mut rand::thread_rng());
        options
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub p1_correct: u32,
    pub p1_incorrect: u32,
    pub p2_correct: u32,
    pub p2_incorrect: u32,
}

impl Score {
    fn record(&mut self, player: Player, verdict: Verdict) {
        match (player, verdict) {
            (Player::One, Verdict::Correct) => self.p1_correct += 1,
            (Player::One, Verdict::Incorrect) => self.p1_incorrect += 1,
            (Player::Two, Verdict::Correct) => self.p2_correct += 1,
            (Player::Two, Verdict::Incorrect) => self.p2_incorrect += 1,
        }
    }
}

/// Everything the server remembers about one visitor's game, serialized
/// into the session store between requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSession {
    pub token: Option<String>,
    pub p1_name: String,
    pub p2_name: String,
    pub questions_number: usize,
    pub game_mode: Option<GameMode>,
    pub categories: Vec<Category>,
    pub chosen_category: Option<String>,
    pub chosen_difficulty: Option<Difficulty>,
    pub questions: Vec<Question>,
    pub question_count: usize,
    pub score: Score,
    pub active_player: Player,
    pub current_correct_answer: Option<String>,
    pub answer: Option<Verdict>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            token: None,
            p1_name: names::DEFAULT_P1_NAME.to_string(),
            p2_name: names::DEFAULT_P2_NAME.to_string(),
            questions_number: names::DEFAULT_QUESTION_COUNT,
            game_mode: None,
            categories: Vec::new(),
            chosen_category: None,
            chosen_difficulty: None,
            questions: Vec::new(),
            question_count: 0,
            score: Score::default(),
            active_player: Player::One,
            current_correct_answer: None,
            answer: None,
        }
    }
}

impl GameSession {
    /// The sole end-of-game trigger: the index has reached the configured
    /// question count.
    pub fn is_over(&self) -> bool {
        self.question_count >= self.questions_number
    }

    /// The question at the current index, or `None` when the game is over
    /// or no batch has been fetched yet.
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_over() {
            return None;
        }
        self.questions.get(self.question_count)
    }

    /// Re-seed the per-round state. Runs when the countdown page is shown,
    /// so "Play again" starts from a clean score.
    pub fn start_round(&mut self) {
        self.score = Score::default();
        self.active_player = Player::One;
        self.current_correct_answer = None;
        self.answer = None;
    }

    /// Install a freshly fetched batch and rewind the index.
    pub fn install_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.question_count = 0;
    }

    /// Score a submitted option against the current question and advance.
    ///
    /// Exact, case-sensitive match; the tally goes to the active player,
    /// the turn flips in 2-player mode, and the index moves forward by
    /// exactly one. Returns `None` when there is no current question to
    /// answer (game over, or nothing fetched).
    pub fn submit_answer(&mut self, choice: &str) -> Option<Verdict> {
        let correct = self.current_question()?.correct_answer.clone();
        let verdict = if choice == correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        self.score.record(self.active_player, verdict);
        self.current_correct_answer = Some(correct);
        self.answer = Some(verdict);

        if self.game_mode == Some(GameMode::TwoPlayers) {
            self.active_player = self.active_player.other();
        }

        self.question_count += 1;
        Some(verdict)
    }

    /// Full reset except the API token, which stays valid across games.
    pub fn reset_for_menu(&mut self) {
        let token = self.token.take();
        *self = GameSession {
            token,
            ..GameSession::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(i: usize) -> Question {
        Question {
            category: "General Knowledge".to_string(),
            kind: "multiple".to_string(),
            difficulty: "easy".to_string(),
            question: format!("Question {i}?"),
            correct_answer: format!("Right {i}"),
            incorrect_answers: vec![
                format!("Wrong {i}a"),
                format!("Wrong {i}b"),
                format!("Wrong {i}c"),
            ],
        }
    }

    fn session(mode: GameMode, count: usize) -> GameSession {
        let mut session = GameSession {
            game_mode: Some(mode),
            questions_number: count,
            ..GameSession::default()
        };
        session.start_round();
        session.install_questions((0..count).map(question).collect());
        session
    }

    #[test]
    fn one_player_active_player_never_changes() {
        let mut session = session(GameMode::OnePlayer, 5);
        for i in 0..5 {
            assert_eq!(session.active_player, Player::One);
            session.submit_answer(&format!("Right {i}")).unwrap();
        }
        assert_eq!(session.active_player, Player::One);
    }

    #[test]
    fn two_player_turns_alternate_starting_at_one() {
        let mut session = session(GameMode::TwoPlayers, 6);
        let expected = [
            Player::One,
            Player::Two,
            Player::One,
            Player::Two,
            Player::One,
            Player::Two,
        ];
        for (i, player) in expected.iter().enumerate() {
            assert_eq!(session.active_player, *player);
            session.submit_answer(&format!("Right {i}")).unwrap();
        }
    }

    #[test]
    fn question_count_never_exceeds_questions_number() {
        let mut session = session(GameMode::OnePlayer, 3);
        for i in 0..3 {
            assert!(!session.is_over());
            session.submit_answer(&format!("Right {i}")).unwrap();
        }
        assert!(session.is_over());
        assert_eq!(session.question_count, 3);

        // A stray re-submission past the end is a no-op.
        assert_eq!(session.submit_answer("Right 0"), None);
        assert_eq!(session.question_count, 3);
    }

    #[test]
    fn perfect_single_player_game_scores_ten() {
        let mut session = session(GameMode::OnePlayer, 10);
        for i in 0..10 {
            let verdict = session.submit_answer(&format!("Right {i}")).unwrap();
            assert_eq!(verdict, Verdict::Correct);
        }
        assert!(session.is_over());
        assert_eq!(session.score.p1_correct, 10);
        assert_eq!(session.score.p1_incorrect, 0);
    }

    #[test]
    fn two_player_tallies_follow_the_active_player() {
        let mut session = session(GameMode::TwoPlayers, 4);
        // P1 answers 0 and 2, P2 answers 1 and 3.
        session.submit_answer("Right 0").unwrap();
        session.submit_answer("Wrong 1a").unwrap();
        session.submit_answer("Wrong 2a").unwrap();
        session.submit_answer("Right 3").unwrap();
        assert_eq!(
            session.score,
            Score {
                p1_correct: 1,
                p1_incorrect: 1,
                p2_correct: 1,
                p2_incorrect: 1,
            }
        );
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut session = session(GameMode::OnePlayer, 1);
        assert_eq!(session.submit_answer("right 0"), Some(Verdict::Incorrect));
    }

    #[test]
    fn shuffled_options_contain_the_correct_answer_exactly_once() {
        let q = question(7);
        for _ in 0..50 {
            let options = q.shuffled_options();
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| *o == "Right 7").count(), 1);
        }
    }

    #[test]
    fn reset_for_menu_keeps_only_the_token() {
        let mut session = session(GameMode::TwoPlayers, 2);
        session.token = Some("tok".to_string());
        session.p1_name = "Ada".to_string();
        session.submit_answer("Right 0").unwrap();

        session.reset_for_menu();

        assert_eq!(session.token.as_deref(), Some("tok"));
        assert_eq!(session.p1_name, names::DEFAULT_P1_NAME);
        assert_eq!(session.questions_number, names::DEFAULT_QUESTION_COUNT);
        assert!(session.questions.is_empty());
        assert_eq!(session.score, Score::default());
        assert_eq!(session.game_mode, None);
    }

    #[test]
    fn start_round_clears_score_but_not_configuration() {
        let mut session = session(GameMode::TwoPlayers, 2);
        session.p1_name = "Ada".to_string();
        session.submit_answer("Right 0").unwrap();
        session.start_round();

        assert_eq!(session.score, Score::default());
        assert_eq!(session.active_player, Player::One);
        assert_eq!(session.answer, None);
        assert_eq!(session.p1_name, "Ada");
        assert_eq!(session.game_mode, Some(GameMode::TwoPlayers));
    }
}
