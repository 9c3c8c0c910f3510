use maud::{html, Markup, PreEscaped};

use crate::models::{Score, Verdict};
use crate::names;

pub fn mode_select() -> Markup {
    html! {
        h1 { "Game mode" }
        p { "Play on your own, or pass the device back and forth." }
        form method="post" action=(names::GAME_MODE_URL) {
            div."menu" {
                button name="game_mode" value="1 player" { "1 player" }
                button name="game_mode" value="2 players" { "2 players" }
            }
        }
    }
}

pub fn config(category_names: &[String]) -> Markup {
    html! {
        h1 { "Game setup" }
        form method="post" action=(names::GAME_CONFIG_URL) {
            label {
                "Category"
                select name="category" {
                    option value=(names::RANDOM_CATEGORY) { (names::RANDOM_CATEGORY) }
                    @for name in category_names {
                        option value=(name) { (name) }
                    }
                }
            }
            label {
                "Difficulty"
                select name="difficulty" {
                    option value="" { "Any" }
                    option value="easy" { "Easy" }
                    option value="medium" { "Medium" }
                    option value="hard" { "Hard" }
                }
            }
            button { "Start" }
        }
    }
}

pub fn countdown() -> Markup {
    html! {
        h1 { "Get ready!" }
        p."countdown" {
            "The game starts in " span id="count" { "5" } "..."
        }
        form id="countdown-form" method="post" action=(names::COUNTDOWN_URL) {
            noscript { button { "Start now" } }
        }
        script {
            (PreEscaped(r#"
                let n = 5;
                const el = document.getElementById('count');
                const timer = setInterval(() => {
                    n -= 1;
                    el.textContent = n;
                    if (n <= 0) {
                        clearInterval(timer);
                        document.getElementById('countdown-form').submit();
                    }
                }, 1000);
            "#))
        }
    }
}

pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub category: String,
    pub difficulty: String,
    pub text: String,
    pub options: Vec<String>,
    /// Name of the player on turn; only set in a 2-player game.
    pub active_name: Option<String>,
}

pub fn question(data: &QuestionView) -> Markup {
    html! {
        p."question-meta" {
            "Question " strong { (data.number) } " of " (data.total)
            " · " (data.category)
            " · " (data.difficulty)
        }
        @if let Some(name) = &data.active_name {
            p."turn" { "It's your turn, " strong { (name) } "!" }
        }
        article {
            h2 { (PreEscaped(data.text.clone())) }
            form method="post" action=(names::GAME_SESSION_URL) {
                div."options" {
                    @for option in &data.options {
                        button name="option" value=(option) { (PreEscaped(option.clone())) }
                    }
                }
            }
        }
    }
}

pub struct AnswerView {
    pub verdict: Verdict,
    pub correct_answer: String,
    pub score: Score,
    pub p1_name: String,
    pub p2_name: String,
    pub two_players: bool,
    /// Name of the player answering next; only set mid-game in 2-player mode.
    pub next_name: Option<String>,
    pub finished: bool,
}

fn score_table(p1_name: &str, p2_name: &str, score: &Score, two_players: bool) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "" }
                    th { "Correct" }
                    th { "Incorrect" }
                }
            }
            tbody {
                tr {
                    td { (p1_name) }
                    td { (score.p1_correct) }
                    td { (score.p1_incorrect) }
                }
                @if two_players {
                    tr {
                        td { (p2_name) }
                        td { (score.p2_correct) }
                        td { (score.p2_incorrect) }
                    }
                }
            }
        }
    }
}

pub fn answer(data: &AnswerView) -> Markup {
    html! {
        @match data.verdict {
            Verdict::Correct => { h1."correct" { "Correct!" } }
            Verdict::Incorrect => { h1."incorrect" { "Incorrect!" } }
        }
        p {
            "The correct answer was: "
            strong { (PreEscaped(data.correct_answer.clone())) }
        }
        (score_table(&data.p1_name, &data.p2_name, &data.score, data.two_players))
        @if let Some(name) = &data.next_name {
            p { "Next up: " strong { (name) } }
        }
        form method="get" action=(names::GAME_SESSION_URL) {
            @if data.finished {
                button { "See results" }
            } @else {
                button { "Next question" }
            }
        }
    }
}

pub struct EndView {
    pub p1_name: String,
    pub p2_name: String,
    pub score: Score,
    pub total: usize,
    pub two_players: bool,
}

fn winner_line(data: &EndView) -> Markup {
    let (p1, p2) = (data.score.p1_correct, data.score.p2_correct);
    html! {
        @if p1 > p2 {
            p."winner" { strong { (data.p1_name) } " wins!" }
        } @else if p2 > p1 {
            p."winner" { strong { (data.p2_name) } " wins!" }
        } @else {
            p."winner" { "It's a tie!" }
        }
    }
}

pub fn end_screen(data: &EndView) -> Markup {
    html! {
        h1 { "Game over" }
        @if data.two_players {
            (winner_line(data))
        } @else {
            p {
                strong { (data.p1_name) }
                " answered "
                strong { (data.score.p1_correct) }
                " of " (data.total) " questions correctly."
            }
        }
        (score_table(&data.p1_name, &data.p2_name, &data.score, data.two_players))
        form method="post" action=(names::GAME_SESSION_URL) {
            div."menu" {
                button name="next" value="Play again" { "Play again" }
                button name="next" value="Main Menu" { "Main menu" }
            }
        }
    }
}
