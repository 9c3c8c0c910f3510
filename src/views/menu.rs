use maud::{html, Markup};

use crate::models::GameSession;
use crate::names;

pub fn index() -> Markup {
    html! {
        h1 { "Trivia Duel" }
        p { "A quick-fire trivia quiz for one or two players, powered by Open Trivia DB." }
        form method="post" action=(names::INDEX_URL) {
            div."menu" {
                button name="menu" value="Play" { "Play" }
                button name="menu" value="Instructions" { "Instructions" }
                button name="menu" value="Options" { "Options" }
            }
        }
    }
}

pub fn instructions() -> Markup {
    html! {
        h1 { "Instructions" }
        ol {
            li { "Pick a game mode: solo, or two players taking turns on the same device." }
            li { "Choose a category and a difficulty, or leave both random." }
            li { "Each question shows one correct answer mixed in with the wrong ones." }
            li { "In a two-player game, turns alternate after every question." }
            li { "Player names and game length live under Options." }
        }
        form method="post" action=(names::INDEX_URL) {
            button name="menu" value="Main menu" { "Main menu" }
        }
    }
}

pub fn options(session: &GameSession) -> Markup {
    html! {
        h1 { "Options" }
        form method="post" action=(names::OPTIONS_URL) {
            label {
                "Player 1 name"
                input name="p1_name" type="text" value=(session.p1_name);
            }
            label {
                "Player 2 name"
                input name="p2_name" type="text" value=(session.p2_name);
            }
            label {
                "Number of questions"
                input name="questions_number" type="number" min="1" value=(session.questions_number);
            }
            div."menu" {
                button name="button" value="Apply" { "Apply" }
                button name="button" value="Main menu" { "Main menu" }
            }
        }
    }
}
