use maud::{html, Markup, DOCTYPE};

use crate::utils::{self, Level, Notice};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/style.css";
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/icon.svg" type="image/svg+xml";
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li {
                        a href="/" {
                            strong { "Trivia Duel" }
                        }
                    }
                }
                ul {
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

fn notice_banner(notice: &Notice) -> Markup {
    let class = match notice.level {
        Level::Error => "notice notice-error",
        Level::Success => "notice notice-success",
    };
    html! {
        article class=(class) { (notice.message) }
    }
}

pub fn page(title: &str, notice: Option<&Notice>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (icon())

            title { (format!("{title} - Trivia Duel")) }
        }

        body."container" {
            (header())
            main {
                @if let Some(notice) = notice {
                    (notice_banner(notice))
                }
                (body)
            }
        }
    }
}
