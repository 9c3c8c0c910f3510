pub mod game;
pub mod layout;
pub mod menu;

pub use layout::page;
