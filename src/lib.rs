//! Soul Dungeon: a turn-based walk from rock bottom to glory through a small
//! dungeon of the mind.
//!
//! [`game::Game`] is the whole session. It takes its narrative content and
//! save slots as injected collaborators ([`data::ContentRepository`],
//! [`save::SaveStore`]), consumes [`input::Command`]s and is drawn through
//! [`render::Frame`].

pub mod battle;
pub mod config;
pub mod data;
pub mod game;
pub mod input;
pub mod map;
pub mod render;
pub mod save;
pub mod structures;

pub use config::GameConfig;
pub use game::{Game, Mode};
