//! Player commands and their enumeration.
//!
//! A [`Command`] is one legal action offered by the priority loop. The
//! enumerator lives on [`Game`](crate::Game) as
//! [`available_commands`](crate::Game::available_commands).

pub mod command;
pub mod commands;

pub use command::Command;
