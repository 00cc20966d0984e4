//! Playing over TCP.
//!
//! A game holds a [`RemotePlayerClient`] in a seat; the process hosting the
//! real player runs a [`RemotePlayerServer`]. Every [`Player`] call becomes
//! one text line (see [`JassCommand`]).
//!
//! [`Player`]: crate::game::Player

pub mod client;
pub mod codec;
pub mod command;
pub mod connection;
pub mod server;

pub use client::RemotePlayerClient;
pub use command::JassCommand;
pub use connection::Connection;
pub use server::{serve, RemotePlayerServer, DEFAULT_PORT};
