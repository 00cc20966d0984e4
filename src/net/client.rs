//! Game-side proxy for a player hosted in another process.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use tracing::info;

use super::codec::decode_card;
use super::command::JassCommand;
use super::connection::Connection;
use crate::cards::{Card, CardSet, Suit};
use crate::core::{PlayerId, PlayerMap, TeamId};
use crate::error::{JassError, Result};
use crate::game::Player;
use crate::rules::{Score, Trick, TurnState};

/// A [`Player`] that forwards every call to a [`RemotePlayerServer`].
///
/// Any transport or protocol failure is returned to the game, which then
/// stops.
///
/// [`RemotePlayerServer`]: super::RemotePlayerServer
#[derive(Debug)]
pub struct RemotePlayerClient {
    connection: Connection,
}

impl RemotePlayerClient {
    /// Connect to a server, e.g. `("host", DEFAULT_PORT)`.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let client = Self::from_stream(stream)?;
        info!("Connected to remote player at {}", client.peer());
        Ok(client)
    }

    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        Ok(Self {
            connection: Connection::new(stream)?,
        })
    }

    #[must_use]
    pub fn peer(&self) -> SocketAddr {
        self.connection.peer()
    }

    fn send(&mut self, command: JassCommand) -> Result<()> {
        self.connection.write_line(&command.to_string())
    }
}

impl Player for RemotePlayerClient {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        self.send(JassCommand::Card {
            state: *state,
            hand,
        })?;
        let reply = self.connection.read_line()?.ok_or_else(|| {
            JassError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "remote player closed before answering CARD",
            ))
        })?;
        decode_card(&reply)
    }

    fn set_players(&mut self, own_id: PlayerId, names: &PlayerMap<String>) -> Result<()> {
        self.send(JassCommand::Players {
            own_id,
            names: names.clone(),
        })
    }

    fn update_hand(&mut self, hand: CardSet) -> Result<()> {
        self.send(JassCommand::Hand(hand))
    }

    fn set_trump(&mut self, trump: Suit) -> Result<()> {
        self.send(JassCommand::Trump(trump))
    }

    fn update_trick(&mut self, trick: Trick) -> Result<()> {
        self.send(JassCommand::Trick(trick))
    }

    fn update_score(&mut self, score: Score) -> Result<()> {
        self.send(JassCommand::Score(score))
    }

    fn set_winning_team(&mut self, team: TeamId) -> Result<()> {
        self.send(JassCommand::Winner(team))
    }
}
