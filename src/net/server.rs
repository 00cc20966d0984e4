//! Hosts a local [`Player`] for a game running in another process.

use std::net::{SocketAddr, TcpListener, ToSocketAddrs};

use tracing::info;

use super::codec::encode_card;
use super::command::JassCommand;
use super::connection::Connection;
use crate::error::Result;
use crate::game::Player;

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 6000;

/// Accepts one game connection and answers it with a local player.
#[derive(Debug)]
pub struct RemotePlayerServer<P> {
    listener: TcpListener,
    player: P,
}

impl<P: Player> RemotePlayerServer<P> {
    /// Listen on `addr`; use port 0 to let the OS pick one.
    pub fn bind(addr: impl ToSocketAddrs, player: P) -> Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
            player,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait for the game to connect, serve it until it disconnects and hand
    /// the player back.
    pub fn run(mut self) -> Result<P> {
        let (stream, _) = self.listener.accept()?;
        let mut connection = Connection::new(stream)?;
        info!("Game connected from {}", connection.peer());

        serve(&mut self.player, &mut connection)?;

        info!("Game at {} disconnected", connection.peer());
        Ok(self.player)
    }
}

/// Dispatch every line from `connection` to `player` until end of stream.
pub fn serve<P: Player + ?Sized>(player: &mut P, connection: &mut Connection) -> Result<()> {
    while let Some(line) = connection.read_line()? {
        match line.parse::<JassCommand>()? {
            JassCommand::Players { own_id, names } => player.set_players(own_id, &names)?,
            JassCommand::Trump(trump) => player.set_trump(trump)?,
            JassCommand::Hand(hand) => player.update_hand(hand)?,
            JassCommand::Trick(trick) => player.update_trick(trick)?,
            JassCommand::Score(score) => player.update_score(score)?,
            JassCommand::Winner(team) => player.set_winning_team(team)?,
            JassCommand::Card { state, hand } => {
                let card = player.card_to_play(&state, hand)?;
                connection.write_line(&encode_card(card))?;
            }
        }
    }
    Ok(())
}
