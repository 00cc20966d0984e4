//! Game orchestrator.
//!
//! `JassGame` owns the four players and the hidden information (the hands).
//! It is driven one trick at a time with
//! [`advance_to_end_of_next_trick`](JassGame::advance_to_end_of_next_trick),
//! or to completion with [`play_to_end`](JassGame::play_to_end).
//!
//! ## Turn flow
//!
//! 1. Draw trump, shuffle, deal nine cards per seat.
//! 2. First turn: players learn their seat and the table's names, and the
//!    holder of the seven of diamonds leads. Later turns: the lead moves one
//!    seat on.
//! 3. Every player learns its hand and the trump.
//!
//! ## Trick flow
//!
//! Collect the previous trick, broadcast the score, stop if a team reached
//! the threshold, then broadcast the trick and let the four seats play in
//! order, broadcasting the trick after each card.

use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

use super::Player;
use crate::cards::{Card, CardSet, Rank, Suit};
use crate::core::config::HAND_SIZE;
use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap, TeamId};
use crate::error::{JassError, Result};
use crate::rules::{Score, TurnState};

/// Card whose holder leads the first turn.
const OPENING_CARD: Card = Card::new(Suit::Diamond, Rank::Seven);

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: TeamId,
    /// Turns started, including the one cut short by the win.
    pub turns: u32,
    pub score: Score,
}

/// A four-player game.
pub struct JassGame {
    config: GameConfig,
    shuffle_rng: GameRng,
    trump_rng: GameRng,
    players: PlayerMap<Box<dyn Player>>,
    names: PlayerMap<String>,
    hands: PlayerMap<CardSet>,
    leader: PlayerId,
    state: Option<TurnState>,
    turns: u32,
    winner: Option<TeamId>,
}

impl JassGame {
    /// Create a game; nothing is dealt until the first advance.
    pub fn new(
        config: GameConfig,
        players: PlayerMap<Box<dyn Player>>,
        names: PlayerMap<String>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shuffle_rng: config.shuffle_rng(),
            trump_rng: config.trump_rng(),
            config,
            players,
            names,
            hands: PlayerMap::with_value(CardSet::EMPTY),
            leader: PlayerId::PLAYER_1,
            state: None,
            turns: 0,
            winner: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    /// State of the turn in progress, `None` before the first deal.
    #[must_use]
    pub fn turn_state(&self) -> Option<&TurnState> {
        self.state.as_ref()
    }

    /// Cards `player` still holds.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> CardSet {
        self.hands[player]
    }

    /// Turns started so far.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Summary once the game is over.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        let winner = self.winner?;
        let state = self.state?;
        Some(GameSummary {
            winner,
            turns: self.turns,
            score: state.score(),
        })
    }

    /// Play up to the end of the next trick. Does nothing once the game is
    /// over.
    ///
    /// Fails if a player returns an illegal card or a remote player's
    /// transport fails; the game is then left mid-trick and must be dropped.
    pub fn advance_to_end_of_next_trick(&mut self) -> Result<()> {
        if self.is_game_over() {
            return Ok(());
        }

        let previous = match self.state {
            Some(state) => {
                let collected = state.collect_trick()?;
                debug!(
                    "{} won by {} ({} points), score {}",
                    state.trick(),
                    state.trick().winning_player(),
                    state.trick().points(),
                    collected.score()
                );
                Some(collected)
            }
            None => None,
        };
        let mut state = match previous {
            Some(state) if !state.is_terminal() => state,
            _ => self.begin_turn(previous)?,
        };

        let score = state.score();
        for player in self.players.values_mut() {
            player.update_score(score)?;
        }

        let winning_points = self.config.winning_points;
        if let Some(team) = TeamId::ALL
            .into_iter()
            .find(|&team| score.total_points(team) >= winning_points)
        {
            info!("{} wins after {} turns, score {}", team, self.turns, score);
            self.state = Some(state);
            self.winner = Some(team);
            for player in self.players.values_mut() {
                player.set_winning_team(team)?;
            }
            return Ok(());
        }

        self.broadcast_trick(&state)?;
        for _ in 0..PlayerId::COUNT {
            let seat = state.next_player()?;
            state = self.play(seat, state)?;
            self.broadcast_trick(&state)?;
        }
        self.state = Some(state);
        Ok(())
    }

    /// Advance trick by trick until a team wins.
    pub fn play_to_end(&mut self) -> Result<TeamId> {
        loop {
            self.advance_to_end_of_next_trick()?;
            if let Some(team) = self.winner {
                return Ok(team);
            }
        }
    }

    /// Play the whole game on a dedicated thread.
    pub fn spawn(mut self) -> JoinHandle<Result<GameSummary>> {
        std::thread::spawn(move || {
            self.play_to_end()?;
            self.summary()
                .ok_or(JassError::IllegalState("game ended without a summary"))
        })
    }

    fn begin_turn(&mut self, previous: Option<TurnState>) -> Result<TurnState> {
        let trump = Suit::ALL[self.trump_rng.gen_index(Suit::COUNT)];
        self.deal();

        let score = match previous {
            None => {
                info!(
                    "Starting game (seed {}, {} points to win): {}",
                    self.config.seed,
                    self.config.winning_points,
                    self.names.values().cloned().collect::<Vec<_>>().join(", ")
                );
                for (seat, player) in self.players.iter_mut() {
                    player.set_players(seat, &self.names)?;
                }
                self.leader = PlayerId::ALL
                    .into_iter()
                    .find(|&seat| self.hands[seat].contains(OPENING_CARD))
                    .ok_or(JassError::IllegalState("opening card was not dealt"))?;
                Score::INITIAL
            }
            Some(state) => {
                self.leader = self.leader.next();
                state.score().next_turn()
            }
        };
        self.turns += 1;
        info!(
            "Turn {}: trump {}, {} leads, score {}",
            self.turns, trump, self.leader, score
        );

        for (seat, player) in self.players.iter_mut() {
            player.update_hand(self.hands[seat])?;
            player.set_trump(trump)?;
        }
        Ok(TurnState::initial(trump, score, self.leader))
    }

    fn deal(&mut self) {
        let mut deck: Vec<Card> = CardSet::ALL_CARDS.iter().collect();
        self.shuffle_rng.shuffle(&mut deck);
        for (seat, chunk) in PlayerId::ALL.into_iter().zip(deck.chunks(HAND_SIZE)) {
            self.hands[seat] = chunk.iter().copied().collect();
        }
    }

    fn play(&mut self, seat: PlayerId, state: TurnState) -> Result<TurnState> {
        let hand = self.hands[seat];
        let card = self.players[seat].card_to_play(&state, hand)?;

        let playable = state.trick().playable_cards(hand);
        if !playable.contains(card) {
            warn!("{} ({}) tried to play {} from {}", seat, self.names[seat], card, playable);
            return Err(JassError::invalid(format!(
                "{seat} played {card}, legal cards are {playable}"
            )));
        }

        let state = state.play_card(card)?;
        self.hands[seat] = hand.remove(card);
        self.players[seat].update_hand(self.hands[seat])?;
        Ok(state)
    }

    fn broadcast_trick(&mut self, state: &TurnState) -> Result<()> {
        let trick = state.trick();
        for player in self.players.values_mut() {
            player.update_trick(trick)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for JassGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JassGame")
            .field("config", &self.config)
            .field("names", &self.names)
            .field("hands", &self.hands)
            .field("state", &self.state)
            .field("turns", &self.turns)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}
