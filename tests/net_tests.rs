//! Games played over a loopback TCP connection.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use jass_engine::cards::{Card, CardSet, Suit};
use jass_engine::core::{GameConfig, PlayerId, PlayerMap, TeamId};
use jass_engine::error::{JassError, Result};
use jass_engine::game::{GameSummary, JassGame, Player, RandomPlayer};
use jass_engine::mcts::MctsPlayer;
use jass_engine::net::{JassCommand, RemotePlayerClient, RemotePlayerServer};
use jass_engine::rules::{Score, Trick, TurnState};

fn names() -> PlayerMap<String> {
    PlayerMap::from_array(["Aline", "Bastien", "Colette", "David"].map(String::from))
}

/// Serve `player` on an OS-chosen port; the handle yields it back once the
/// game side disconnects.
fn host<P: Player + 'static>(player: P) -> (std::net::SocketAddr, JoinHandle<Result<P>>) {
    let server = RemotePlayerServer::bind("127.0.0.1:0", player).unwrap();
    let addr = server.local_addr().unwrap();
    (addr, std::thread::spawn(move || server.run()))
}

fn play(config: GameConfig, players: PlayerMap<Box<dyn Player>>) -> GameSummary {
    JassGame::new(config, players, names())
        .unwrap()
        .spawn()
        .join()
        .unwrap()
        .unwrap()
}

fn random_seats(config: &GameConfig) -> PlayerMap<Box<dyn Player>> {
    PlayerMap::new(|p| Box::new(RandomPlayer::new(config.player_seed(p))) as Box<dyn Player>)
}

// =============================================================================
// Transparency
// =============================================================================

#[test]
fn test_remote_player_plays_like_local() {
    let config = GameConfig::new(31).with_winning_points(400);
    let local = play(config.clone(), random_seats(&config));

    let seat = PlayerId::PLAYER_3;
    let (addr, server) = host(RandomPlayer::new(config.player_seed(seat)));
    let mut players = random_seats(&config);
    players[seat] = Box::new(RemotePlayerClient::connect(addr).unwrap());
    let remote = play(config, players);

    assert_eq!(local, remote);
    // The game dropped its client, which ends the server
    server.join().unwrap().unwrap();
}

#[test]
fn test_remote_mcts_player_finishes_game() {
    let config = GameConfig::new(8).with_winning_points(300);
    let seat = PlayerId::PLAYER_2;
    let (addr, server) = host(MctsPlayer::new(PlayerId::PLAYER_1, 4, 30).unwrap());

    let mut players = random_seats(&config);
    players[seat] = Box::new(RemotePlayerClient::connect(addr).unwrap());
    let summary = play(config, players);
    assert!(summary.score.total_points(summary.winner) >= 300);

    let player = server.join().unwrap().unwrap();
    // Seat taken from the PLRS line
    assert_eq!(player.own_id(), seat);
    assert!(player.totals().iterations > 0);
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Default)]
struct Log {
    names: Option<(PlayerId, PlayerMap<String>)>,
    hands: Vec<CardSet>,
    trumps: Vec<Suit>,
    tricks: Vec<Trick>,
    scores: Vec<Score>,
    winner: Option<TeamId>,
}

/// Random player that keeps every notification it is sent.
struct Recorder {
    inner: RandomPlayer,
    log: Arc<Mutex<Log>>,
}

impl Player for Recorder {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        self.inner.card_to_play(state, hand)
    }

    fn set_players(&mut self, own_id: PlayerId, names: &PlayerMap<String>) -> Result<()> {
        self.log.lock().unwrap().names = Some((own_id, names.clone()));
        Ok(())
    }

    fn update_hand(&mut self, hand: CardSet) -> Result<()> {
        self.log.lock().unwrap().hands.push(hand);
        Ok(())
    }

    fn set_trump(&mut self, trump: Suit) -> Result<()> {
        self.log.lock().unwrap().trumps.push(trump);
        Ok(())
    }

    fn update_trick(&mut self, trick: Trick) -> Result<()> {
        self.log.lock().unwrap().tricks.push(trick);
        Ok(())
    }

    fn update_score(&mut self, score: Score) -> Result<()> {
        self.log.lock().unwrap().scores.push(score);
        Ok(())
    }

    fn set_winning_team(&mut self, team: TeamId) -> Result<()> {
        self.log.lock().unwrap().winner = Some(team);
        Ok(())
    }
}

#[test]
fn test_notifications_cross_the_wire() {
    let config = GameConfig::new(17).with_winning_points(250);
    let seat = PlayerId::PLAYER_4;

    let local_log = Arc::new(Mutex::new(Log::default()));
    let remote_log = Arc::new(Mutex::new(Log::default()));
    let recorder = |log: &Arc<Mutex<Log>>| Recorder {
        inner: RandomPlayer::new(config.player_seed(seat)),
        log: Arc::clone(log),
    };

    let mut players = random_seats(&config);
    players[seat] = Box::new(recorder(&local_log));
    let local = play(config.clone(), players);

    let (addr, server) = host(recorder(&remote_log));
    let mut players = random_seats(&config);
    players[seat] = Box::new(RemotePlayerClient::connect(addr).unwrap());
    let remote = play(config.clone(), players);
    server.join().unwrap().unwrap();

    assert_eq!(local, remote);
    let local = local_log.lock().unwrap();
    let remote = remote_log.lock().unwrap();
    assert_eq!(remote.names, Some((seat, names())));
    assert_eq!(remote.names, local.names);
    assert_eq!(remote.hands, local.hands);
    assert_eq!(remote.trumps, local.trumps);
    assert_eq!(remote.tricks, local.tricks);
    assert_eq!(remote.scores, local.scores);
    assert!(remote.winner.is_some());
    assert_eq!(remote.winner, local.winner);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_closed_server_fails_the_game() {
    let config = GameConfig::new(2);
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept and hang up at once
    let server = std::thread::spawn(move || drop(listener.accept().unwrap()));

    let mut players = random_seats(&config);
    players[PlayerId::PLAYER_1] = Box::new(RemotePlayerClient::connect(addr).unwrap());
    server.join().unwrap();

    let result = JassGame::new(config, players, names())
        .unwrap()
        .play_to_end();
    let err = result.unwrap_err();
    assert!(err.is_transport(), "unexpected {err:?}");
}

#[test]
fn test_malformed_line_stops_server() {
    let (addr, server) = host(RandomPlayer::new(0));
    let mut stream = std::net::TcpStream::connect(addr).unwrap();
    std::io::Write::write_all(&mut stream, b"JUNK 1\n").unwrap();

    assert!(matches!(
        server.join().unwrap(),
        Err(JassError::Protocol(_))
    ));
    assert!("JUNK 1".parse::<JassCommand>().is_err());
}
