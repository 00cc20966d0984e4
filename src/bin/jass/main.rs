//! jass - play Jass between simulated, random and remote players
//!
//! Usage:
//!   jass local <p1> <p2> <p3> <p4> [--seed N]
//!   jass serve [--iterations N] [--seed N] [--port P]
//!
//! Player specs for `local`:
//! - `s:<name>:<iterations>` an MCTS player
//! - `r:<name>:<host>` a remote player served by `jass serve` on `<host>`
//! - `x:<name>` a random player
//!
//! Every component after the type is optional.

use std::str::FromStr;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use jass_engine::core::config::HAND_SIZE;
use jass_engine::net::DEFAULT_PORT;
use jass_engine::{
    GameConfig, JassGame, MctsPlayer, Player, PlayerId, PlayerMap, RandomPlayer,
    RemotePlayerClient, RemotePlayerServer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_NAMES: [&str; 4] = ["Aline", "Bastien", "Colette", "David"];
const DEFAULT_ITERATIONS: u32 = 10_000;

#[derive(Parser)]
#[command(name = "jass")]
#[command(about = "Jass with Monte Carlo tree search players")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a game in this process
    Local {
        /// The four players, in seat order
        #[arg(num_args = 4, required = true)]
        players: Vec<PlayerSpec>,

        /// Seed of the game and of every simulated player
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },

    /// Host an MCTS player for a game running elsewhere
    Serve {
        /// Simulated turns per card
        #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u32,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

/// One `local` seat as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PlayerSpec {
    Simulated {
        name: Option<String>,
        iterations: u32,
    },
    Remote {
        name: Option<String>,
        host: String,
    },
    Random {
        name: Option<String>,
    },
}

impl PlayerSpec {
    fn name(&self) -> Option<&str> {
        match self {
            Self::Simulated { name, .. } | Self::Remote { name, .. } | Self::Random { name } => {
                name.as_deref()
            }
        }
    }
}

impl FromStr for PlayerSpec {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = spec.split(':').collect();
        let part = |i: usize| parts.get(i).copied().filter(|s| !s.is_empty());
        let name = part(1).map(String::from);

        let max_parts = match parts[0] {
            "x" => 2,
            "s" | "r" => 3,
            other => return Err(format!("player type must be s, r or x, got {other:?}")),
        };
        if parts.len() > max_parts {
            return Err(format!("too many components in {spec:?}"));
        }

        Ok(match parts[0] {
            "s" => {
                let iterations = match part(2) {
                    Some(text) => text
                        .parse()
                        .map_err(|_| format!("iterations must be an integer, got {text:?}"))?,
                    None => DEFAULT_ITERATIONS,
                };
                if (iterations as usize) < HAND_SIZE {
                    return Err(format!("at least {HAND_SIZE} iterations needed, got {iterations}"));
                }
                Self::Simulated { name, iterations }
            }
            "r" => Self::Remote {
                name,
                host: part(2).unwrap_or("localhost").to_string(),
            },
            _ => Self::Random { name },
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jass=info,jass_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Args::parse().command {
        Command::Local { players, seed } => run_local(&players, seed),
        Command::Serve {
            iterations,
            seed,
            port,
        } => run_server(iterations, seed, port),
    }
}

fn run_local(specs: &[PlayerSpec], seed: u64) -> anyhow::Result<()> {
    let config = GameConfig::new(seed);

    let mut players = Vec::with_capacity(PlayerId::COUNT);
    let mut names = Vec::with_capacity(PlayerId::COUNT);
    for ((seat, spec), default_name) in PlayerId::ALL.into_iter().zip(specs).zip(DEFAULT_NAMES) {
        let player_seed = config.player_seed(seat);
        let player: Box<dyn Player> = match spec {
            PlayerSpec::Simulated { iterations, .. } => {
                Box::new(MctsPlayer::new(seat, player_seed, *iterations)?)
            }
            PlayerSpec::Remote { host, .. } => Box::new(
                RemotePlayerClient::connect((host.as_str(), DEFAULT_PORT))
                    .with_context(|| format!("connecting {seat} to {host}:{DEFAULT_PORT}"))?,
            ),
            PlayerSpec::Random { .. } => Box::new(RandomPlayer::new(player_seed)),
        };
        players.push(player);
        names.push(spec.name().unwrap_or(default_name).to_string());
    }

    let players: [Box<dyn Player>; 4] = players
        .try_into()
        .map_err(|_| anyhow!("exactly {} players are needed", PlayerId::COUNT))?;
    let names: [String; 4] = names
        .try_into()
        .map_err(|_| anyhow!("exactly {} names are needed", PlayerId::COUNT))?;

    let game = JassGame::new(config, PlayerMap::from_array(players), PlayerMap::from_array(names))?;
    let summary = game
        .spawn()
        .join()
        .map_err(|_| anyhow!("game thread panicked"))??;

    println!(
        "{} wins after {} turns, final score {}",
        summary.winner, summary.turns, summary.score
    );
    Ok(())
}

fn run_server(iterations: u32, seed: u64, port: u16) -> anyhow::Result<()> {
    // The seat is announced by the game and replaces this one
    let player = MctsPlayer::new(PlayerId::PLAYER_1, seed, iterations)?;
    let server = RemotePlayerServer::bind(("0.0.0.0", port), player)
        .with_context(|| format!("binding port {port}"))?;
    info!("Waiting for a game on {}", server.local_addr()?);

    let player = server.run()?;
    info!(
        "Game over: {} iterations searched, {:.0} iterations/s",
        player.totals().iterations,
        player.totals().iterations_per_second()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_specs() {
        assert_eq!(
            "s:Zoe:500".parse::<PlayerSpec>().unwrap(),
            PlayerSpec::Simulated {
                name: Some("Zoe".into()),
                iterations: 500
            }
        );
        assert_eq!(
            "s".parse::<PlayerSpec>().unwrap(),
            PlayerSpec::Simulated {
                name: None,
                iterations: DEFAULT_ITERATIONS
            }
        );
        assert_eq!(
            "r::example.org".parse::<PlayerSpec>().unwrap(),
            PlayerSpec::Remote {
                name: None,
                host: "example.org".into()
            }
        );
        assert_eq!(
            "x:Max".parse::<PlayerSpec>().unwrap(),
            PlayerSpec::Random {
                name: Some("Max".into())
            }
        );
    }

    #[test]
    fn test_reject_bad_specs() {
        for spec in ["h:Max", "s:A:lots", "s:A:5", "x:A:B", "r:A:B:C", ""] {
            assert!(spec.parse::<PlayerSpec>().is_err(), "{spec:?}");
        }
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::try_parse_from(["jass", "local", "s", "x", "x:Bob", "s::50", "--seed", "3"])
            .unwrap();
        match args.command {
            Command::Local { players, seed } => {
                assert_eq!(players.len(), 4);
                assert_eq!(seed, 3);
            }
            Command::Serve { .. } => panic!("expected local"),
        }
        assert!(Args::try_parse_from(["jass", "local", "s", "x"]).is_err());
    }
}
