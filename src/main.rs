use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_arbiter::engines::engine_random::RandomEngine;
use chess_arbiter::engines::engine_trait::{EngineClient, EngineError, EngineFactory};
use chess_arbiter::engines::engine_uci::{UciEngineClient, UciEngineConfig};
use chess_arbiter::game::chess_game::{ChessGame, GameStatus, SubmitOutcome};
use chess_arbiter::game::game_mode::GameMode;
use chess_arbiter::utils::long_algebraic::encode_move;
use chess_arbiter::utils::render_game_state::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Two humans at one keyboard.
    Human,
    /// You play White against the engine.
    Engine,
    /// The engine plays both sides.
    Auto,
}

#[derive(Debug, Parser)]
#[command(version, about = "Legal-move arbiter for two-sided chess games")]
struct Args {
    /// UCI engine executable.
    #[arg(long, default_value = "stockfish")]
    engine: PathBuf,

    /// Use the built-in random mover instead of a UCI engine.
    #[arg(long)]
    random_engine: bool,

    /// Seed for the random mover.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = ModeArg::Human)]
    mode: ModeArg,

    /// Engine strength cap.
    #[arg(long, default_value_t = 1500)]
    elo: u16,

    /// Engine think time per move, in milliseconds.
    #[arg(long, default_value_t = 3000)]
    think_ms: u64,

    /// Longest wait for any engine reply; defaults to think time plus 5 s.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Args {
    fn game_mode(&self) -> GameMode {
        match self.mode {
            ModeArg::Human => GameMode::HumanVsHuman,
            ModeArg::Engine => GameMode::HumanVsEngine { rating: self.elo },
            ModeArg::Auto => GameMode::EngineVsEngine { rating: self.elo },
        }
    }

    fn engine_factory(&self) -> EngineFactory {
        if self.random_engine {
            let seed = self.seed;
            return Box::new(move || -> Result<Box<dyn EngineClient>, EngineError> {
                Ok(Box::new(match seed {
                    Some(seed) => RandomEngine::seeded(seed),
                    None => RandomEngine::new(),
                }))
            });
        }

        let think_time = Duration::from_millis(self.think_ms);
        let reply_timeout = self
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(think_time + Duration::from_secs(5));
        let config = UciEngineConfig {
            program: self.engine.clone(),
            think_time,
            reply_timeout,
            ..UciEngineConfig::default()
        };
        Box::new(move || -> Result<Box<dyn EngineClient>, EngineError> {
            Ok(Box::new(UciEngineClient::launch(config.clone())?))
        })
    }
}

const HELP: &str = "\
commands:
  <move>          play a move in long algebraic form (e2e4, e7e8q)
  new [MODE]      start over; MODE is human, engine or auto
  fen <FEN>       start a human-vs-human game from a setup
  board           show the board
  moves           list legal moves
  retry           ask the engine again after a skipped turn
  pgn             print the game as PGN
  quit            leave";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = ChessGame::with_engine_factory(args.engine_factory());
    game.new_game(args.game_mode());
    info!(mode = ?game.mode(), "arbiter started");

    print_state(&game);
    println!("{HELP}");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let trimmed = line.trim();
        let (command, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "board" => print_state(&game),
            "moves" => {
                let moves: Vec<String> = game
                    .current_position()
                    .legal_moves()
                    .iter()
                    .map(|mv| encode_move(*mv))
                    .collect();
                println!("{}", moves.join(" "));
            }
            "pgn" => print!("{}", game.to_pgn()),
            "retry" => {
                if !game.request_engine_move() {
                    println!("engine did not move");
                }
                print_state(&game);
            }
            "new" => {
                let mode = match rest.trim() {
                    "" => game.mode(),
                    text => match ModeArg::from_str(text, true) {
                        Ok(ModeArg::Human) => GameMode::HumanVsHuman,
                        Ok(ModeArg::Engine) => GameMode::HumanVsEngine { rating: args.elo },
                        Ok(ModeArg::Auto) => GameMode::EngineVsEngine { rating: args.elo },
                        Err(err) => {
                            println!("{err}");
                            continue;
                        }
                    },
                };
                game.new_game(mode);
                print_state(&game);
            }
            "fen" => match game.set_up_fen(rest) {
                Ok(()) => print_state(&game),
                Err(err) => println!("error: {err}"),
            },
            text => match game.submit_move(text) {
                Ok(SubmitOutcome::Accepted) => print_state(&game),
                Ok(SubmitOutcome::Rejected(rejection)) => println!("rejected: {rejection:?}"),
                Err(err) => println!("error: {err}"),
            },
        }
        io::stdout().flush().ok();
    }
}

fn print_state(game: &ChessGame) {
    println!("{}", render_board(game.board()));
    match game.status() {
        GameStatus::Running => {
            let check = if game.current_position().is_in_check() {
                " (check)"
            } else {
                ""
            };
            println!(
                "move {} | {:?} to move{check}",
                game.move_counter(),
                game.side_to_move()
            );
        }
        status => match game.reason() {
            Some(reason) => println!("{status:?} by {reason:?}"),
            None => println!("{status:?}"),
        },
    }
    if game.is_engine_degraded() {
        println!("engine unavailable; use `retry` or `new`");
    }
}
