//! UCI engine client over a child process.
//!
//! Speaks the minimal UCI subset the game needs: the `uci`/`uciok`
//! handshake, thread and strength options, `position startpos moves ...`
//! followed by `go movetime`, and the `bestmove` reply. Engine output is
//! read on a background thread and handed over through a channel so every
//! wait is bounded by `reply_timeout`.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::engines::engine_trait::{EngineClient, EngineError};
use crate::game_state::chess_rules::NULL_MOVE;
use crate::game_state::chess_types::ChessMove;
use crate::utils::long_algebraic::decode_move;

#[derive(Debug, Clone)]
pub struct UciEngineConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Time the engine is given per move (`go movetime`).
    pub think_time: Duration,
    /// Upper bound on any single wait for engine output.
    pub reply_timeout: Duration,
    pub threads: usize,
}

impl Default for UciEngineConfig {
    fn default() -> Self {
        let think_time = Duration::from_millis(3000);
        let threads = thread::available_parallelism()
            .map(|n| n.get() / 2)
            .unwrap_or(1)
            .max(1);
        Self {
            program: PathBuf::from("stockfish"),
            args: Vec::new(),
            think_time,
            reply_timeout: think_time + Duration::from_secs(5),
            threads,
        }
    }
}

pub struct UciEngineClient {
    config: UciEngineConfig,
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
}

impl UciEngineClient {
    /// Spawn the engine and complete the UCI handshake.
    pub fn launch(config: UciEngineConfig) -> Result<Self, EngineError> {
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Launch {
                program: config.program.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(EngineError::Disconnected)?;
        let stdout = child.stdout.take().ok_or(EngineError::Disconnected)?;

        let (line_tx, line_rx) = mpsc::channel::<String>();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else {
                    break;
                };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut client = Self {
            config,
            child,
            stdin,
            lines: line_rx,
        };

        client.send("uci")?;
        client.wait_for(|line| line == "uciok")?;
        let threads = client.config.threads;
        client.send(&format!("setoption name Threads value {threads}"))?;
        debug!(program = %client.config.program.display(), threads, "engine ready");

        Ok(client)
    }

    fn send(&mut self, command: &str) -> Result<(), EngineError> {
        trace!(command, "-> engine");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until one matches, bounded by the reply timeout.
    fn wait_for(&mut self, matches: impl Fn(&str) -> bool) -> Result<String, EngineError> {
        let deadline = Instant::now() + self.config.reply_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    trace!(line = line.as_str(), "<- engine");
                    if matches(line.trim()) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(EngineError::Timeout(self.config.reply_timeout));
                }
                Err(RecvTimeoutError::Disconnected) => return Err(EngineError::Disconnected),
            }
        }
    }

    /// Stop a search that outlived its wait and swallow its `bestmove`.
    fn abandon_search(&mut self) {
        if self.send("stop").is_err() {
            return;
        }
        if self.wait_for(|line| line.starts_with("bestmove")).is_err() {
            debug!("abandoned search has not answered yet");
        }
    }

    /// Drop queued output and wait until the engine has caught up, so the
    /// next `bestmove` belongs to the next `go`.
    fn synchronize(&mut self) -> Result<(), EngineError> {
        while let Ok(line) = self.lines.try_recv() {
            trace!(line = line.as_str(), "discarding stale engine output");
        }
        self.send("isready")?;
        self.wait_for(|line| line == "readyok")?;
        Ok(())
    }
}

impl EngineClient for UciEngineClient {
    fn new_game(&mut self, rating: Option<u16>) -> Result<(), EngineError> {
        self.send("ucinewgame")?;
        match rating {
            Some(elo) => {
                self.send("setoption name UCI_LimitStrength value true")?;
                self.send(&format!("setoption name UCI_Elo value {elo}"))?;
            }
            None => self.send("setoption name UCI_LimitStrength value false")?,
        }
        self.send("isready")?;
        self.wait_for(|line| line == "readyok")?;
        Ok(())
    }

    fn request_move(&mut self, history: &str) -> Result<Option<ChessMove>, EngineError> {
        self.synchronize()?;
        let history = history.trim();
        if history.is_empty() {
            self.send("position startpos")?;
        } else {
            self.send(&format!("position startpos moves {history}"))?;
        }
        let movetime = self.config.think_time.as_millis();
        self.send(&format!("go movetime {movetime}"))?;

        let line = match self.wait_for(|line| line.starts_with("bestmove")) {
            Err(EngineError::Timeout(limit)) => {
                self.abandon_search();
                return Err(EngineError::Timeout(limit));
            }
            reply => reply?,
        };
        parse_bestmove(&line)
    }
}

impl Drop for UciEngineClient {
    fn drop(&mut self) {
        let _ = self.send("quit");
        for _ in 0..10 {
            if let Ok(Some(_)) = self.child.try_wait() {
                return;
            }
            thread::sleep(Duration::from_millis(50));
        }
        warn!("engine ignored quit; killing it");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Parse a `bestmove <move> [ponder <move>]` line.
pub fn parse_bestmove(line: &str) -> Result<Option<ChessMove>, EngineError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some("bestmove"), Some(NULL_MOVE | "(none)")) => Ok(None),
        (Some("bestmove"), Some(text)) => decode_move(text)
            .map(Some)
            .map_err(|_| EngineError::Protocol(line.to_owned())),
        _ => Err(EngineError::Protocol(line.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bestmove, UciEngineClient, UciEngineConfig};
    use crate::engines::engine_trait::{EngineClient, EngineError};
    use crate::utils::long_algebraic::decode_move;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn bestmove_lines() {
        assert_eq!(
            parse_bestmove("bestmove e7e5 ponder g1f3").expect("should parse"),
            Some(decode_move("e7e5").expect("move"))
        );
        assert_eq!(parse_bestmove("bestmove 0000").expect("should parse"), None);
        assert_eq!(parse_bestmove("bestmove (none)").expect("should parse"), None);
        assert!(matches!(
            parse_bestmove("bestmove xyz"),
            Err(EngineError::Protocol(_))
        ));
        assert!(matches!(
            parse_bestmove("info depth 3"),
            Err(EngineError::Protocol(_))
        ));
    }

    #[test]
    fn missing_binary_is_a_launch_error() {
        let config = UciEngineConfig {
            program: PathBuf::from("/nonexistent/engine-binary"),
            ..UciEngineConfig::default()
        };
        assert!(matches!(
            UciEngineClient::launch(config),
            Err(EngineError::Launch { .. })
        ));
    }

    #[cfg(unix)]
    fn scripted_config(script: &str) -> UciEngineConfig {
        UciEngineConfig {
            program: PathBuf::from("sh"),
            args: vec!["-c".to_owned(), script.to_owned()],
            think_time: Duration::from_millis(10),
            reply_timeout: Duration::from_millis(2000),
            threads: 1,
        }
    }

    #[cfg(unix)]
    #[test]
    fn talks_to_a_scripted_engine() {
        let script = r#"
            while read line; do
              case "$line" in
                uci) echo "id name scripted"; echo uciok ;;
                isready) echo readyok ;;
                go*) echo "info depth 1"; echo "bestmove e7e5" ;;
                quit) exit 0 ;;
              esac
            done
        "#;
        let mut engine = UciEngineClient::launch(scripted_config(script)).expect("engine should start");
        engine.new_game(Some(1500)).expect("new game should succeed");
        let reply = engine.request_move("e2e4").expect("engine should answer");
        assert_eq!(reply, Some(decode_move("e7e5").expect("move")));
    }

    #[cfg(unix)]
    #[test]
    fn late_reply_is_not_taken_for_the_next_position() {
        // The first search answers well after the reply timeout.
        let script = r#"
            searches=0
            while read line; do
              case "$line" in
                uci) echo uciok ;;
                isready) echo readyok ;;
                go*)
                  searches=$((searches + 1))
                  if [ "$searches" -eq 1 ]; then
                    sleep 0.5
                    echo "bestmove e7e5"
                  else
                    echo "bestmove g8f6"
                  fi ;;
                quit) exit 0 ;;
              esac
            done
        "#;
        let mut config = scripted_config(script);
        config.reply_timeout = Duration::from_millis(200);
        let mut engine = UciEngineClient::launch(config).expect("engine should start");

        assert!(matches!(
            engine.request_move("e2e4"),
            Err(EngineError::Timeout(_))
        ));
        let reply = engine
            .request_move("d2d4 d7d5 c2c4")
            .expect("engine should answer the second request");
        assert_eq!(reply, Some(decode_move("g8f6").expect("move")));
    }

    #[cfg(unix)]
    #[test]
    fn silent_engine_times_out() {
        let script = r#"
            while read line; do
              case "$line" in
                uci) echo uciok ;;
                quit) exit 0 ;;
              esac
            done
        "#;
        let mut config = scripted_config(script);
        config.reply_timeout = Duration::from_millis(200);
        let mut engine = UciEngineClient::launch(config).expect("engine should start");
        assert!(matches!(
            engine.request_move(""),
            Err(EngineError::Timeout(_))
        ));
    }
}
