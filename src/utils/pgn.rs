//! PGN export and import for recorded games.
//!
//! Movetext is written in the same long algebraic form the game records
//! (`1. e2e4 e7e5 2. g1f3 ...`). Games that start from a custom setup carry
//! `SetUp`/`FEN` headers so they can be replayed.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::utils::fen_parser::parse_fen_setup;
use crate::utils::long_algebraic::decode_move;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub moves: Vec<String>,
    pub final_position: Position,
    pub result: String,
}

/// PGN for a game played today.
pub fn write_pgn(history: &[String], result: &str, setup_fen: Option<&str>) -> String {
    write_pgn_dated(history, result, setup_fen, Local::now().date_naive())
}

pub fn write_pgn_dated(
    history: &[String],
    result: &str,
    setup_fen: Option<&str>,
    date: NaiveDate,
) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Chess Arbiter Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), date.format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    if let Some(fen) = setup_fen {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), fen.to_owned());
    }

    write_pgn_with_headers(history, &headers)
}

pub fn write_pgn_with_headers(history: &[String], headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    // A setup with Dark to move starts the movetext with "N...".
    let (first_number, dark_first) = headers
        .get("FEN")
        .and_then(|fen| parse_fen_setup(fen).ok())
        .map(|setup| {
            (
                setup.fullmove_number as usize,
                setup.position.side_to_move() == Color::Dark,
            )
        })
        .unwrap_or((1, false));

    let mut movetext_parts = Vec::<String>::with_capacity(history.len() + 1);
    let offset = usize::from(dark_first);
    for (ply, lan) in history.iter().enumerate() {
        let shifted = ply + offset;
        let number = first_number + shifted / 2;
        if shifted % 2 == 0 {
            movetext_parts.push(format!("{number}. {lan}"));
        } else if ply == 0 {
            movetext_parts.push(format!("{number}... {lan}"));
        } else {
            movetext_parts.push(lan.clone());
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Parse PGN text whose movetext is long algebraic, replaying every move.
pub fn read_pgn(pgn: &str) -> Result<PgnGame, ChessErrors> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext = String::new();

    for line in pgn.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with('[') {
            let (key, value) = parse_header_line(line)?;
            headers.insert(key, value);
        } else {
            movetext.push_str(line);
            movetext.push(' ');
        }
    }

    let mut position = match (headers.get("SetUp").map(String::as_str), headers.get("FEN")) {
        (Some("1"), Some(fen)) => parse_fen_setup(fen)?.position,
        (Some("1"), None) => {
            return Err(ChessErrors::InvalidPgn(
                "SetUp is present but FEN is missing".to_owned(),
            ))
        }
        _ => Position::new(),
    };

    let mut moves = Vec::<String>::new();
    let mut result = "*".to_owned();

    for token in movetext_tokens(&movetext) {
        if RESULT_TOKENS.contains(&token) {
            result = token.to_owned();
            break;
        }

        let mv = position
            .resolve(decode_move(token)?)
            .ok_or_else(|| ChessErrors::IllegalMoveInHistory(token.to_owned()))?;
        position = position.apply(mv);
        moves.push(token.to_ascii_lowercase());
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        moves,
        final_position: position,
        result,
    })
}

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// `[Key "Value"]` with `\"` unescaped inside the value.
fn parse_header_line(line: &str) -> Result<(String, String), ChessErrors> {
    let invalid = || ChessErrors::InvalidPgn(format!("bad header line: {line}"));
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, quoted) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = quoted
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;
    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

/// Move and result tokens with comments, variations, move numbers and
/// annotation glyphs removed.
fn movetext_tokens(movetext: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (at, ch) in movetext.char_indices() {
        let boundary = matches!(ch, '{' | '}' | '(' | ')') || ch.is_whitespace();
        if boundary {
            if let Some(from) = start.take() {
                if depth == 0 {
                    tokens.push(&movetext[from..at]);
                }
            }
            match ch {
                '{' | '(' => depth += 1,
                '}' | ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(at);
        }
    }
    if let (Some(from), 0) = (start, depth) {
        tokens.push(&movetext[from..]);
    }

    tokens
        .into_iter()
        .map(|token| token.trim_end_matches(['+', '#', '!', '?']))
        .filter(|token| !token.is_empty() && !is_move_number(token))
        .collect()
}

fn is_move_number(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn normalize_result(result: &str) -> &str {
    if RESULT_TOKENS.contains(&result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
