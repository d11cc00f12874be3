//! Line-oriented command interface used by the `todo` binary.
//!
//! Commands address todos by their 1-based display position; the mapping to
//! ids happens against the snapshot on screen.

use crate::store::{TodoStore, liked_count, saved_count};
use crate::types::{Snapshot, TodoId};
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Usage line printed for unknown or malformed commands
pub const USAGE: &str =
    "commands: add <text> | like <n> | save <n> | rm <n> | list | json | help | quit (or exit)";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <text>`
    Add(String),
    /// `like <n>`
    Like(usize),
    /// `save <n>`
    Save(usize),
    /// `rm <n>`
    Remove(usize),
    /// `list`
    List,
    /// `json`
    Json,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Why a line did not parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    /// First word is not a known command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// Position argument missing or not a positive integer
    #[error("Expected a position (1, 2, ...) after `{command}`, got {argument:?}")]
    InvalidPosition {
        /// Command word
        command: &'static str,
        /// What followed it
        argument: String,
    },
}

fn position(command: &'static str, argument: &str) -> Result<usize, ParseCommandError> {
    match argument.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseCommandError::InvalidPosition {
            command,
            argument: argument.trim().to_string(),
        }),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word {
            // Text is passed through as typed; the store decides what blank means
            "add" => Ok(Self::Add(rest.to_string())),
            "like" => position("like", rest).map(Self::Like),
            "save" => position("save", rest).map(Self::Save),
            "rm" => position("rm", rest).map(Self::Remove),
            "list" => Ok(Self::List),
            "json" => Ok(Self::Json),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// What the binary should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Output(String),
    /// Stop reading input
    Quit,
}

/// Render a snapshot as numbered lines followed by the badge line.
///
/// ```
/// use todo::{TodoStore, cli::render};
///
/// let mut store = TodoStore::new();
/// let snapshot = store.add("buy milk");
/// assert_eq!(render(&snapshot), "1. buy milk\n♥ 0  💾 0");
/// ```
#[must_use]
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    if snapshot.is_empty() {
        out.push_str("(no todos)\n");
    }

    for (n, todo) in snapshot.iter().enumerate() {
        let _ = write!(out, "{}. {}", n + 1, todo.value);
        if todo.is_liked {
            out.push_str(" ♥");
        }
        if todo.is_saved {
            out.push_str(" 💾");
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "♥ {}  💾 {}",
        liked_count(snapshot),
        saved_count(snapshot)
    );
    out
}

/// Id shown at 1-based position `n`; `None` for 0 or past the end
fn id_at(snapshot: &Snapshot, n: usize) -> Option<TodoId> {
    n.checked_sub(1)
        .and_then(|index| snapshot.as_slice().get(index))
        .map(|todo| todo.id)
}

fn out_of_range(snapshot: &Snapshot, n: usize) -> Reply {
    tracing::debug!(position = n, len = snapshot.len(), "Position out of range");
    Reply::Output(format!(
        "no todo at position {n}\n{}",
        render(snapshot)
    ))
}

/// Run one command against `store`.
///
/// Position 0 and positions past the end of the list leave the store
/// untouched and report it in the output.
///
/// # Errors
///
/// Returns an error only if the `json` command fails to serialize.
pub fn execute(store: &mut TodoStore, command: Command) -> Result<Reply, serde_json::Error> {
    let current = store.snapshot();

    let next = match command {
        Command::Add(text) => store.add(text),
        Command::Like(n) => match id_at(&current, n) {
            Some(id) => store.toggle_liked(id),
            None => return Ok(out_of_range(&current, n)),
        },
        Command::Save(n) => match id_at(&current, n) {
            Some(id) => store.toggle_saved(id),
            None => return Ok(out_of_range(&current, n)),
        },
        Command::Remove(n) => match id_at(&current, n) {
            Some(id) => store.remove(id),
            None => return Ok(out_of_range(&current, n)),
        },
        Command::List => current,
        Command::Json => return serde_json::to_string_pretty(&current).map(Reply::Output),
        Command::Help => return Ok(Reply::Output(USAGE.to_string())),
        Command::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Output(render(&next)))
}
