//! Line-oriented command shell over a `RingDeque<TextRecord>`.
//!
//! The `ring-deque-shell` binary only reads lines and prints what [`Session`] returns;
//! parsing, execution and state rendering live here so they can be tested.
//!
//! | Command          | Effect                                  |
//! |------------------|-----------------------------------------|
//! | `pushf <text>`   | push a record at the front              |
//! | `pushb <text>`   | push a record at the back (`push` too)  |
//! | `popf`           | pop from the front (`pop` too)          |
//! | `popb`           | pop from the back                       |
//! | `clear`          | drop every record                       |
//! | `del`            | destroy the deque                       |
//! | `quit` / `exit`  | leave the shell                         |

use core::fmt;
use core::str::FromStr;

use crate::any_deque::AnyBoundedDeque;
use crate::deque::RingDeque;
use crate::error::{ConstructionError, OperationError};
use crate::record::TextRecord;
use crate::ring::RingBuffer;

/// Usage line printed for malformed input.
pub const USAGE: &str = "commands: pushf <text> | pushb <text> | popf | popb | clear | del | quit";

/// A deque operation issued from the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `pushf <text>`
    PushFront(TextRecord),
    /// `pushb <text>`
    PushBack(TextRecord),
    /// `popf`
    PopFront,
    /// `popb`
    PopBack,
    /// `clear`
    Clear,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Runs against the deque under its lock.
    Op(Op),
    /// Destroys the deque.
    Delete,
    /// Leaves the shell.
    Quit,
}

/// Why an input line was not understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Blank line.
    #[error("empty command")]
    Empty,
    /// A push without text.
    #[error("`{0}` needs a text argument")]
    MissingText(&'static str),
    /// A command that takes no argument got one.
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(&'static str),
    /// Anything else.
    #[error("unknown command `{0}`")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let push = |name: &'static str, build: fn(TextRecord) -> Op| {
            if rest.is_empty() {
                Err(ParseError::MissingText(name))
            } else {
                Ok(Command::Op(build(TextRecord::truncated(rest))))
            }
        };
        let bare = |name: &'static str, command: Command| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(ParseError::UnexpectedArgument(name))
            }
        };

        match word {
            "" => Err(ParseError::Empty),
            "pushf" => push("pushf", Op::PushFront),
            "pushb" | "push" => push("pushb", Op::PushBack),
            "popf" | "pop" => bare("popf", Command::Op(Op::PopFront)),
            "popb" => bare("popb", Command::Op(Op::PopBack)),
            "clear" => bare("clear", Command::Op(Op::Clear)),
            "del" => bare("del", Command::Delete),
            "quit" | "exit" => bare("quit", Command::Quit),
            other => Err(ParseError::Unknown(other.to_owned())),
        }
    }
}

/// Result of running an [`Op`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A push succeeded.
    Pushed,
    /// A pop returned this record.
    Popped(TextRecord),
    /// The deque was cleared.
    Cleared,
    /// The named operation was refused.
    Failed(&'static str, OperationError),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pushed => f.write_str("ok"),
            Outcome::Popped(record) => write!(f, "pop {record}"),
            Outcome::Cleared => f.write_str("cleared"),
            Outcome::Failed(op, err) => write!(f, "{op} FAILED: {err}"),
        }
    }
}

/// Runs `op` against any bounded deque. The caller holds whatever lock guards it.
pub fn execute<D>(deque: &mut D, op: Op) -> Outcome
where
    D: AnyBoundedDeque<TextRecord> + ?Sized,
{
    match op {
        Op::PushFront(record) => match deque.push_front(record) {
            Ok(()) => Outcome::Pushed,
            Err(full) => Outcome::Failed("push_front", full.into()),
        },
        Op::PushBack(record) => match deque.push_back(record) {
            Ok(()) => Outcome::Pushed,
            Err(full) => Outcome::Failed("push_back", full.into()),
        },
        Op::PopFront => match deque.pop_front() {
            Ok(record) => Outcome::Popped(record),
            Err(err) => Outcome::Failed("pop_front", err),
        },
        Op::PopBack => match deque.pop_back() {
            Ok(record) => Outcome::Popped(record),
            Err(err) => Outcome::Failed("pop_back", err),
        },
        Op::Clear => {
            deque.clear();
            Outcome::Cleared
        }
    }
}

/// Writes the ring's state: cursors, size, full/empty marker and the records front
/// to back, walked with the ring's cursors.
pub fn write_state(out: &mut impl fmt::Write, ring: &RingBuffer<TextRecord>) -> fmt::Result {
    let (begin, end) = ring.raw_cursors();
    writeln!(out, "begin,end = {begin},{end}")?;
    writeln!(out, "deque-size = {}", ring.len())?;
    if ring.is_empty() {
        writeln!(out, "the deque is EMPTY")?;
    } else if ring.is_full() {
        writeln!(out, "the deque is FULL")?;
    }
    if let (Some(mut cursor), Some(sentinel)) = (ring.begin_cursor(), ring.end_cursor()) {
        while cursor != sentinel {
            if let Some(record) = ring.at(cursor) {
                write!(out, "{record} -> ")?;
            }
            cursor = ring.advance(cursor);
        }
    }
    Ok(())
}

/// [`write_state`] collected into a `String`.
pub fn render(ring: &RingBuffer<TextRecord>) -> String {
    State(ring).to_string()
}

struct State<'a>(&'a RingBuffer<TextRecord>);

impl fmt::Display for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(f, self.0)
    }
}

/// What the shell should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print this and read the next line.
    Continue(String),
    /// Stop reading input.
    Quit,
}

/// State of one interactive run: the deque, until `del` destroys it.
#[derive(Debug)]
pub struct Session {
    deque: Option<RingDeque<TextRecord>>,
}

impl Session {
    /// Starts a session over a fresh deque of `capacity` records.
    ///
    /// # Errors
    /// Whatever [`RingDeque::new`] rejects.
    pub fn new(capacity: usize) -> Result<Self, ConstructionError> {
        Ok(Self {
            deque: Some(RingDeque::new(capacity)?),
        })
    }

    /// Returns `true` once `del` has run.
    pub fn is_destroyed(&self) -> bool {
        self.deque.is_none()
    }

    /// The live deque, for callers sharing it with other work.
    pub fn deque(&self) -> Option<&RingDeque<TextRecord>> {
        self.deque.as_ref()
    }

    /// Handles one input line.
    ///
    /// The lock is taken for the operation and the state printout together and is
    /// released before this returns, so it is never held while waiting for input.
    pub fn handle_line(&mut self, line: &str) -> Step {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseError::Empty) => return Step::Continue(String::new()),
            Err(err) => {
                tracing::debug!(%err, line, "rejected shell input");
                return Step::Continue(format!("{err}\n{USAGE}"));
            }
        };

        match command {
            Command::Quit => Step::Quit,
            Command::Delete => match self.deque.take() {
                Some(deque) => {
                    deque.destroy();
                    Step::Continue(String::from("WARNING: the deque has been destroyed"))
                }
                None => Step::Continue(String::from("the deque is already destroyed")),
            },
            Command::Op(op) => match &self.deque {
                Some(deque) => {
                    let mut guard = deque.lock();
                    let outcome = execute(&mut *guard, op);
                    let state = render(&guard);
                    guard.unlock();
                    Step::Continue(format!("{outcome}\n{state}"))
                }
                None => Step::Continue(String::from(
                    "the deque has been destroyed; only `quit` is accepted",
                )),
            },
        }
    }
}
