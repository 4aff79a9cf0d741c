//! A line-oriented command interpreter driving one queue through the [`handle`](crate::handle)
//! functions.
//!
//! ```text
//! new
//! it x10 2      # insert "x10" at the tail twice
//! ih x2
//! sort
//! show          # q = [x2 x10 x10]
//! rh x2
//! size 2
//! free
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, warn};
use thiserror::Error;

use crate::{handle, Queue};

/// Upper bound for the `N` of `ih`/`it`, so one line can't exhaust memory.
const MAX_REPEAT: usize = 1_000_000;

const HELP: &str = "\
commands:
  new               create a new queue, releasing the current one
  free              release the current queue
  ih STR [N]        insert STR at the head N times (N at most 1000000)
  it STR [N]        insert STR at the tail N times (N at most 1000000)
  rh [EXPECTED]     remove the head, optionally checking its value
  size [EXPECTED]   print the number of values, optionally checking it
  reverse           reverse the queue in place
  sort              sort the queue in natural order
  show              print the queue
  help              print this text
  quit              stop reading commands";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("cannot repeat an insertion {0} times, the limit is {max}", max = MAX_REPEAT)]
    TooManyRepeats(usize),
    #[error("`{0}` failed")]
    Failed(&'static str),
    #[error("expected {expected:?}, got {actual:?}")]
    Mismatch { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Free,
    InsertHead { value: String, repeat: usize },
    InsertTail { value: String, repeat: usize },
    RemoveHead { expected: Option<String> },
    Size { expected: Option<usize> },
    Reverse,
    Sort,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let line = line.split_once('#').map_or(line, |(code, _comment)| code);
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args = words.collect::<Vec<_>>();

        let command = match (name, args.as_slice()) {
            ("new", []) => Self::New,
            ("free", []) => Self::Free,
            ("ih", [value, rest @ ..]) => Self::InsertHead {
                value: value.to_string(),
                repeat: parse_repeat(rest, "ih STR [N]")?,
            },
            ("it", [value, rest @ ..]) => Self::InsertTail {
                value: value.to_string(),
                repeat: parse_repeat(rest, "it STR [N]")?,
            },
            ("rh", []) => Self::RemoveHead { expected: None },
            ("rh", [expected]) => Self::RemoveHead {
                expected: Some(expected.to_string()),
            },
            ("size", []) => Self::Size { expected: None },
            ("size", [expected]) => Self::Size {
                expected: Some(parse_number(expected)?),
            },
            ("reverse", []) => Self::Reverse,
            ("sort", []) => Self::Sort,
            ("show", []) => Self::Show,
            ("help", _) => Self::Help,
            ("quit", _) => Self::Quit,
            ("new", _) => return Err(ConsoleError::Usage("new")),
            ("free", _) => return Err(ConsoleError::Usage("free")),
            ("reverse", _) => return Err(ConsoleError::Usage("reverse")),
            ("sort", _) => return Err(ConsoleError::Usage("sort")),
            ("show", _) => return Err(ConsoleError::Usage("show")),
            ("ih", _) => return Err(ConsoleError::Usage("ih STR [N]")),
            ("it", _) => return Err(ConsoleError::Usage("it STR [N]")),
            ("rh", _) => return Err(ConsoleError::Usage("rh [EXPECTED]")),
            ("size", _) => return Err(ConsoleError::Usage("size [EXPECTED]")),
            (unknown, _) => return Err(ConsoleError::UnknownCommand(unknown.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_repeat(rest: &[&str], usage: &'static str) -> Result<usize, ConsoleError> {
    match rest {
        [] => Ok(1),
        [count] => match parse_number(count)? {
            repeat if repeat > MAX_REPEAT => Err(ConsoleError::TooManyRepeats(repeat)),
            repeat => Ok(repeat),
        },
        _ => Err(ConsoleError::Usage(usage)),
    }
}

fn parse_number(word: &str) -> Result<usize, ConsoleError> {
    word.parse()
        .map_err(|_| ConsoleError::InvalidNumber(word.to_string()))
}

/// Holds the queue under test between commands. It starts out absent, like a handle that was
/// never created.
pub struct Console {
    queue: Option<Box<Queue>>,
    buffer_size: usize,
    failures: usize,
}

impl Console {
    /// `buffer_size` is the capacity of the buffer `rh` removes values into.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            queue: None,
            buffer_size,
            failures: 0,
        }
    }

    /// Executes commands from `input` until it runs dry or `quit` is read, writing results to
    /// `out`. Returns how many commands failed.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
        echo: bool,
    ) -> io::Result<usize> {
        for line in input.lines() {
            let line = line?;
            if echo {
                writeln!(out, "cmd> {line}")?;
            }

            let result = Command::parse(&line).and_then(|command| match command {
                Some(Command::Quit) => Ok(None),
                Some(command) => self.execute(&command).map(Some),
                None => Ok(Some(None)),
            });

            match result {
                Ok(None) => break,
                Ok(Some(Some(text))) => writeln!(out, "{text}")?,
                Ok(Some(None)) => {}
                Err(err) => {
                    self.failures += 1;
                    warn!("{line:?}: {err}");
                    writeln!(out, "ERROR: {err}")?;
                }
            }
        }

        out.flush()?;
        Ok(self.failures)
    }

    /// Executes a single command, returning the text it prints, if any.
    pub fn execute(&mut self, command: &Command) -> Result<Option<String>, ConsoleError> {
        debug!("executing {command:?}");

        match command {
            Command::New => {
                handle::free(self.queue.take());
                self.queue = handle::new();
                if self.queue.is_none() {
                    return Err(ConsoleError::Failed("new"));
                }
                Ok(Some(self.show()))
            }
            Command::Free => {
                handle::free(self.queue.take());
                Ok(Some(self.show()))
            }
            Command::InsertHead { value, repeat } => {
                for _ in 0..*repeat {
                    if !handle::insert_head(self.queue.as_deref_mut(), value) {
                        return Err(ConsoleError::Failed("ih"));
                    }
                }
                Ok(Some(self.show()))
            }
            Command::InsertTail { value, repeat } => {
                for _ in 0..*repeat {
                    if !handle::insert_tail(self.queue.as_deref_mut(), value) {
                        return Err(ConsoleError::Failed("it"));
                    }
                }
                Ok(Some(self.show()))
            }
            Command::RemoveHead { expected } => {
                let mut buf = vec![0; self.buffer_size];
                if !handle::remove_head(self.queue.as_deref_mut(), Some(buf.as_mut_slice())) {
                    return Err(ConsoleError::Failed("rh"));
                }

                let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
                let removed = String::from_utf8_lossy(&buf[..end]).into_owned();
                match expected {
                    Some(expected) if *expected != removed => Err(ConsoleError::Mismatch {
                        expected: expected.clone(),
                        actual: removed,
                    }),
                    _ => Ok(Some(format!("removed {removed:?}\n{}", self.show()))),
                }
            }
            Command::Size { expected } => {
                let size = handle::size(self.queue.as_deref());
                match expected {
                    Some(expected) if *expected != size => Err(ConsoleError::Mismatch {
                        expected: expected.to_string(),
                        actual: size.to_string(),
                    }),
                    _ => Ok(Some(format!("size = {size}"))),
                }
            }
            Command::Reverse => {
                handle::reverse(self.queue.as_deref_mut());
                Ok(Some(self.show()))
            }
            Command::Sort => {
                handle::sort(self.queue.as_deref_mut());
                Ok(Some(self.show()))
            }
            Command::Show => Ok(Some(self.show())),
            Command::Help => Ok(Some(HELP.to_string())),
            Command::Quit => Ok(None),
        }
    }

    fn show(&self) -> String {
        match &self.queue {
            Some(queue) => format!("q = [{}]", queue.iter().collect::<Vec<_>>().join(" ")),
            None => "q = NULL".to_string(),
        }
    }
}
