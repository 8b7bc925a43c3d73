//! Line commands for the interactive plan session.

use discharge_core::models::recovery_plan::PlanId;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  list                 show the plan list and the selected plan
  show                 same as list
  select <id|number>   select a plan by id or by its position in the list
  toggle <day> <task>  tick or untick a task of the selected plan
  reload               fetch the plans again (discards ticks)
  help                 show this help
  quit                 leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Select(PlanRef),
    /// Zero-based day and task indexes.
    Toggle { day: usize, task: usize },
    Reload,
    Help,
    Quit,
}

/// How a plan was named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanRef {
    Id(PlanId),
    /// Zero-based position in the listing.
    Position(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("type a command, or `help`")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line. Day and task numbers are 1-based as displayed.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("list" | "ls" | "show", []) => Ok(Command::Show),
        ("select" | "sel", [target]) => Ok(Command::Select(plan_ref(target))),
        ("select" | "sel", _) => Err(ParseError::Usage("select <id|number>")),
        ("toggle" | "t", [day, task]) => match (one_based(day), one_based(task)) {
            (Some(day), Some(task)) => Ok(Command::Toggle { day, task }),
            _ => Err(ParseError::Usage("toggle <day> <task>, both counted from 1")),
        },
        ("toggle" | "t", _) => Err(ParseError::Usage("toggle <day> <task>")),
        ("reload", []) => Ok(Command::Reload),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit" | "q", _) => Ok(Command::Quit),
        _ => Err(ParseError::Unknown(head.to_string())),
    }
}

fn one_based(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

// A bare number is a list position; anything else is an id. Ids that look
// like numbers can be given with a leading `#`.
fn plan_ref(word: &str) -> PlanRef {
    if let Some(id) = word.strip_prefix('#') {
        return PlanRef::Id(PlanId::from(id));
    }
    match one_based(word) {
        Some(position) => PlanRef::Position(position),
        None => PlanRef::Id(PlanId::from(word)),
    }
}
