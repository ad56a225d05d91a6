use std::str::FromStr;

use gemcascade_core::Position;

/// One line of driver input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `X Y`, or `tap X Y`: tap a cell.
    Tap(Position),
    /// `swap X1 Y1 X2 Y2`: resolve a swap directly.
    Swap(Position, Position),
    /// `show`: print the board.
    Show,
    /// `help`: print the command summary.
    Help,
    /// `quit` or `exit`: stop reading input.
    Quit,
}

pub const HELP: &str = "\
commands:
  X Y | tap X Y        tap the cell at column X, row Y (row 0 is the bottom)
  swap X1 Y1 X2 Y2     swap two adjacent cells and resolve the cascade
  show                 print the board
  help                 print this summary
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandParseError {
    #[display("unknown command {_0:?}")]
    Unknown(#[error(not(source))] String),
    #[display("invalid coordinate {_0:?}")]
    InvalidCoordinate(#[error(not(source))] String),
    #[display("{command} takes {expected} argument(s), got {found}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
}

fn coordinates<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[i32; N], CommandParseError> {
    if args.len() != N {
        return Err(CommandParseError::WrongArity {
            command,
            expected: N,
            found: args.len(),
        });
    }
    let mut values = [0; N];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = arg
            .parse()
            .map_err(|_| CommandParseError::InvalidCoordinate((*arg).to_owned()))?;
    }
    Ok(values)
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words = s.split_whitespace().collect::<Vec<_>>();
        let Some((&head, rest)) = words.split_first() else {
            return Ok(Self::Show);
        };

        match head.to_ascii_lowercase().as_str() {
            "tap" => {
                let [x, y] = coordinates("tap", rest)?;
                Ok(Self::Tap(Position::new(x, y)))
            }
            "swap" => {
                let [x1, y1, x2, y2] = coordinates("swap", rest)?;
                Ok(Self::Swap(Position::new(x1, y1), Position::new(x2, y2)))
            }
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ if head.starts_with(|c: char| c == '-' || c.is_ascii_digit()) => {
                let [x, y] = coordinates("tap", &words)?;
                Ok(Self::Tap(Position::new(x, y)))
            }
            _ => Err(CommandParseError::Unknown(head.to_owned())),
        }
    }
}
