//! Inbound commands to the session controller.
//!
//! These represent operator or keypad actions, one per controller
//! operation.  The operator console parses them from text lines:
//!
//! ```text
//! insert | pin <digits> | select <account> | balance
//! deposit <n> | withdraw <n> | eject
//! ```

use core::fmt;
use core::str::FromStr;

use crate::fsm::context::{AccountId, IdError};

/// Commands that a driver can send into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    InsertCard,
    EnterPin(String),
    SelectAccount(AccountId),
    GetBalance,
    Deposit(i64),
    Withdraw(i64),
    EjectCard,
}

/// What a successfully handled command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command completed with nothing to report.
    Done,
    /// Result of a PIN check.
    PinAccepted(bool),
    /// Result of a balance inquiry.
    Balance(i64),
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "ok"),
            Self::PinAccepted(true) => write!(f, "PIN accepted"),
            Self::PinAccepted(false) => write!(f, "PIN rejected"),
            Self::Balance(b) => write!(f, "balance: {b}"),
        }
    }
}

/// Errors from [`SessionCommand::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    /// Blank line.
    Empty,
    /// The verb is not recognised.
    UnknownCommand(String),
    /// The verb needs an argument that was not given.
    MissingArgument(&'static str),
    /// An argument was given to a verb that takes none, or too many.
    UnexpectedArgument(String),
    /// The amount is not an integer.
    InvalidAmount(String),
    /// The PIN is not all digits.
    InvalidPin,
    /// The account id was rejected.
    InvalidAccount(IdError),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(verb) => write!(f, "unknown command '{verb}'"),
            Self::MissingArgument(what) => write!(f, "missing {what}"),
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument '{arg}'"),
            Self::InvalidAmount(raw) => write!(f, "invalid amount '{raw}'"),
            Self::InvalidPin => write!(f, "PIN must be digits only"),
            Self::InvalidAccount(e) => write!(f, "invalid account: {e}"),
        }
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for SessionCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?.to_ascii_lowercase();
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(ParseCommandError::UnexpectedArgument(extra.to_owned()));
        }

        let cmd = match verb.as_str() {
            "insert" => Self::InsertCard,
            "balance" => Self::GetBalance,
            "eject" => Self::EjectCard,
            "pin" => {
                let pin = arg.ok_or(ParseCommandError::MissingArgument("PIN"))?;
                if !pin.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseCommandError::InvalidPin);
                }
                return Ok(Self::EnterPin(pin.to_owned()));
            }
            "select" => {
                let raw = arg.ok_or(ParseCommandError::MissingArgument("account id"))?;
                let id = AccountId::new(raw).map_err(ParseCommandError::InvalidAccount)?;
                return Ok(Self::SelectAccount(id));
            }
            "deposit" => return parse_amount(arg).map(Self::Deposit),
            "withdraw" => return parse_amount(arg).map(Self::Withdraw),
            _ => return Err(ParseCommandError::UnknownCommand(verb)),
        };

        match arg {
            Some(a) => Err(ParseCommandError::UnexpectedArgument(a.to_owned())),
            None => Ok(cmd),
        }
    }
}

/// Amounts are parsed as signed so a negative entry reaches the controller
/// and is rejected there as an invalid amount.
fn parse_amount(arg: Option<&str>) -> Result<i64, ParseCommandError> {
    let raw = arg.ok_or(ParseCommandError::MissingArgument("amount"))?;
    raw.parse()
        .map_err(|_| ParseCommandError::InvalidAmount(raw.to_owned()))
}
