use std::fmt;

use crate::option::OptionKind;

/// A rejected command line.
///
/// These are user-input errors: the engine reports them and leaves the
/// decision to print usage and exit to the host program. Mistakes in the
/// option declarations themselves never show up here, see [`misuse`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("bad argument -{0}: unknown option")]
    UnknownAbbreviation(char),

    #[error("bad argument --{0}: unknown option")]
    UnknownOption(String),

    #[error("bad argument {0}: syntax error")]
    Syntax(String),

    #[error("bad argument --{0}: unbalanced quote in value")]
    BadQuote(String),

    #[error("bad argument --{0}: missing argument")]
    MissingValue(String),

    #[error("bad argument -{abbreviation}: option --{name} takes a value and must end the cluster")]
    ValueInCluster { abbreviation: char, name: String },

    #[error("bad argument --{name}: '{value}' is not a valid {kind} value")]
    InvalidValue {
        name: String,
        kind: OptionKind,
        value: String,
    },

    #[error("bad argument --{name}: '{value}' overflows the {kind} range")]
    Overflow {
        name: String,
        kind: OptionKind,
        value: String,
    },

    #[error("bad argument --{name}: value {value} is outside the range {min} to {max}")]
    OutOfRange {
        name: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("bad argument --{0}: option given more than once")]
    AlreadySet(String),

    #[error("missing required option --{0}")]
    MissingRequired(String),

    #[error("argument index {index} out of range (have {count})")]
    ArgIndex { index: usize, count: usize },
}

impl Error {
    /// Stable numeric code for the failure class.
    pub fn code(&self) -> i32 {
        match self {
            Error::UnknownOption(_) => -11,
            Error::UnknownAbbreviation(_) => -14,
            Error::Syntax(_) => -12,
            Error::BadQuote(_) => -15,
            Error::MissingValue(_) => -10,
            Error::ValueInCluster { .. } => -13,
            Error::InvalidValue { .. } => -17,
            Error::Overflow { .. } => -18,
            Error::OutOfRange { .. } => -19,
            Error::AlreadySet(_) => -20,
            Error::MissingRequired(_) => -21,
            Error::ArgIndex { .. } => -22,
        }
    }

    /// Name of the option the error is about, when there is one.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Error::UnknownOption(name)
            | Error::BadQuote(name)
            | Error::MissingValue(name)
            | Error::AlreadySet(name)
            | Error::MissingRequired(name) => Some(name),
            Error::ValueInCluster { name, .. }
            | Error::InvalidValue { name, .. }
            | Error::Overflow { name, .. }
            | Error::OutOfRange { name, .. } => Some(name),
            Error::UnknownAbbreviation(_) | Error::Syntax(_) | Error::ArgIndex { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal declaration error: a bug in the host program, not bad input.
///
/// Logged at error level and then raised as a panic, which terminates the
/// process unless the caller deliberately catches it.
#[track_caller]
pub fn misuse(msg: impl fmt::Display) -> ! {
    tracing::error!("option declaration error: {}", msg);
    panic!("{}", msg);
}
