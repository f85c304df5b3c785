use crate::Flag;

/// Suggested exit code for every error caused by the command line itself.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Suggested exit code for errors in how options were declared or read,
/// which are bugs in the program rather than the user's fault. This is
/// `EX_SOFTWARE` from `sysexits.h`.
pub const SOFTWARE_EXIT_CODE: i32 = 70;

/**
Everything that can go wrong while declaring options or parsing arguments.

Declaration errors (`InvalidDeclaration`, `DuplicateDeclaration`,
`NotImplemented`) are returned straight from the declaring call, before any
token is looked at. Every other error comes out of the parsing pass and is
handed to whichever read triggered it, and to every later read.

Presenting the error is up to the caller; see [`Error::exit_code`].
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid option spelling {spelling:?}: {reason}")]
    InvalidDeclaration {
        spelling: String,
        reason: &'static str,
    },

    #[error("option {0} is declared more than once")]
    DuplicateDeclaration(Flag),

    #[error("positional arguments can't be declared (got {0:?})")]
    NotImplemented(String),

    #[error("unrecognized option {0}")]
    InvalidOption(Flag),

    #[error("option {0} requires an argument")]
    MissingArgument(Flag),

    #[error("option {flag} doesn't take an argument (got {argument:?})")]
    UnexpectedArgument { flag: Flag, argument: String },

    #[error("option {0} is required")]
    MissingRequiredOption(Flag),

    #[error("invalid value {argument:?} for option {flag}: {message}")]
    InvalidValue {
        flag: Flag,
        argument: String,
        message: String,
    },

    #[error("option {flag} was rejected: {message}")]
    Rejected { flag: Flag, message: String },

    #[error("unexpected positional argument {0:?}")]
    UnexpectedPositional(String),

    #[error("argument {0:?} isn't valid UTF-8")]
    InvalidUtf8(String),

    #[error("options can't be read or listed while arguments are being parsed")]
    ReentrantRead,
}

impl Error {
    /// True if this error was caused by the command line the user typed,
    /// rather than by the program declaring or reading its options wrongly.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        match self {
            Error::InvalidDeclaration { .. }
            | Error::DuplicateDeclaration(_)
            | Error::NotImplemented(_)
            | Error::ReentrantRead => false,

            Error::InvalidOption(_)
            | Error::MissingArgument(_)
            | Error::UnexpectedArgument { .. }
            | Error::MissingRequiredOption(_)
            | Error::InvalidValue { .. }
            | Error::Rejected { .. }
            | Error::UnexpectedPositional(_)
            | Error::InvalidUtf8(_) => true,
        }
    }

    /// The process exit code a caller should use when giving up because of
    /// this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.is_usage() {
            true => USAGE_EXIT_CODE,
            false => SOFTWARE_EXIT_CODE,
        }
    }
}
