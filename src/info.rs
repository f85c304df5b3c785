use core::fmt;

use joinery::JoinableIterator;

use crate::Flag;

/**
A description of one declared option, for whatever layer prints help text.
Displays as its spellings, like `-v, --verbose`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionInfo {
    /// Every spelling that reaches this option, in declaration order
    pub spellings: Vec<Flag>,

    /// The help string given at declaration, if it wasn't empty
    pub help: Option<String>,

    /// True for argument-taking options, false for flags
    pub takes_argument: bool,
}

impl fmt::Display for OptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spellings.iter().join_with(", "))
    }
}
