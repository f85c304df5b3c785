use crate::Flag;

/// Identifies one declaration. Several spellings may map to the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HandlerId(pub(crate) usize);

/// The message produced by a handler function that rejected an occurrence.
pub(crate) type Failure = String;

/**
The update logic of a single declaration, with its value type erased. The
boxed function owns the declaration's [`ValueCell`][crate::cell::ValueCell] and
folds each occurrence into it; the `&str` it receives first is the spelling
that matched, as typed (`-v`, `--verbose`).

There are exactly two kinds of handler and the dispatcher matches on them
exhaustively.
*/
pub(crate) enum Handler {
    /// A flag like `--verbose`; never gets an argument.
    ArgumentFree(Box<dyn FnMut(&str) -> Result<(), Failure>>),

    /// An option like `--output FILE`; always gets exactly one argument.
    ArgumentTaking(Box<dyn FnMut(&str, &str) -> Result<(), Failure>>),
}

impl Handler {
    #[inline]
    pub(crate) fn takes_argument(&self) -> bool {
        match self {
            Handler::ArgumentFree(_) => false,
            Handler::ArgumentTaking(_) => true,
        }
    }
}

/// Everything known about one declaration.
pub(crate) struct Declaration {
    /// The spellings that currently reach this handler, in declaration order.
    pub(crate) spellings: Vec<Flag>,
    pub(crate) help: Option<String>,
    pub(crate) handler: Handler,
}
