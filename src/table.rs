use std::collections::HashMap;

use crate::{Duplicates, Error, Flag, handler::HandlerId};

/**
Parse a declared spelling into a [`Flag`]. `--name` is long and needs at least
one character; `-x` is short and needs exactly one. Anything else would be a
positional declaration, which isn't supported.
*/
pub(crate) fn classify(spelling: &str) -> Result<Flag, Error> {
    let invalid = |reason: &'static str| Error::InvalidDeclaration {
        spelling: spelling.to_owned(),
        reason,
    };

    if let Some(long) = spelling.strip_prefix("--") {
        return match long {
            "" => Err(invalid("long options need at least one character")),
            long if long.contains('=') => Err(invalid("long options can't contain '='")),
            long => Ok(Flag::Long(long.to_owned())),
        };
    }

    if let Some(short) = spelling.strip_prefix('-') {
        let mut chars = short.chars();

        return match (chars.next(), chars.next()) {
            (Some(short), None) => Ok(Flag::Short(short)),
            _ => Err(invalid("short options are exactly one character")),
        };
    }

    Err(Error::NotImplemented(spelling.to_owned()))
}

/// Maps each short character and each long name to the handler that owns it.
/// The two key spaces are separate.
#[derive(Debug, Default)]
pub(crate) struct Table {
    short: HashMap<char, HandlerId>,
    long: HashMap<String, HandlerId>,
}

impl Table {
    #[inline]
    pub(crate) fn short(&self, option: char) -> Option<HandlerId> {
        self.short.get(&option).copied()
    }

    #[inline]
    pub(crate) fn long(&self, option: &str) -> Option<HandlerId> {
        self.long.get(option).copied()
    }

    /**
    Register every flag in `flags` for `id`. Either all of them are
    registered, or (on error) none are.

    A short flag that is already taken is always an error, even if it's
    repeated within `flags` itself. A long flag that is already taken is
    handled according to `long_duplicates`; on replacement, the id that lost
    the spelling is returned alongside it.
    */
    pub(crate) fn register(
        &mut self,
        flags: &[Flag],
        id: HandlerId,
        long_duplicates: Duplicates,
    ) -> Result<Vec<(HandlerId, Flag)>, Error> {
        for (i, flag) in flags.iter().enumerate() {
            let repeated = flags[..i].contains(flag);

            let taken = match flag {
                Flag::Short(short) => repeated || self.short.contains_key(short),
                Flag::Long(long) => {
                    long_duplicates == Duplicates::Reject
                        && (repeated || self.long.contains_key(long))
                }
            };

            if taken {
                return Err(Error::DuplicateDeclaration(flag.clone()));
            }
        }

        let mut replaced = Vec::new();

        for flag in flags {
            match flag {
                Flag::Short(short) => {
                    self.short.insert(*short, id);
                }
                Flag::Long(long) => {
                    if let Some(previous) = self.long.insert(long.clone(), id) {
                        if previous != id {
                            tracing::warn!(
                                flag = %flag,
                                "long option declared again; the earlier declaration is replaced"
                            );
                            replaced.push((previous, flag.clone()));
                        }
                    }
                }
            }
        }

        Ok(replaced)
    }
}
