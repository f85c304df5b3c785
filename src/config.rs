/// What to do when a long spelling is declared a second time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Duplicates {
    /// The later declaration takes over the spelling; the earlier one is no
    /// longer reachable through it. A warning is logged.
    #[default]
    Replace,

    /// Fail with [`DuplicateDeclaration`][crate::Error::DuplicateDeclaration],
    /// the same as a repeated short spelling always does.
    Reject,
}

/// Parser-wide settings, fixed when the [`Parser`][crate::Parser] is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Policy for repeated long spellings. Short spellings are always
    /// rejected.
    pub long_duplicates: Duplicates,

    /// Whether a bare `--` ends option processing. Any token after it is
    /// positional. When disabled, `--` is an unnamed long option, which is
    /// never declared, so it fails with
    /// [`InvalidOption`][crate::Error::InvalidOption].
    pub terminator: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            long_duplicates: Duplicates::Replace,
            terminator: false,
        }
    }
}
