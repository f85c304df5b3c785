/*!
Typed command-line option bindings backed by a single, lazily-run pass over
the argument tokens.

Declare each option against a [`Parser`], getting back a [`Binding`]. The
first time any binding is read, every token is scanned exactly once and each
matched option's handler function folds its occurrences into a value. All
bindings declared against the same parser share that one pass, and its
outcome:

```
use flagbind::Parser;

let parser = Parser::new(["-vv", "-I", "include", "--jobs=4"]);

let verbose = parser.count(["-v", "--verbose"], "print more details").unwrap();
let include = parser.list::<String>(["-I"], "add an include path").unwrap();
let jobs = parser.value::<u32>(["-j", "--jobs"], "parallel jobs").unwrap().with_default(1);

assert_eq!(jobs.get(), Ok(4));
assert_eq!(verbose.get(), Ok(2));
assert_eq!(include.get(), Ok(vec!["include".to_owned()]));
```

Options are declared either as argument-free flags (toggles, counters) with
[`Parser::flag`], or as argument-taking options with [`Parser::option`]. The
handler function receives the previous value, if any, so accumulation is just
a matter of how that previous value is folded into the next one. Common
shapes are provided as [`switch`][Parser::switch], [`count`][Parser::count],
[`value`][Parser::value], [`list`][Parser::list] and
[`choice`][Parser::choice].

Printing errors and exiting is left to the caller; every [`Error`] carries a
suggested [exit code][Error::exit_code].
*/

mod cell;
mod config;
mod dispatch;
mod error;
mod handler;
mod impls;
mod info;
mod parser;
mod table;

use core::fmt;

pub use crate::config::{Config, Duplicates};
pub use crate::error::{Error, SOFTWARE_EXIT_CODE, USAGE_EXIT_CODE};
pub use crate::info::OptionInfo;
pub use crate::parser::{Binding, Parser};

/// A single option spelling, as it would appear on the command line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    /// A single-character option, like `-v`
    Short(char),

    /// A multi-character option, like `--verbose`. The name never includes
    /// the leading dashes.
    Long(String),
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Short(short) => write!(f, "-{short}"),
            Flag::Long(long) => write!(f, "--{long}"),
        }
    }
}
