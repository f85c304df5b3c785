#![no_std]

/*!
Low-level classification of command-line tokens. Takes care of distinctions
between long options, bundled short options, and positionals, and of where
an option's argument comes from. No handler lookup or type handling happens
here; that's the job of whatever [`Visitor`] is driving the parser.
*/

mod populated_str;

use populated_str::PopulatedStr;

/**
The [`ArgumentsParser`] type operates by passing tokens it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional token, or anything after a bare `--`.
    fn visit_positional(self, argument: &'arg str) -> Self::Value;

    /// A long option that definitely has an argument, because it was given
    /// as `--option=argument`. The argument may be empty.
    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A single character of a short option run, such as the `b` in `-abc`
    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given option needs an argument,
based on the identity of the option.

Consider `--foo bar`. Is this the flag `--foo` followed by `bar`, or the single
option `--foo bar`? Similarly, `-ab foo` could be `-a b`, `foo`; or `-a`,
`-b foo`; or `-a`, `-b`, `foo`. The [`ArgumentsParser`] can't classify these
by itself, so instead a visitor requests an argument via this trait only for
options that need one, and the parser works out where that argument comes
from.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Get an argument from the parser. This should only be called by options
    that need it; flags should simply ignore it, so that the next token is
    classified independently.

    For a short option with characters remaining in its run (`-Ifoo`), this
    returns the rest of the run and ends it. Otherwise it consumes the next
    token verbatim, even if that token looks like an option. Returns [`None`]
    if the tokens have been exhausted.
    */
    fn take(self) -> Option<&'arg str>;
}

#[derive(Debug, Clone, Copy)]
enum State<'arg> {
    Ready,
    PositionalOnly,
    ShortInProgress(PopulatedStr<'arg>),
}

/**
An `ArgumentsParser` is the main entry point into `flagbind_parser`. It
classifies one event in each call to [`next_arg`][ArgumentsParser::next_arg],
sending it to the given [`Visitor`].

The parser operates entirely on borrowed data; the ubiquitous `'arg` lifetime
refers to the borrowed tokens, which are never copied or mutated.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State<'arg>,
    terminator: bool,
    args: I,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of tokens. This list
    should *exclude* the name of the program.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            terminator: true,
            args: args.into_iter(),
        }
    }

    /// Choose whether a bare `--` ends option processing. When disabled, a
    /// bare `--` is reported as a long option with an empty name.
    #[inline]
    #[must_use]
    pub fn terminator(self, enabled: bool) -> Self {
        Self {
            terminator: enabled,
            ..self
        }
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.state = State::PositionalOnly;
        self.args.next().map(|arg| visitor.visit_positional(arg))
    }

    /// Put `self` into a `Ready` state, then return a StandardArgAccess
    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::Ready;
        StandardArgAccess { parent: self }
    }

    /// Put `self` into a `ShortInProgress` state, then return a
    /// ShortArgAccess over the rest of the run.
    #[inline]
    fn short_arg(&mut self, short: PopulatedStr<'arg>) -> ShortArgAccess<'_, 'arg> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::ShortInProgress(short);
        ShortArgAccess {
            short: short.get(),
            state: &mut self.state,
        }
    }

    /// Handle the first character of a short run. If there is remaining
    /// content in the run, it's the candidate for the argument; otherwise,
    /// the next token is the candidate.
    #[inline]
    fn handle_short_argument<V>(&mut self, short: PopulatedStr<'arg>, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        let (option, short) = short.split_first();

        match PopulatedStr::new(short) {
            None => visitor.visit_short(option, self.standard_arg()),
            Some(short) => visitor.visit_short(option, self.short_arg(short)),
        }
    }

    /// Classify the next event and hand it to `visitor`. Returns [`None`]
    /// once every token has been consumed.
    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => match self.args.next()? {
                "--" if self.terminator => self.positional_only_arg(visitor),
                argument => Some(match argument.strip_prefix("--") {
                    Some(option) => match split_once(option, b'=') {
                        Some((option, argument)) => visitor.visit_long_option(option, argument),
                        None => visitor.visit_long(option, self.standard_arg()),
                    },
                    None => match argument.strip_prefix('-').and_then(PopulatedStr::new) {
                        Some(short) => self.handle_short_argument(short, visitor),
                        None => visitor.visit_positional(argument),
                    },
                }),
            },
            State::PositionalOnly => self.positional_only_arg(visitor),
            State::ShortInProgress(short) => Some(self.handle_short_argument(short, visitor)),
        }
    }

    /// True if a bare `--` has been seen, so every remaining token is
    /// positional.
    #[inline]
    #[must_use]
    pub fn positional_only(&self) -> bool {
        matches!(self.state, State::PositionalOnly)
    }
}

/// ArgAccess implementation that gets the next token from the list.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    #[inline]
    fn take(self) -> Option<&'arg str> {
        self.parent.args.next()
    }
}

/// ArgAccess implementation that gets the remainder of a short run.
/// Handles things like `-ovalue`, which is equivalent to `-o value`.
struct ShortArgAccess<'a, 'arg> {
    short: &'arg str,
    state: &'a mut State<'arg>,
}

impl<'arg> ArgAccess<'arg> for ShortArgAccess<'_, 'arg> {
    #[inline]
    fn take(self) -> Option<&'arg str> {
        debug_assert!(
            matches!(*self.state, State::ShortInProgress(short) if short.get() == self.short)
        );

        *self.state = State::Ready;
        Some(self.short)
    }
}

/// Split on the first `delimiter`. The delimiter must be ASCII, so both
/// halves stay on char boundaries.
fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    debug_assert!(delimiter.is_ascii());

    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::{String, ToString};
    use std::vec::Vec;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Positional(String),
        LongOption(String, String),
        Long(String, Option<String>),
        Short(char, Option<String>),
    }

    /// Options named in `takes` consume an argument; everything else is a
    /// flag.
    struct Recorder<'a> {
        takes: &'a [&'a str],
    }

    impl<'arg> Visitor<'arg> for Recorder<'_> {
        type Value = Event;

        fn visit_positional(self, argument: &'arg str) -> Event {
            Event::Positional(argument.to_string())
        }

        fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Event {
            Event::LongOption(option.to_string(), argument.to_string())
        }

        fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Event {
            let argument = match self.takes.iter().any(|&name| name == option) {
                true => arg.take().map(str::to_string),
                false => None,
            };

            Event::Long(option.to_string(), argument)
        }

        fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Event {
            let mut buf = [0; 4];
            let option_str: &str = option.encode_utf8(&mut buf);
            let argument = match self.takes.iter().any(|&name| name == option_str) {
                true => arg.take().map(str::to_string),
                false => None,
            };

            Event::Short(option, argument)
        }
    }

    fn run(takes: &[&str], tokens: &[&str]) -> Vec<Event> {
        let mut parser = ArgumentsParser::new(tokens.iter().copied());
        let mut events = Vec::new();

        while let Some(event) = parser.next_arg(Recorder { takes }) {
            events.push(event);
        }

        events
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn bundled_flags_visit_each_character_in_order() {
        assert_eq!(
            run(&[], &["-abc"]),
            [
                Event::Short('a', None),
                Event::Short('b', None),
                Event::Short('c', None),
            ]
        );
    }

    #[test]
    fn short_option_takes_rest_of_run() {
        assert_eq!(
            run(&["I"], &["-Ifoo", "bar"]),
            [
                Event::Short('I', some("foo")),
                Event::Positional("bar".to_string()),
            ]
        );
    }

    #[test]
    fn short_option_at_end_of_run_takes_next_token() {
        assert_eq!(
            run(&["I"], &["-vI", "foo", "bar"]),
            [
                Event::Short('v', None),
                Event::Short('I', some("foo")),
                Event::Positional("bar".to_string()),
            ]
        );
    }

    #[test]
    fn flags_before_attached_option_in_run() {
        assert_eq!(
            run(&["o"], &["-xofile"]),
            [Event::Short('x', None), Event::Short('o', some("file"))]
        );
    }

    #[test]
    fn long_option_splits_on_first_equals() {
        assert_eq!(
            run(&[], &["--define=a=b", "--empty="]),
            [
                Event::LongOption("define".to_string(), "a=b".to_string()),
                Event::LongOption("empty".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn long_option_takes_next_token_verbatim() {
        assert_eq!(
            run(&["out"], &["--out", "--verbose", "--out"]),
            [
                Event::Long("out".to_string(), some("--verbose")),
                Event::Long("out".to_string(), None),
            ]
        );
    }

    #[test]
    fn long_flag_leaves_next_token_alone() {
        assert_eq!(
            run(&[], &["--verbose", "file"]),
            [
                Event::Long("verbose".to_string(), None),
                Event::Positional("file".to_string()),
            ]
        );
    }

    #[test]
    fn lone_dash_is_positional() {
        assert_eq!(run(&[], &["-"]), [Event::Positional("-".to_string())]);
    }

    #[test]
    fn terminator_makes_everything_positional() {
        assert_eq!(
            run(&[], &["-a", "--", "-b", "--c"]),
            [
                Event::Short('a', None),
                Event::Positional("-b".to_string()),
                Event::Positional("--c".to_string()),
            ]
        );
    }

    #[test]
    fn terminator_can_be_an_option_argument() {
        assert_eq!(
            run(&["out"], &["--out", "--", "-a"]),
            [
                Event::Long("out".to_string(), some("--")),
                Event::Short('a', None),
            ]
        );
    }

    #[test]
    fn disabled_terminator_is_an_empty_long_option() {
        let tokens = ["--"];
        let mut parser = ArgumentsParser::new(tokens.iter().copied()).terminator(false);

        assert_eq!(
            parser.next_arg(Recorder { takes: &[] }),
            Some(Event::Long(String::new(), None))
        );
        assert!(!parser.positional_only());
    }

    #[test]
    fn multibyte_short_options() {
        assert_eq!(
            run(&["é"], &["-xé€"]),
            [Event::Short('x', None), Event::Short('é', some("€"))]
        );
    }
}
