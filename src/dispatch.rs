use flagbind_parser::{ArgAccess, ArgumentsParser, Visitor};

use crate::{
    Config, Error, Flag,
    handler::{Declaration, Failure, Handler, HandlerId},
    table::Table,
};

/// Routes each classified token to its handler. One `Dispatch` is built per
/// event, since [`Visitor`] methods take `self`.
struct Dispatch<'a> {
    table: &'a Table,
    declarations: &'a mut [Declaration],
}

impl Dispatch<'_> {
    fn handler(&mut self, id: HandlerId) -> &mut Handler {
        &mut self.declarations[id.0].handler
    }
}

/// Turn a handler function's rejection into an error naming the flag.
fn invalid_value(flag: Flag, argument: &str) -> impl FnOnce(Failure) -> Error {
    move |message| Error::InvalidValue {
        flag,
        argument: argument.to_owned(),
        message,
    }
}

fn rejected(flag: Flag) -> impl FnOnce(Failure) -> Error {
    move |message| Error::Rejected { flag, message }
}

impl<'arg> Visitor<'arg> for Dispatch<'_> {
    type Value = Result<(), Error>;

    fn visit_positional(self, argument: &'arg str) -> Self::Value {
        Err(Error::UnexpectedPositional(argument.to_owned()))
    }

    fn visit_long_option(mut self, option: &'arg str, argument: &'arg str) -> Self::Value {
        let flag = Flag::Long(option.to_owned());
        let id = self
            .table
            .long(option)
            .ok_or_else(|| Error::InvalidOption(flag.clone()))?;

        tracing::trace!(%flag, argument, "dispatching option");
        let spelling = flag.to_string();

        match self.handler(id) {
            Handler::ArgumentFree(_) => Err(Error::UnexpectedArgument {
                flag,
                argument: argument.to_owned(),
            }),
            Handler::ArgumentTaking(handler) => {
                handler(&spelling, argument).map_err(invalid_value(flag, argument))
            }
        }
    }

    fn visit_long(mut self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value {
        let flag = Flag::Long(option.to_owned());
        let id = self
            .table
            .long(option)
            .ok_or_else(|| Error::InvalidOption(flag.clone()))?;

        tracing::trace!(%flag, "dispatching option");
        let spelling = flag.to_string();

        match self.handler(id) {
            Handler::ArgumentFree(handler) => handler(&spelling).map_err(rejected(flag)),
            Handler::ArgumentTaking(handler) => match arg.take() {
                None => Err(Error::MissingArgument(flag)),
                Some(argument) => {
                    handler(&spelling, argument).map_err(invalid_value(flag, argument))
                }
            },
        }
    }

    fn visit_short(mut self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value {
        let flag = Flag::Short(option);
        let id = self
            .table
            .short(option)
            .ok_or_else(|| Error::InvalidOption(flag.clone()))?;

        tracing::trace!(%flag, "dispatching option");
        let spelling = flag.to_string();

        match self.handler(id) {
            Handler::ArgumentFree(handler) => handler(&spelling).map_err(rejected(flag)),
            Handler::ArgumentTaking(handler) => match arg.take() {
                None => Err(Error::MissingArgument(flag)),
                Some(argument) => {
                    handler(&spelling, argument).map_err(invalid_value(flag, argument))
                }
            },
        }
    }
}

/**
Run the whole pass: every token, left to right, each matched handler invoked
in order. The first error stops the pass; no later token is looked at.
*/
pub(crate) fn run(
    tokens: &[String],
    config: &Config,
    table: &Table,
    declarations: &mut [Declaration],
) -> Result<(), Error> {
    let mut parser =
        ArgumentsParser::new(tokens.iter().map(String::as_str)).terminator(config.terminator);

    while let Some(result) = parser.next_arg(Dispatch {
        table,
        declarations: &mut *declarations,
    }) {
        result?;
    }

    Ok(())
}
