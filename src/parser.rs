use core::fmt::Display;
use std::{
    cell::{Cell, OnceCell, Ref, RefCell},
    collections::HashSet,
    rc::Rc,
};

use crate::{
    Config, Error, Flag, OptionInfo, dispatch,
    cell::ValueCell,
    handler::{Declaration, Handler, HandlerId},
    table::{self, Table},
};

#[derive(Default)]
struct Registry {
    table: Table,
    declarations: Vec<Declaration>,
}

/// The state shared by a parser and all of its bindings.
struct Shared {
    tokens: Vec<String>,
    config: Config,
    registry: RefCell<Registry>,

    /// The one-shot latch. Empty until the first read; afterwards, the
    /// cached outcome of the single pass.
    outcome: OnceCell<Result<(), Error>>,

    /// Set while the pass is running, so that a handler function reading a
    /// binding gets an error instead of re-entering the latch.
    running: Cell<bool>,
}

impl Shared {
    fn started(&self) -> bool {
        self.running.get() || self.outcome.get().is_some()
    }

    fn outcome(&self) -> Result<(), Error> {
        if self.running.get() {
            return Err(Error::ReentrantRead);
        }

        self.outcome
            .get_or_init(|| {
                tracing::debug!(tokens = self.tokens.len(), "parsing arguments");

                self.running.set(true);
                let result = {
                    let mut registry = self.registry.borrow_mut();
                    let Registry {
                        table,
                        declarations,
                    } = &mut *registry;

                    dispatch::run(&self.tokens, &self.config, table, declarations)
                };
                self.running.set(false);

                match &result {
                    Ok(()) => tracing::debug!("arguments parsed"),
                    Err(error) => tracing::debug!(%error, "parsing arguments failed"),
                }

                result
            })
            .clone()
    }
}

/**
The registration table for one sequence of argument tokens.

Options are declared with [`flag`][Parser::flag] and
[`option`][Parser::option] (or one of the typed shortcuts), each returning a
[`Binding`]. Nothing is parsed until one of the bindings is read, or until
[`parse`][Parser::parse] is called; then every token is scanned exactly once
and every binding sees the result.

`Parser` is a cheap handle; clones share the same table and the same pass.
*/
#[derive(Clone)]
pub struct Parser {
    shared: Rc<Shared>,
}

impl Parser {
    /// Create a parser over `tokens`, which should *exclude* the program
    /// name.
    pub fn new<T>(tokens: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<String>,
    {
        Self::with_config(tokens, Config::default())
    }

    pub fn with_config<T>(tokens: impl IntoIterator<Item = T>, config: Config) -> Self
    where
        T: Into<String>,
    {
        Self {
            shared: Rc::new(Shared {
                tokens: tokens.into_iter().map(Into::into).collect(),
                config,
                registry: RefCell::default(),
                outcome: OnceCell::new(),
                running: Cell::new(false),
            }),
        }
    }

    /// Create a parser over the process's arguments, skipping the program
    /// name. Fails if any argument isn't valid UTF-8.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with_config(Config::default())
    }

    pub fn from_env_with_config(config: Config) -> Result<Self, Error> {
        let tokens = std::env::args_os()
            .skip(1)
            .map(|arg| {
                arg.into_string()
                    .map_err(|arg| Error::InvalidUtf8(arg.to_string_lossy().into_owned()))
            })
            .collect::<Result<Vec<String>, Error>>()?;

        Ok(Self::with_config(tokens, config))
    }

    /**
    Run the pass now, if it hasn't run yet, and return its outcome. Reading
    any binding does this implicitly; calling it directly is useful to fail
    fast on a bad command line before reading anything.
    */
    pub fn parse(&self) -> Result<(), Error> {
        self.shared.outcome()
    }

    /// Describe every declared option, in declaration order. Options whose
    /// every spelling has been taken over by a later declaration are
    /// omitted. Fails with [`Error::ReentrantRead`] when called from inside
    /// a handler function.
    pub fn options(&self) -> Result<Vec<OptionInfo>, Error> {
        let registry = self
            .shared
            .registry
            .try_borrow()
            .map_err(|_| Error::ReentrantRead)?;

        Ok(registry
            .declarations
            .iter()
            .filter(|declaration| !declaration.spellings.is_empty())
            .map(|declaration| OptionInfo {
                spellings: declaration.spellings.clone(),
                help: declaration.help.clone(),
                takes_argument: declaration.handler.takes_argument(),
            })
            .collect())
    }

    /**
    Declare an argument-free flag. `handler` is called once per occurrence
    of any of `spellings`, with the previous value (or the default, or
    `None`) and the spelling that matched. Its result becomes the new value.
    */
    pub fn flag<'s, T, F>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
        mut handler: F,
    ) -> Result<Binding<T>, Error>
    where
        T: 'static,
        F: FnMut(Option<T>, &str) -> T + 'static,
    {
        self.try_flag(spellings, help, move |previous, name| {
            Ok::<T, core::convert::Infallible>(handler(previous, name))
        })
    }

    /**
    Declare an argument-taking option. `handler` is called once per
    occurrence of any of `spellings`, with the previous value (or the
    default, or `None`), the spelling that matched, and the argument.
    */
    pub fn option<'s, T, F>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
        mut handler: F,
    ) -> Result<Binding<T>, Error>
    where
        T: 'static,
        F: FnMut(Option<T>, &str, &str) -> T + 'static,
    {
        self.try_option(spellings, help, move |previous, name, argument| {
            Ok::<T, core::convert::Infallible>(handler(previous, name, argument))
        })
    }

    /// Like [`flag`][Parser::flag], but `handler` may reject an occurrence,
    /// which fails the whole pass with [`Error::Rejected`].
    pub fn try_flag<'s, T, E, F>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
        mut handler: F,
    ) -> Result<Binding<T>, Error>
    where
        T: 'static,
        E: Display,
        F: FnMut(Option<T>, &str) -> Result<T, E> + 'static,
    {
        let cell = Rc::new(RefCell::new(ValueCell::unset()));
        let slot = Rc::clone(&cell);

        let handler = Handler::ArgumentFree(Box::new(move |name: &str| {
            slot.borrow_mut()
                .update(|previous| handler(previous, name))
                .map_err(|error| error.to_string())
        }));

        self.declare(spellings, help, handler, cell)
    }

    /// Like [`option`][Parser::option], but `handler` may reject an
    /// argument, which fails the whole pass with [`Error::InvalidValue`].
    pub fn try_option<'s, T, E, F>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
        mut handler: F,
    ) -> Result<Binding<T>, Error>
    where
        T: 'static,
        E: Display,
        F: FnMut(Option<T>, &str, &str) -> Result<T, E> + 'static,
    {
        let cell = Rc::new(RefCell::new(ValueCell::unset()));
        let slot = Rc::clone(&cell);

        let handler = Handler::ArgumentTaking(Box::new(move |name: &str, argument: &str| {
            slot.borrow_mut()
                .update(|previous| handler(previous, name, argument))
                .map_err(|error| error.to_string())
        }));

        self.declare(spellings, help, handler, cell)
    }

    fn declare<'s, T>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
        handler: Handler,
        cell: Rc<RefCell<ValueCell<T>>>,
    ) -> Result<Binding<T>, Error> {
        let mut spellings = spellings
            .into_iter()
            .map(table::classify)
            .collect::<Result<Vec<Flag>, Error>>()?;

        let Some(primary) = spellings.first().cloned() else {
            return Err(Error::InvalidDeclaration {
                spelling: String::new(),
                reason: "an option needs at least one spelling",
            });
        };

        if self.shared.started() {
            return Err(Error::InvalidDeclaration {
                spelling: primary.to_string(),
                reason: "options can't be declared after parsing has started",
            });
        }

        let mut registry = self.shared.registry.borrow_mut();
        let id = HandlerId(registry.declarations.len());

        let long_duplicates = self.shared.config.long_duplicates;
        let replaced = registry.table.register(&spellings, id, long_duplicates)?;

        for (previous, flag) in replaced {
            registry.declarations[previous.0]
                .spellings
                .retain(|spelling| *spelling != flag);
        }

        // Repeated long spellings are allowed under `Duplicates::Replace`
        let mut seen = HashSet::new();
        spellings.retain(|flag| seen.insert(flag.clone()));

        tracing::trace!(flag = %primary, "declared option");

        registry.declarations.push(Declaration {
            spellings,
            help: match help {
                "" => None,
                help => Some(help.to_owned()),
            },
            handler,
        });

        Ok(Binding {
            shared: Rc::clone(&self.shared),
            cell,
            flag: primary,
        })
    }
}

/**
A typed handle to one declared option's value.

Reading a binding runs the parser's single pass if it hasn't run yet. Reads
are idempotent: they never re-scan the tokens, and every read returns the same
value, or the same error.

Clones are handles to the same value.
*/
pub struct Binding<T> {
    shared: Rc<Shared>,
    cell: Rc<RefCell<ValueCell<T>>>,
    flag: Flag,
}

// Not derived; a derive would require `T: Clone`
impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            cell: Rc::clone(&self.cell),
            flag: self.flag.clone(),
        }
    }
}

impl<T> Binding<T> {
    /**
    Seed the value, so that it's what gets read if the option never appears,
    and what the handler function sees as the previous value on the first
    occurrence. If the pass has already run, this only fills in a value that
    is still unset. Called from inside the option's own handler function, it
    does nothing.
    */
    #[must_use]
    pub fn with_default(self, value: T) -> Self {
        // The cell is busy while its own handler function runs
        if let Ok(mut cell) = self.cell.try_borrow_mut() {
            if !self.shared.started() || !cell.is_set() {
                cell.replace(value);
            }
        }

        self
    }

    /// The first spelling the option was declared with; used to name the
    /// option in [`Error::MissingRequiredOption`].
    #[inline]
    #[must_use]
    pub fn flag(&self) -> &Flag {
        &self.flag
    }

    /// Borrow the parsed value. Fails with the pass's error if parsing
    /// failed, or with [`Error::MissingRequiredOption`] if the option never
    /// appeared and has no default.
    pub fn read(&self) -> Result<Ref<'_, T>, Error> {
        self.shared.outcome()?;

        Ref::filter_map(self.cell.borrow(), ValueCell::get)
            .map_err(|_| Error::MissingRequiredOption(self.flag.clone()))
    }

    /// Get a copy of the parsed value. See [`read`][Binding::read].
    pub fn get(&self) -> Result<T, Error>
    where
        T: Clone,
    {
        self.read().map(|value| value.clone())
    }

    /// Like [`get`][Binding::get], but an absent option reads as `None`
    /// instead of an error. Errors from the pass itself are still returned.
    pub fn get_optional(&self) -> Result<Option<T>, Error>
    where
        T: Clone,
    {
        match self.get() {
            Ok(value) => Ok(Some(value)),
            Err(Error::MissingRequiredOption(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
}
