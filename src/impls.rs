/*!
Typed shortcuts for the most common option shapes, all built on
[`Parser::flag`] and [`Parser::try_option`].
 */

use core::{fmt::Display, str::FromStr};

use joinery::JoinableIterator;

use crate::{Binding, Error, Parser};

impl Parser {
    /// A flag that is `true` if it appears at all, `false` otherwise.
    pub fn switch<'s>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
    ) -> Result<Binding<bool>, Error> {
        Ok(self
            .flag(spellings, help, |_, _| true)?
            .with_default(false))
    }

    /// A flag that counts its occurrences, like `-vvv`. Absent is `0`.
    pub fn count<'s>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
    ) -> Result<Binding<u32>, Error> {
        Ok(self
            .flag(spellings, help, |count: Option<u32>, _| {
                count.unwrap_or(0).saturating_add(1)
            })?
            .with_default(0))
    }

    /// An option whose argument is parsed with [`FromStr`]. If it appears
    /// more than once, the last occurrence wins. It's required unless given a
    /// [default][Binding::with_default].
    pub fn value<'s, T>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
    ) -> Result<Binding<T>, Error>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        self.try_option(spellings, help, |_, _, argument| argument.parse::<T>())
    }

    /// An option that collects every occurrence's argument, in order. Absent
    /// is an empty list.
    pub fn list<'s, T>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
    ) -> Result<Binding<Vec<T>>, Error>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        Ok(self
            .try_option(spellings, help, |items: Option<Vec<T>>, _, argument| {
                let mut items = items.unwrap_or_default();
                items.push(argument.parse::<T>()?);
                Ok::<_, T::Err>(items)
            })?
            .with_default(Vec::new()))
    }

    /// An option whose argument must be one of the names in `choices`. If it
    /// appears more than once, the last occurrence wins.
    pub fn choice<'s, T>(
        &self,
        spellings: impl IntoIterator<Item = &'s str>,
        help: &str,
        choices: &[(&str, T)],
    ) -> Result<Binding<T>, Error>
    where
        T: Clone + 'static,
    {
        let choices: Vec<(String, T)> = choices
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.clone()))
            .collect();

        self.try_option(spellings, help, move |_, _, argument| {
            choices
                .iter()
                .find(|(name, _)| name == argument)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| {
                    format!(
                        "expected one of {}",
                        choices.iter().map(|(name, _)| name).join_with(", ")
                    )
                })
        })
    }
}
