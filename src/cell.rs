/**
A single slot that is either unset, or holds a value.

Being unset is a different thing from holding an "empty" value: a cell holding
`String::new()` or `false` is set. Each handler owns exactly one cell, and
every occurrence of one of its spellings replaces the contents with the
handler function's result.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValueCell<T>(Option<T>);

impl<T> ValueCell<T> {
    #[inline]
    #[must_use]
    pub(crate) const fn unset() -> Self {
        Self(None)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn is_set(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Replace the contents, returning the previous value if there was one
    #[inline]
    pub(crate) fn replace(&mut self, value: T) -> Option<T> {
        self.0.replace(value)
    }

    /**
    Feed the current contents to `update` and store what it returns.

    On error the cell is left unset; the previous value has already been
    handed to `update`.
    */
    pub(crate) fn update<E>(
        &mut self,
        update: impl FnOnce(Option<T>) -> Result<T, E>,
    ) -> Result<(), E> {
        let next = update(self.0.take())?;
        self.0 = Some(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ValueCell;

    #[test]
    fn empty_value_is_still_set() {
        let mut cell = ValueCell::unset();
        assert!(!cell.is_set());

        cell.replace(String::new());
        assert!(cell.is_set());
        assert_eq!(cell.get().map(String::as_str), Some(""));
    }

    #[test]
    fn update_sees_previous_value() {
        let mut cell = ValueCell::unset();
        cell.replace(vec![1]);

        cell.update(|previous| {
            let mut items = previous.unwrap_or_default();
            items.push(2);
            Ok::<_, ()>(items)
        })
        .unwrap();

        assert_eq!(cell.get(), Some(&vec![1, 2]));
    }

    #[test]
    fn failed_update_leaves_cell_unset() {
        let mut cell = ValueCell::unset();
        cell.replace(3);

        assert_eq!(cell.update(|_| Err("nope")), Err("nope"));
        assert!(!cell.is_set());
    }
}
