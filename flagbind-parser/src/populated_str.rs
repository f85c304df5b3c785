/// A string slice that is guaranteed to hold at least one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PopulatedStr<'a>(&'a str);

impl<'a> PopulatedStr<'a> {
    #[inline]
    pub fn new(s: &'a str) -> Option<Self> {
        match s.is_empty() {
            true => None,
            false => Some(Self(s)),
        }
    }

    /// The whole point: a static guarantee that there is a first character
    /// to split off. The remainder may be empty.
    #[inline]
    pub fn split_first(self) -> (char, &'a str) {
        let mut chars = self.0.chars();

        match chars.next() {
            Some(c) => (c, chars.as_str()),
            // `new` rejects empty strings, so a first char always exists
            None => unreachable!("PopulatedStr is never empty"),
        }
    }

    #[inline(always)]
    pub fn get(self) -> &'a str {
        self.0
    }
}
