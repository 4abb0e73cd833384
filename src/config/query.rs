use crate::QueryError;

/// A validated search term
///
/// The only way to obtain one is [`SearchQuery::new`], so every crawl runs
/// with a term of at least [`SearchQuery::MIN_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    /// Minimum number of characters in a search term
    pub const MIN_LENGTH: usize = 6;

    /// Validates a search term
    ///
    /// # Returns
    ///
    /// * `Ok(SearchQuery)` - The term is at least `MIN_LENGTH` characters
    /// * `Err(QueryError)` - The term is empty or too short
    pub fn new(term: impl Into<String>) -> Result<Self, QueryError> {
        let term = term.into();
        let length = term.chars().count();

        if length == 0 {
            return Err(QueryError::Missing);
        }

        if length < Self::MIN_LENGTH {
            return Err(QueryError::TooShort {
                length,
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self { term })
    }

    /// The search term
    pub fn term(&self) -> &str {
        &self.term
    }
}
