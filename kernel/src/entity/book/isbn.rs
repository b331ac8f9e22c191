use vodca::{AsRefln, Fromln};

/// Unique across every stored book; the store rejects duplicates.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln)]
pub struct BookIsbn(String);

impl BookIsbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }
}
