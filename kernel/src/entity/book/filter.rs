use crate::entity::Book;

/// Selects books whose title or author contains `search`, ignoring case.
///
/// The search string is a single literal pattern, matched anywhere in the field.
/// An empty search selects every book.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BookFilter {
    search: Option<String>,
}

impl BookFilter {
    pub fn new(search: impl Into<String>) -> Self {
        let search = search.into();
        Self {
            search: (!search.is_empty()).then_some(search),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, book: &Book) -> bool {
        let Some(search) = &self.search else {
            return true;
        };
        let needle = search.to_lowercase();
        let title: &String = book.title().as_ref();
        let author: &String = book.author().as_ref();
        title.to_lowercase().contains(&needle) || author.to_lowercase().contains(&needle)
    }
}
