mod author;
mod filter;
mod id;
mod isbn;
mod published_date;
mod sort;
mod title;

pub use self::{
    author::*, filter::*, id::*, isbn::*, published_date::*, sort::*, title::*,
};
use crate::entity::common::{CreatedAt, UpdatedAt};
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: BookIsbn,
    published_date: Option<BookPublishedDate>,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: BookIsbn,
        published_date: Option<BookPublishedDate>,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            published_date,
            created_at,
            updated_at,
        }
    }

    /// Checks the required fields before the book reaches a store.
    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        let required: [(&str, &String); 3] = [
            ("title", self.title.as_ref()),
            ("author", self.author.as_ref()),
            ("isbn", self.isbn.as_ref()),
        ];
        let missing = required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| format!("{field} is required"))
            .collect::<Vec<_>>();
        if missing.is_empty() {
            return Ok(());
        }
        Err(Report::new(KernelError::Validation)
            .attach_printable(format!("Book validation failed: {}", missing.join(", "))))
    }
}
