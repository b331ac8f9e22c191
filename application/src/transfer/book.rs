use time::{Date, OffsetDateTime};

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
            published_date,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            published_date: published_date.map(Into::into),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: String,
}

/// Missing text fields arrive as empty strings and are rejected by validation.
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_date: Option<Date>,
}

/// Only present fields are applied. `published_date: Some(None)` clears the date.
pub struct UpdateBookDto {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub published_date: Option<Option<Date>>,
}

pub struct DeleteBookDto {
    pub id: String,
}
