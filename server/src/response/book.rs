use application::transfer::{BookDto, PageDto};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use utoipa::ToSchema;

use crate::controller::Exhaust;
use crate::response::{Envelope, Notice};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: String,
    title: String,
    author: String,
    isbn: String,
    #[serde(
        with = "crate::published_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    published_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        let BookDto {
            id,
            title,
            author,
            isbn,
            published_date,
            created_at,
            updated_at,
        } = value;
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
}

pub struct BookPresenter;

impl Exhaust<()> for BookPresenter {
    type To = Notice;
    fn emit(&self, _: ()) -> Self::To {
        Notice::ok("Book deleted successfully")
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = Envelope<BookResponse>;
    fn emit(&self, input: BookDto) -> Self::To {
        Envelope::data(BookResponse::from(input))
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Option<Envelope<BookResponse>>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(|book| Envelope::data(BookResponse::from(book)))
    }
}

impl Exhaust<PageDto<BookDto>> for BookPresenter {
    type To = Envelope<Vec<BookResponse>>;
    fn emit(&self, input: PageDto<BookDto>) -> Self::To {
        let PageDto {
            data,
            total_pages,
            current_page,
        } = input;
        let books = data.into_iter().map(BookResponse::from).collect::<Vec<_>>();
        Envelope::page(books, total_pages, current_page)
    }
}
