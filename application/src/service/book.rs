use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookIsbn, BookPublishedDate, BookTitle, CreatedAt, UpdatedAt,
};
use kernel::KernelError;

use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto, ListBookQuery, PageDto,
    UpdateBookDto,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetAllBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(
        &self,
        dto: GetAllBookDto,
    ) -> error_stack::Result<PageDto<BookDto>, KernelError> {
        let query = ListBookQuery::from(dto);
        let mut connection = self.database_connection().transact().await?;

        let books = self
            .book_query()
            .find(
                &mut connection,
                &query.filter,
                &query.sort,
                &query.limit,
                &query.offset,
            )
            .await?;
        let total = self
            .book_query()
            .count(&mut connection, &query.filter)
            .await?;

        Ok(PageDto {
            data: books.into_iter().map(BookDto::from).collect(),
            total_pages: query.total_pages(total),
            current_page: query.page,
        })
    }
}

impl<T> GetAllBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let created_at = CreatedAt::<Book>::now();
        let updated_at = UpdatedAt::new(*created_at.as_ref());
        let book = Book::new(
            BookId::new(Uuid::new_v4().to_string()),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookIsbn::new(dto.isbn),
            dto.published_date.map(BookPublishedDate::new),
            created_at,
            updated_at,
        );
        book.validate()?;

        let mut connection = self.database_connection().transact().await?;
        self.book_modifier().create(&mut connection, &book).await?;
        tracing::debug!(id = ?book.id(), "book created");

        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("Book not found"))?;

        book.substitute(|book| {
            if let Some(title) = dto.title {
                *book.title = BookTitle::new(title);
            }
            if let Some(author) = dto.author {
                *book.author = BookAuthor::new(author);
            }
            if let Some(isbn) = dto.isbn {
                *book.isbn = BookIsbn::new(isbn);
            }
            if let Some(published_date) = dto.published_date {
                *book.published_date = published_date.map(BookPublishedDate::new);
            }
            *book.updated_at = UpdatedAt::now();
        });
        book.validate()?;

        self.book_modifier().update(&mut connection, &book).await?;
        tracing::debug!(id = ?book.id(), "book updated");

        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        self.book_modifier().delete(&mut connection, &id).await?;
        tracing::debug!(id = ?id, "book deleted");

        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}
