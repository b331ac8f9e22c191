use error_stack::Report;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::{Date, OffsetDateTime};

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookFilter, BookId, BookIsbn, BookPublishedDate, BookSort, BookSortKey,
    BookTitle, CreatedAt, SelectLimit, SelectOffset, SortOrder, UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find(
        &self,
        con: &mut PostgresConnection,
        filter: &BookFilter,
        sort: &BookSort,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find(con, filter, sort, limit, offset).await
    }

    async fn count(
        &self,
        con: &mut PostgresConnection,
        filter: &BookFilter,
    ) -> error_stack::Result<i64, KernelError> {
        PgBookInternal::count(con, filter).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: String,
    title: String,
    author: String,
    isbn: String,
    published_date: Option<Date>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookIsbn::new(value.isbn),
            value.published_date.map(BookPublishedDate::new),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        )
    }
}

// language=postgresql
const SELECT_BOOKS: &str = r#"
    SELECT id, title, author, isbn, published_date, created_at, updated_at
    FROM books
"#;

fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
    if let Some(search) = filter.search() {
        let pattern = format!("%{}%", escape_like(search));
        query
            .push(" WHERE title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR author ILIKE ")
            .push_bind(pattern);
    }
}

// Text columns compare bytewise so the order matches the in-memory store.
fn sort_column(key: &BookSortKey) -> Option<&'static str> {
    match key {
        BookSortKey::Id => Some(r#"id COLLATE "C""#),
        BookSortKey::Title => Some(r#"title COLLATE "C""#),
        BookSortKey::Author => Some(r#"author COLLATE "C""#),
        BookSortKey::Isbn => Some(r#"isbn COLLATE "C""#),
        BookSortKey::PublishedDate => Some("published_date"),
        BookSortKey::CreatedAt => Some("created_at"),
        BookSortKey::UpdatedAt => Some("updated_at"),
        BookSortKey::Unknown(_) => None,
    }
}

fn not_found() -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable("Book not found")
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_BOOKS);
        let id: &String = id.as_ref();
        query.push(" WHERE id = ").push_bind(id);
        let row = query
            .build_query_as::<BookRow>()
            .fetch_optional(con)
            .await
            .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find(
        con: &mut PgConnection,
        filter: &BookFilter,
        sort: &BookSort,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_BOOKS);
        push_filter(&mut query, filter);
        if let Some(column) = sort_column(sort.key()) {
            let direction = match sort.order() {
                SortOrder::Ascending => " ASC NULLS FIRST",
                SortOrder::Descending => " DESC NULLS LAST",
            };
            query.push(" ORDER BY ").push(column).push(direction);
        }
        let limit: i64 = *limit.as_ref();
        let offset: i64 = *offset.as_ref();
        query
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = query
            .build_query_as::<BookRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn count(
        con: &mut PgConnection,
        filter: &BookFilter,
    ) -> error_stack::Result<i64, KernelError> {
        // language=postgresql
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut query, filter);
        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(con)
            .await
            .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, isbn, published_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.published_date().map(Date::from))
        .bind(book.created_at().as_ref())
        .bind(book.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, author = $3, isbn = $4, published_date = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.published_date().map(Date::from))
        .bind(book.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookFilter, BookId, BookIsbn, BookSort, BookSortKey, BookTitle,
        CreatedAt, SelectLimit, SelectOffset, UpdatedAt,
    };
    use kernel::KernelError;

    use crate::database::postgres::book::{escape_like, sort_column, PostgresBookRepository};
    use crate::database::postgres::PostgresDatabase;

    fn book(title: &str) -> Book {
        let suffix = rand::random::<u64>();
        Book::new(
            BookId::new(uuid::Uuid::new_v4().to_string()),
            BookTitle::new(format!("{title} {suffix}")),
            BookAuthor::new("test author"),
            BookIsbn::new(format!("isbn-{suffix}")),
            None,
            CreatedAt::now(),
            UpdatedAt::now(),
        )
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("gatsby"), "gatsby");
    }

    #[test]
    fn text_columns_sort_bytewise() {
        assert_eq!(
            sort_column(&BookSortKey::Title),
            Some(r#"title COLLATE "C""#)
        );
        assert_eq!(
            sort_column(&BookSortKey::PublishedDate),
            Some("published_date")
        );
        assert_eq!(sort_column(&BookSortKey::from("pages")), None);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let book = book("test");
        let id = book.id().clone();

        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let duplicated = book.clone().reconstruct(|b| b.id = BookId::new("duplicated"));
        let conflict = PostgresBookRepository
            .create(&mut con, &duplicated)
            .await
            .unwrap_err();
        assert_eq!(conflict.current_context(), &KernelError::Conflict);

        let search: &String = book.title().as_ref();
        let filter = BookFilter::new(search.to_uppercase());
        let listed = PostgresBookRepository
            .find(
                &mut con,
                &filter,
                &BookSort::default(),
                &SelectLimit::default(),
                &SelectOffset::default(),
            )
            .await?;
        assert_eq!(listed, vec![book.clone()]);
        assert_eq!(PostgresBookRepository.count(&mut con, &filter).await?, 1);

        let book = book.reconstruct(|b| b.title = BookTitle::new("test2"));
        PostgresBookRepository.update(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        PostgresBookRepository.delete(&mut con, &id).await?;
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        let missing = PostgresBookRepository
            .delete(&mut con, &id)
            .await
            .unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);

        Ok(())
    }
}
