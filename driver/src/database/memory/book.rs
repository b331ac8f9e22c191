use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookFilter, BookId, BookIsbn, BookSort, SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryBookRepository;

fn not_found() -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable("Book not found")
}

fn duplicated(isbn: &BookIsbn) -> Report<KernelError> {
    let isbn: &String = isbn.as_ref();
    Report::new(KernelError::Conflict)
        .attach_printable(format!("A book with isbn {isbn} already exists"))
}

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Connection = InMemoryConnection;

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let books = con.books.read().await;
        Ok(books.iter().find(|book| book.id() == id).cloned())
    }

    /// A non-positive limit returns every match past the offset.
    async fn find(
        &self,
        con: &mut InMemoryConnection,
        filter: &BookFilter,
        sort: &BookSort,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = con.books.read().await;
        let mut found = books
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| sort.compare(a, b));

        let limit: i64 = *limit.as_ref();
        let offset: i64 = *offset.as_ref();
        let limit = usize::try_from(limit)
            .ok()
            .filter(|limit| *limit > 0)
            .unwrap_or(usize::MAX);
        let offset = usize::try_from(offset).unwrap_or(0);
        Ok(found.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(
        &self,
        con: &mut InMemoryConnection,
        filter: &BookFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let books = con.books.read().await;
        let count = books.iter().filter(|book| filter.matches(book)).count();
        i64::try_from(count).map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Connection = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write().await;
        if books.iter().any(|stored| stored.isbn() == book.isbn()) {
            return Err(duplicated(book.isbn()));
        }
        if books.iter().any(|stored| stored.id() == book.id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("A book with this id already exists"));
        }
        books.push(book.clone());
        tracing::trace!(id = ?book.id(), "stored book in memory");
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write().await;
        if books
            .iter()
            .any(|stored| stored.isbn() == book.isbn() && stored.id() != book.id())
        {
            return Err(duplicated(book.isbn()));
        }
        let stored = books
            .iter_mut()
            .find(|stored| stored.id() == book.id())
            .ok_or_else(not_found)?;
        *stored = book.clone();
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write().await;
        let position = books
            .iter()
            .position(|stored| stored.id() == book_id)
            .ok_or_else(not_found)?;
        books.remove(position);
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
        CreatedAt, SelectLimit, SelectOffset, SortOrder, UpdatedAt,
    };
    use kernel::KernelError;

    use crate::database::memory::book::InMemoryBookRepository;
    use crate::database::memory::InMemoryDatabase;

    fn book(id: &str, title: &str, author: &str) -> Book {
        Book::new(
            BookId::new(id),
            BookTitle::new(title),
            BookAuthor::new(author),
            BookIsbn::new(format!("isbn-{id}")),
            None,
            CreatedAt::now(),
            UpdatedAt::now(),
        )
    }

    #[tokio::test]
    async fn crud() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = BookId::new("1");
        let book = book("1", "Dune", "Frank Herbert");

        InMemoryBookRepository.create(&mut con, &book).await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let book = book.reconstruct(|b| b.title = BookTitle::new("Dune Messiah"));
        InMemoryBookRepository.update(&mut con, &book).await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        InMemoryBookRepository.delete(&mut con, &id).await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn connections_share_the_store() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut writer = db.transact().await?;
        let mut reader = db.transact().await?;
        InMemoryBookRepository
            .create(&mut writer, &book("1", "Dune", "Frank Herbert"))
            .await?;
        let found = InMemoryBookRepository
            .find_by_id(&mut reader, &BookId::new("1"))
            .await?;
        assert!(found.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_isbn_conflicts() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let first = book("1", "Dune", "Frank Herbert");
        InMemoryBookRepository.create(&mut con, &first).await?;

        let second = first.clone().reconstruct(|b| b.id = BookId::new("2"));
        let report = InMemoryBookRepository
            .create(&mut con, &second)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let other = book("3", "Emma", "Jane Austen");
        InMemoryBookRepository.create(&mut con, &other).await?;
        let stolen = other.reconstruct(|b| b.isbn = BookIsbn::new("isbn-1"));
        let report = InMemoryBookRepository
            .update(&mut con, &stolen)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        Ok(())
    }

    #[tokio::test]
    async fn missing_book_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let ghost = book("ghost", "Nothing", "Nobody");

        let report = InMemoryBookRepository
            .update(&mut con, &ghost)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        let report = InMemoryBookRepository
            .delete(&mut con, ghost.id())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(
            InMemoryBookRepository
                .count(&mut con, &BookFilter::all())
                .await?,
            0
        );
        Ok(())
    }

    #[tokio::test]
    async fn find_filters_sorts_and_pages() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        for (id, title, author) in [
            ("1", "The Great Gatsby", "F. Scott Fitzgerald"),
            ("2", "Tender Is the Night", "F. Scott Fitzgerald"),
            ("3", "Gatsby Revisited", "Someone Else"),
            ("4", "Dune", "Frank Herbert"),
        ] {
            InMemoryBookRepository
                .create(&mut con, &book(id, title, author))
                .await?;
        }

        let filter = BookFilter::new("GATSBY");
        let sort = BookSort::new(BookSortKey::Title, SortOrder::Ascending);
        let found = InMemoryBookRepository
            .find(
                &mut con,
                &filter,
                &sort,
                &SelectLimit::default(),
                &SelectOffset::default(),
            )
            .await?;
        let ids = found
            .iter()
            .map(|book| book.id().clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![BookId::new("3"), BookId::new("1")]);
        assert_eq!(InMemoryBookRepository.count(&mut con, &filter).await?, 2);

        let fitzgerald = BookFilter::new("fitzgerald");
        let second_page = InMemoryBookRepository
            .find(
                &mut con,
                &fitzgerald,
                &BookSort::new(BookSortKey::Title, SortOrder::Descending),
                &SelectLimit::new(1),
                &SelectOffset::new(1),
            )
            .await?;
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id(), &BookId::new("2"));

        let unsorted = InMemoryBookRepository
            .find(
                &mut con,
                &BookFilter::all(),
                &BookSort::new(BookSortKey::from("pages"), SortOrder::Descending),
                &SelectLimit::default(),
                &SelectOffset::default(),
            )
            .await?;
        let ids = unsorted
            .iter()
            .map(|book| book.id().clone())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                BookId::new("1"),
                BookId::new("2"),
                BookId::new("3"),
                BookId::new("4")
            ]
        );
        Ok(())
    }
}
