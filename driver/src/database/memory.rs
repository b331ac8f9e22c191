use std::sync::Arc;

use tokio::sync::RwLock;

use kernel::interface::database::{Connection, DatabaseConnection};
use kernel::prelude::entity::Book;
use kernel::KernelError;

use crate::database::BookDatabase;

pub use self::book::*;

mod book;

/// Process-local store. Books are kept in insertion order and vanish with the process.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    books: Arc<RwLock<Vec<Book>>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct InMemoryConnection {
    books: Arc<RwLock<Vec<Book>>>,
}

impl Connection for InMemoryConnection {}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Connection = InMemoryConnection;
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        Ok(InMemoryConnection {
            books: Arc::clone(&self.books),
        })
    }
}

impl BookDatabase for InMemoryDatabase {
    type BookRepository = InMemoryBookRepository;
    fn book_repository(&self) -> &Self::BookRepository {
        &InMemoryBookRepository
    }
}
