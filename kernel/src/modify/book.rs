use crate::database::{Connection, DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookId};
use crate::KernelError;

/// Writes against the store.
///
/// `create` and `update` fail with [`KernelError::Conflict`] when the isbn is taken
/// by another book; `update` and `delete` fail with [`KernelError::NotFound`] when
/// no book carries the id.
#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Connection: Connection;
    async fn create(
        &self,
        con: &mut Self::Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Connection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
