use crate::database::{Connection, DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookFilter, BookId, BookSort, SelectLimit, SelectOffset};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Connection: Connection;
    async fn find_by_id(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn find(
        &self,
        con: &mut Self::Connection,
        filter: &BookFilter,
        sort: &BookSort,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn count(
        &self,
        con: &mut Self::Connection,
        filter: &BookFilter,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
