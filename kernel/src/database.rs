use crate::KernelError;

/// A live handle to the document store. Every request acquires its own.
pub trait Connection: 'static + Sync + Send {}

#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Connection: Connection;
    async fn transact(&self) -> error_stack::Result<Self::Connection, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}
