use std::ops::Deref;
use std::sync::Arc;

use driver::database::BookDatabase;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

pub struct AppModule<Db>(Arc<Handler<Db>>);

impl<Db: BookDatabase> AppModule<Db> {
    pub fn new(database: Db) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<Db> Clone for AppModule<Db> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<Db> Deref for AppModule<Db> {
    type Target = Handler<Db>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<Db> {
    database: Db,
}

impl<Db: BookDatabase> DependOnDatabaseConnection for Handler<Db> {
    type DatabaseConnection = Db;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl<Db: BookDatabase> DependOnBookQuery for Handler<Db> {
    type BookQuery = Db::BookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        self.database.book_repository()
    }
}

impl<Db: BookDatabase> DependOnBookModifier for Handler<Db> {
    type BookModifier = Db::BookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        self.database.book_repository()
    }
}
