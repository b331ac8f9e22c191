use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::migrate::MigrateError;
use sqlx::pool::PoolConnection;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{Connection, DatabaseConnection};
use kernel::KernelError;

use crate::database::BookDatabase;
use crate::env;
use crate::error::ConvertError;

pub use self::book::*;

mod book;

static POSTGRES_URL: &str = "POSTGRES_URL";

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .convert_error()?;
        tracing::info!("connected to postgres");
        Ok(Self { pool })
    }
}

pub struct PostgresConnection(PoolConnection<Postgres>);

impl Connection for PostgresConnection {}

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Connection = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let con = self.pool.acquire().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

impl BookDatabase for PostgresDatabase {
    type BookRepository = PostgresBookRepository;
    fn book_repository(&self) -> &Self::BookRepository {
        &PostgresBookRepository
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let duplicated = matches!(
                &error,
                Error::Database(database) if database.is_unique_violation()
            );
            if duplicated {
                Report::from(error)
                    .change_context(KernelError::Conflict)
                    .attach_printable("A book with this isbn already exists")
            } else if matches!(error, Error::PoolTimedOut) {
                Report::from(error)
                    .change_context(KernelError::Internal)
                    .attach_printable("Timed out while waiting for a database connection")
            } else {
                Report::from(error).change_context(KernelError::Internal)
            }
        })
    }
}

impl<T> ConvertError for Result<T, MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
