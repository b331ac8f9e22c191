use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;

pub use self::{memory::*, postgres::*};

mod memory;
mod postgres;

/// A store that can hand out connections together with the repository operating on them.
pub trait BookDatabase: DatabaseConnection {
    type BookRepository: BookQuery<Connection = Self::Connection>
        + BookModifier<Connection = Self::Connection>;
    fn book_repository(&self) -> &Self::BookRepository;
}
