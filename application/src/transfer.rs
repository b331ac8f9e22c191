mod book;
mod list;
mod page;

pub use self::{book::*, list::*, page::*};
