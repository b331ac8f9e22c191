use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Fromln, AsRefln)]
pub struct BookPublishedDate(Date);

impl BookPublishedDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
