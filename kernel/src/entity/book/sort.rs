use std::cmp::Ordering;

use vodca::References;

use crate::entity::{Book, SortOrder};

/// Field a listing is ordered by, parsed from its wire name.
///
/// Names that match no field are kept as `Unknown` and leave the order untouched.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum BookSortKey {
    Id,
    Title,
    Author,
    Isbn,
    PublishedDate,
    CreatedAt,
    UpdatedAt,
    Unknown(String),
}

impl From<String> for BookSortKey {
    fn from(value: String) -> Self {
        match &*value {
            "id" | "_id" => Self::Id,
            "title" => Self::Title,
            "author" => Self::Author,
            "isbn" => Self::Isbn,
            "publishedDate" => Self::PublishedDate,
            "createdAt" => Self::CreatedAt,
            "updatedAt" => Self::UpdatedAt,
            _ => Self::Unknown(value),
        }
    }
}

impl From<&str> for BookSortKey {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct BookSort {
    key: BookSortKey,
    order: SortOrder,
}

impl BookSort {
    pub fn new(key: BookSortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let ordering = match &self.key {
            BookSortKey::Id => a.id().as_ref().cmp(b.id().as_ref()),
            BookSortKey::Title => a.title().as_ref().cmp(b.title().as_ref()),
            BookSortKey::Author => a.author().as_ref().cmp(b.author().as_ref()),
            BookSortKey::Isbn => a.isbn().as_ref().cmp(b.isbn().as_ref()),
            BookSortKey::PublishedDate => a.published_date().cmp(b.published_date()),
            BookSortKey::CreatedAt => a.created_at().as_ref().cmp(b.created_at().as_ref()),
            BookSortKey::UpdatedAt => a.updated_at().as_ref().cmp(b.updated_at().as_ref()),
            BookSortKey::Unknown(_) => Ordering::Equal,
        };
        self.order.apply(ordering)
    }
}

impl Default for BookSort {
    fn default() -> Self {
        Self::new(BookSortKey::Title, SortOrder::Ascending)
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use time::macros::date;

    use crate::entity::{
        Book, BookAuthor, BookId, BookIsbn, BookPublishedDate, BookSort, BookSortKey, BookTitle,
        CreatedAt, SortOrder, UpdatedAt,
    };

    fn book(title: &str, published: Option<BookPublishedDate>) -> Book {
        Book::new(
            BookId::new(title),
            BookTitle::new(title),
            BookAuthor::new("author"),
            BookIsbn::new(title),
            published,
            CreatedAt::now(),
            UpdatedAt::now(),
        )
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!(BookSortKey::from("publishedDate"), BookSortKey::PublishedDate);
        assert_eq!(BookSortKey::from("_id"), BookSortKey::Id);
        assert_eq!(
            BookSortKey::from("pages"),
            BookSortKey::Unknown("pages".to_string())
        );
    }

    #[test]
    fn orders_by_direction() {
        let a = book("Animal Farm", None);
        let b = book("Brave New World", None);
        let asc = BookSort::new(BookSortKey::Title, SortOrder::Ascending);
        let desc = BookSort::new(BookSortKey::Title, SortOrder::Descending);
        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(desc.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn missing_date_sorts_first_ascending() {
        let undated = book("a", None);
        let dated = book("b", Some(BookPublishedDate::new(date!(1925 - 04 - 10))));
        let sort = BookSort::new(BookSortKey::PublishedDate, SortOrder::Ascending);
        assert_eq!(sort.compare(&undated, &dated), Ordering::Less);
    }

    #[test]
    fn unknown_key_keeps_order() {
        let sort = BookSort::new(BookSortKey::from("pages"), SortOrder::Descending);
        assert_eq!(
            sort.compare(&book("a", None), &book("b", None)),
            Ordering::Equal
        );
    }
}
