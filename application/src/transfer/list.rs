use kernel::prelude::entity::{
    BookFilter, BookSort, BookSortKey, SelectLimit, SelectOffset, SortOrder,
};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_SORT_BY: &str = "title";
pub const ASCENDING: &str = "asc";

/// Listing parameters as the client sent them. Every field is optional.
///
/// `page` and `limit` are `None` when absent or not an integer; the builder then
/// falls back to the defaults.
#[derive(Debug, Default, Clone)]
pub struct GetAllBookDto {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

/// Filter, sort and window handed to the store for one listing request.
///
/// | parameter | absent         | present                                  |
/// |-----------|----------------|------------------------------------------|
/// | `page`    | 1              | values below 1 become 1                  |
/// | `limit`   | 10             | values below 1 become 10                 |
/// | `sortBy`  | `title`        | any name; unknown fields do not reorder  |
/// | `order`   | ascending      | `"asc"` ascending, anything else descending |
/// | `search`  | match all      | case-insensitive substring of title or author |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBookQuery {
    pub filter: BookFilter,
    pub sort: BookSort,
    pub limit: SelectLimit,
    pub offset: SelectOffset,
    pub page: i64,
}

impl From<GetAllBookDto> for ListBookQuery {
    fn from(value: GetAllBookDto) -> Self {
        let page = value.page.filter(|page| *page >= 1).unwrap_or(DEFAULT_PAGE);
        let limit = value
            .limit
            .filter(|limit| *limit >= 1)
            .unwrap_or(DEFAULT_LIMIT);
        let order = match value.order.as_deref() {
            None | Some(ASCENDING) => SortOrder::Ascending,
            Some(_) => SortOrder::Descending,
        };
        let key = value
            .sort_by
            .map(BookSortKey::from)
            .unwrap_or_else(|| BookSortKey::from(DEFAULT_SORT_BY));
        Self {
            filter: BookFilter::new(value.search.unwrap_or_default()),
            sort: BookSort::new(key, order),
            limit: SelectLimit::new(limit),
            offset: SelectOffset::new((page - 1).saturating_mul(limit)),
            page,
        }
    }
}

impl ListBookQuery {
    /// `ceil(total / limit)`; zero matches give zero pages.
    pub fn total_pages(&self, total: i64) -> i64 {
        let limit: i64 = *self.limit.as_ref();
        let pages = total / limit;
        if total % limit > 0 {
            pages + 1
        } else {
            pages
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{
        BookFilter, BookSort, BookSortKey, SelectLimit, SelectOffset, SortOrder,
    };

    use crate::transfer::{GetAllBookDto, ListBookQuery};

    #[test]
    fn defaults() {
        let query = ListBookQuery::from(GetAllBookDto::default());
        assert_eq!(
            query,
            ListBookQuery {
                filter: BookFilter::all(),
                sort: BookSort::new(BookSortKey::Title, SortOrder::Ascending),
                limit: SelectLimit::new(10),
                offset: SelectOffset::new(0),
                page: 1,
            }
        );
    }

    #[test]
    fn skip_follows_page_and_limit() {
        let query = ListBookQuery::from(GetAllBookDto {
            page: Some(3),
            limit: Some(5),
            ..Default::default()
        });
        assert_eq!(query.offset, SelectOffset::new(10));
        assert_eq!(query.limit, SelectLimit::new(5));
        assert_eq!(query.page, 3);
    }

    #[test]
    fn out_of_range_numbers_fall_back() {
        let query = ListBookQuery::from(GetAllBookDto {
            page: Some(0),
            limit: Some(-4),
            ..Default::default()
        });
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, SelectLimit::new(10));
        assert_eq!(query.offset, SelectOffset::new(0));
    }

    #[test]
    fn only_asc_is_ascending() {
        let order_of = |order: &str| {
            *ListBookQuery::from(GetAllBookDto {
                order: Some(order.to_string()),
                ..Default::default()
            })
            .sort
            .order()
        };
        assert_eq!(order_of("asc"), SortOrder::Ascending);
        assert_eq!(order_of("desc"), SortOrder::Descending);
        assert_eq!(order_of("ASC"), SortOrder::Descending);
        assert_eq!(order_of(""), SortOrder::Descending);
    }

    #[test]
    fn unknown_sort_field_is_passed_through() {
        let query = ListBookQuery::from(GetAllBookDto {
            sort_by: Some("pages".to_string()),
            ..Default::default()
        });
        assert_eq!(
            query.sort.key(),
            &BookSortKey::Unknown("pages".to_string())
        );
    }

    #[test]
    fn search_builds_filter() {
        let query = ListBookQuery::from(GetAllBookDto {
            search: Some("gatsby".to_string()),
            ..Default::default()
        });
        assert_eq!(query.filter.search(), Some("gatsby"));
    }

    #[test]
    fn total_pages_rounds_up() {
        let query = ListBookQuery::from(GetAllBookDto::default());
        assert_eq!(query.total_pages(25), 3);
        assert_eq!(query.total_pages(20), 2);
        assert_eq!(query.total_pages(1), 1);
        assert_eq!(query.total_pages(0), 0);
    }
}
