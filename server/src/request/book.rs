use application::transfer::{
    CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto, UpdateBookDto,
};
use serde::{Deserialize, Deserializer};
use time::Date;
use utoipa::{IntoParams, ToSchema};

use crate::controller::Intake;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    #[serde(default, with = "crate::published_date::option")]
    published_date: Option<Date>,
}

/// Absent fields are left untouched; `"publishedDate": null` removes the date.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    #[serde(default, deserialize_with = "nullable_date")]
    #[schema(value_type = Option<String>, format = Date)]
    published_date: Option<Option<Date>>,
}

// Only runs when the key is present, so `null` becomes `Some(None)`.
fn nullable_date<'de, D>(deserializer: D) -> Result<Option<Option<Date>>, D::Error>
where
    D: Deserializer<'de>,
{
    crate::published_date::option::deserialize(deserializer).map(Some)
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: String,
}

impl DeleteBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

// Query values stay strings here so a non-numeric page or limit falls back to its default
// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetAllBookRequest {
    /// 1-based page, default 1.
    page: Option<String>,
    /// Page size, default 10.
    limit: Option<String>,
    /// Field to order by, default `title`.
    sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    order: Option<String>,
    /// Case-insensitive text matched against title and author.
    search: Option<String>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: String,
}

impl GetBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

// Whole integers only: "2abc" and "2.5" count as absent.
fn parse_integer(value: Option<String>) -> Option<i64> {
    value.and_then(|value| value.trim().parse().ok())
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title.unwrap_or_default(),
            author: input.author.unwrap_or_default(),
            isbn: input.isbn.unwrap_or_default(),
            published_date: input.published_date,
        }
    }
}

impl Intake<(String, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (String, UpdateBookRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            published_date: input.published_date,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<GetAllBookRequest> for BookTransformer {
    type To = GetAllBookDto;
    fn emit(&self, input: GetAllBookRequest) -> Self::To {
        GetAllBookDto {
            page: parse_integer(input.page),
            limit: parse_integer(input.limit),
            sort_by: input.sort_by,
            order: input.order,
            search: input.search,
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use crate::controller::Intake;
    use crate::request::{BookTransformer, GetAllBookRequest, UpdateBookRequest};

    fn update(body: &str) -> application::transfer::UpdateBookDto {
        let request: UpdateBookRequest = serde_json::from_str(body).unwrap();
        BookTransformer.emit(("id".to_string(), request))
    }

    #[test]
    fn null_date_differs_from_absent_date() {
        assert_eq!(update(r#"{"title": "Dune"}"#).published_date, None);
        assert_eq!(update(r#"{"publishedDate": null}"#).published_date, Some(None));
        assert_eq!(
            update(r#"{"publishedDate": "1965-08-01"}"#).published_date,
            Some(Some(date!(1965 - 08 - 01)))
        );
    }

    #[test]
    fn non_numeric_paging_is_dropped() {
        let dto = BookTransformer.emit(GetAllBookRequest {
            page: Some("two".to_string()),
            limit: Some(" 5 ".to_string()),
            ..Default::default()
        });
        assert_eq!(dto.page, None);
        assert_eq!(dto.limit, Some(5));
    }

    #[test]
    fn partially_numeric_paging_is_dropped() {
        let dto = BookTransformer.emit(GetAllBookRequest {
            page: Some("2abc".to_string()),
            limit: Some("2.5".to_string()),
            ..Default::default()
        });
        assert_eq!(dto.page, None);
        assert_eq!(dto.limit, None);
    }
}
