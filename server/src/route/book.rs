use application::service::{
    CreateBookService, DeleteBookService, GetAllBookService, GetBookService, UpdateBookService,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use driver::database::BookDatabase;
use utoipa::OpenApi;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetAllBookRequest, GetBookRequest,
    UpdateBookRequest,
};
use crate::response::{BookPresenter, BookResponse, Envelope, Notice};

#[derive(OpenApi)]
#[openapi(
    info(title = "Bookshelf API", description = "Create, list, update and delete books"),
    paths(list_books, create_book, get_book, update_book, delete_book),
    tags((name = "Books", description = "Book catalogue"))
)]
pub struct BookApi;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<Db: BookDatabase> BookRouter for Router<AppModule<Db>> {
    // Every path also answers with a trailing slash.
    fn route_book(self) -> Self {
        let books = get(list_books::<Db>).post(create_book::<Db>);
        let book = get(get_book::<Db>)
            .put(update_book::<Db>)
            .delete(delete_book::<Db>);
        self.route("/api/books", books.clone())
            .route("/api/books/", books)
            .route("/api/books/:id", book.clone())
            .route("/api/books/:id/", book)
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    tag = "Books",
    params(GetAllBookRequest),
    responses(
        (status = 200, description = "One page of books", body = Envelope<Vec<BookResponse>>),
        (status = 400, description = "Malformed query string", body = Notice),
    )
)]
async fn list_books<Db: BookDatabase>(
    State(module): State<AppModule<Db>>,
    query: Result<Query<GetAllBookRequest>, QueryRejection>,
) -> Result<Envelope<Vec<BookResponse>>, ErrorStatus> {
    let Query(req) = query?;
    Controller::new(BookTransformer, BookPresenter)
        .intake(req)
        .handle(|dto| async move { module.get_all_books(dto).await })
        .await
        .map_err(ErrorStatus::from)
}

#[utoipa::path(
    post,
    path = "/api/books",
    tag = "Books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Envelope<BookResponse>),
        (status = 400, description = "Missing field or duplicate isbn", body = Notice),
    )
)]
async fn create_book<Db: BookDatabase>(
    State(module): State<AppModule<Db>>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<BookResponse>), ErrorStatus> {
    let Json(req) = payload?;
    Controller::new(BookTransformer, BookPresenter)
        .intake(req)
        .handle(|dto| async move { module.create_book(dto).await })
        .await
        .map(|res| (StatusCode::CREATED, res))
        .map_err(ErrorStatus::from)
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "Books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Envelope<BookResponse>),
        (status = 404, description = "No book with this id", body = Notice),
    )
)]
async fn get_book<Db: BookDatabase>(
    State(module): State<AppModule<Db>>,
    Path(id): Path<String>,
) -> Result<Envelope<BookResponse>, ErrorStatus> {
    Controller::new(BookTransformer, BookPresenter)
        .intake(GetBookRequest::new(id))
        .handle(|dto| async move { module.get_book(dto).await })
        .await
        .map_err(ErrorStatus::from)?
        .ok_or_else(ErrorStatus::not_found)
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "Books",
    params(("id" = String, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = Envelope<BookResponse>),
        (status = 400, description = "Empty field or duplicate isbn", body = Notice),
        (status = 404, description = "No book with this id", body = Notice),
    )
)]
async fn update_book<Db: BookDatabase>(
    State(module): State<AppModule<Db>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Envelope<BookResponse>, ErrorStatus> {
    let Json(req) = payload?;
    Controller::new(BookTransformer, BookPresenter)
        .intake((id, req))
        .handle(|dto| async move { module.update_book(dto).await })
        .await
        .map_err(ErrorStatus::from)
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "Books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = Notice),
        (status = 404, description = "No book with this id", body = Notice),
    )
)]
async fn delete_book<Db: BookDatabase>(
    State(module): State<AppModule<Db>>,
    Path(id): Path<String>,
) -> Result<Notice, ErrorStatus> {
    Controller::new(BookTransformer, BookPresenter)
        .intake(DeleteBookRequest::new(id))
        .handle(|dto| async move { module.delete_book(dto).await })
        .await
        .map_err(ErrorStatus::from)
}
