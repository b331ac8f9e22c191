use std::net::SocketAddr;

use driver::database::{BookDatabase, InMemoryDatabase, PostgresDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use time::Date;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{ServerConfig, StoreKind};
use crate::error::{handle_panic, StackTrace};
use crate::handler::AppModule;
use crate::route::{BookApi, BookRouter};

mod config;
mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

time::serde::format_description!(published_date, Date, "[year]-[month]-[day]");

pub(crate) fn app<Db: BookDatabase>(module: AppModule<Db>) -> axum::Router {
    axum::Router::<AppModule<Db>>::new()
        .route_book()
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", BookApi::openapi()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}

async fn serve<Db: BookDatabase>(database: Db, port: u16) -> error_stack::Result<(), KernelError> {
    let router = app(AppModule::new(database));

    let bind = SocketAddr::from(([0, 0, 0, 0], port));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen tcp on {bind}"))?;
    tracing::info!("listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = ServerConfig::load()?;

    match config.store() {
        StoreKind::Postgres => serve(PostgresDatabase::new().await?, *config.port()).await?,
        StoreKind::Memory => {
            tracing::warn!("using the in-memory store, books are lost on shutdown");
            serve(InMemoryDatabase::new(), *config.port()).await?
        }
    }

    Ok(())
}
