use std::any::Any;
use std::process::{ExitCode, Termination};

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::{AttachmentKind, FrameKind, Report};
use kernel::KernelError;

use crate::response::Notice;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    pub fn not_found() -> Self {
        Self(Report::new(KernelError::NotFound).attach_printable("Book not found"))
    }

    /// The first printable attachment, falling back to the root cause.
    fn message(&self) -> String {
        self.0
            .frames()
            .find_map(|frame| match frame.kind() {
                FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                    Some(printable.to_string())
                }
                _ => None,
            })
            .or_else(|| {
                self.0
                    .frames()
                    .filter_map(|frame| match frame.kind() {
                        FrameKind::Context(context) => Some(context.to_string()),
                        _ => None,
                    })
                    .last()
            })
            .unwrap_or_else(|| self.0.current_context().to_string())
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        ErrorStatus(Report::new(KernelError::Validation).attach_printable(rejection.body_text()))
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        ErrorStatus(Report::new(KernelError::Validation).attach_printable(rejection.body_text()))
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = match self.0.current_context() {
            KernelError::Validation | KernelError::Conflict => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        }
        (status, Json(Notice::failure(self.message()))).into_response()
    }
}

pub fn handle_panic(error: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = error.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = error.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown panic".to_string()
    };
    tracing::error!(panic = %message, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Notice::failure(message)),
    )
        .into_response()
}
