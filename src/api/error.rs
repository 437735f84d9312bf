use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Internal Server Error: {0}")]
    InternalServer(Cow<'static, str>),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub error: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal_server_error(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InternalServer(msg.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Error::BadRequest(msg) | Error::NotFound(msg) | Error::InternalServer(msg) => {
                msg.as_ref()
            }
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InternalServer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorBody { error: Cow::Owned(self.message().to_string()) })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error("Image store lock poisoned")]
    LockPoisoned,
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl<T> From<std::sync::PoisonError<T>> for SystemError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        SystemError::LockPoisoned
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::InternalError(err.into())
    }

    /// Converts into the HTTP error, hiding internal faults behind `fallback`.
    pub fn or_internal(self, fallback: &'static str) -> Error {
        match self {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            other => {
                log::error!("{}: {:?}", fallback, other);
                Error::InternalServer(fallback.into())
            }
        }
    }
}
