use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde_json::json;

use thiserror::Error;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<crate::error::Error> for RestError {
    fn from(e: crate::error::Error) -> Self {
        use crate::error::Error as E;
        match e {
            E::ParsingError(msg) => Self::BadRequest(msg),
            other => Self::Other(other.into()),
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => {
                json!({ "success": false, "message": msg })
            }
            Self::Other(e) => {
                tracing::error!(error.cause_chain = ?e, "Unhandled request error");
                json!({ "error": e.to_string(), "stack": format!("{:?}", e) })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
