use actix_web::body::BoxBody;
use actix_web::{HttpResponse, ResponseError};
use billsight_common::error::ErrorInformation;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(anyhow::Error),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("collaborator error: {0}")]
    Collaborator(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        Self::Database(value.into())
    }
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            // the rejection reason rides in the `error` field of the body
            Self::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ErrorInformation::new(msg.clone(), ""))
            }
            Self::Collaborator(msg) => {
                HttpResponse::InternalServerError().json(ErrorInformation::new("Collaborator", msg))
            }
            Self::Request(err) => {
                HttpResponse::InternalServerError().json(ErrorInformation::new("Collaborator", err))
            }
            Self::Database(err) => {
                HttpResponse::InternalServerError().json(ErrorInformation::new("Database", err))
            }
            Self::Any(err) => HttpResponse::InternalServerError()
                .json(ErrorInformation::new("System unknown", err)),
        }
    }
}
