use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use diesel::result::Error as DieselError;
use serde_json::json;

#[derive(Debug, Display)]
#[display(fmt = "{}", message)]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, message: String) -> ApiError {
        ApiError {
            status_code,
            message,
        }
    }

    pub fn not_found<M: Into<String>>(message: M) -> ApiError {
        ApiError::new(404, message.into())
    }

    pub fn internal<M: Into<String>>(message: M) -> ApiError {
        ApiError::new(500, message.into())
    }
}

impl std::error::Error for ApiError {}

impl From<DieselError> for ApiError {
    fn from(error: DieselError) -> ApiError {
        match error {
            DieselError::NotFound => ApiError::not_found("Record not found"),
            err => ApiError::internal(format!("Diesel error: {}", err)),
        }
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(error: r2d2::Error) -> ApiError {
        ApiError::internal(format!("Failed getting db connection: {}", error))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Infrastructure details stay in the log.
        let message = if status_code.is_server_error() {
            error!("{}", self.message);
            "Internal server error".to_string()
        } else {
            self.message.clone()
        };

        HttpResponse::build(status_code).json(json!({ "message": message }))
    }
}
