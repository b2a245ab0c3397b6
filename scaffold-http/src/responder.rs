//! 统一的 JSON 响应构造
//!
use crate::request::RequestError;
use crate::validation::ValidationError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

pub struct ApiResponder;

impl ApiResponder {
    pub fn ok<T: Serialize>(data: Option<T>) -> Response {
        Self::with_data(StatusCode::OK, data)
    }

    pub fn created<T: Serialize>(data: Option<T>) -> Response {
        Self::with_data(StatusCode::CREATED, data)
    }

    pub fn no_content() -> Response {
        StatusCode::NO_CONTENT.into_response()
    }

    pub fn bad_request(message: Option<&str>) -> Response {
        Self::message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: Option<&str>) -> Response {
        Self::message(StatusCode::UNAUTHORIZED, message)
    }

    /// 422，`message` 缺省为 `Validation failed`
    pub fn unprocessable_entity(errors: &[ValidationError], message: Option<&str>) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": message.unwrap_or("Validation failed"),
                "errors": errors,
            })),
        )
            .into_response()
    }

    pub fn internal_server_error(message: Option<&str>) -> Response {
        Self::message(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(message.unwrap_or("Internal Server Error")),
        )
    }

    /// 把请求错误映射为对应状态码
    pub fn send_error(error: RequestError) -> Response {
        match error {
            RequestError::Validation(err) => {
                Self::unprocessable_entity(&err.errors, Some(&err.to_string()))
            }
            RequestError::Authorization(err) => Self::unauthorized(Some(&err.message)),
            RequestError::MalformedBody(reason) => Self::bad_request(Some(&reason)),
        }
    }

    fn with_data<T: Serialize>(status: StatusCode, data: Option<T>) -> Response {
        match data {
            Some(data) => (status, Json(data)).into_response(),
            None => status.into_response(),
        }
    }

    fn message(status: StatusCode, message: Option<&str>) -> Response {
        (status, Json(json!({ "message": message }))).into_response()
    }
}
