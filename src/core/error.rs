//! 核心错误处理模块

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::PoisonError;
use tracing::{error, warn};

/// 核心错误类型
#[derive(Debug, PartialEq)]
pub enum CoreError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::BadRequest(msg) => write!(f, "请求无效: {}", msg),
            CoreError::Unauthorized(msg) => write!(f, "认证失败: {}", msg),
            CoreError::NotFound(msg) => write!(f, "资源不存在: {}", msg),
            CoreError::Conflict(msg) => write!(f, "资源冲突: {}", msg),
            CoreError::InternalServerError(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, user_message) = match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg),
            CoreError::Unauthorized(msg) => ("UNAUTHORIZED", msg),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg),
            CoreError::Conflict(msg) => ("CONFLICT", msg),
            CoreError::InternalServerError(msg) => {
                error!("Internal error: {}", msg);
                ("INTERNAL_SERVER_ERROR", "Error interno del servidor".to_string())
            }
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "Datos inválidos".to_string())
                })
            })
            .collect();
        // field_errors 来自 HashMap，排序后输出稳定
        messages.sort();

        CoreError::BadRequest(messages.join(", "))
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("请求体解析失败: {}", rejection.body_text());
        CoreError::BadRequest(format!(
            "Los datos enviados no son válidos: {}",
            rejection.body_text()
        ))
    }
}

impl From<QueryRejection> for CoreError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("查询参数解析失败: {}", rejection.body_text());
        CoreError::BadRequest(format!(
            "Los parámetros de búsqueda no son válidos: {}",
            rejection.body_text()
        ))
    }
}

impl<T> From<PoisonError<T>> for CoreError {
    fn from(_: PoisonError<T>) -> Self {
        CoreError::InternalServerError("数据表锁已损坏".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CoreError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CoreError::Conflict("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            CoreError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = CoreError::BadRequest("nombre requerido".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
