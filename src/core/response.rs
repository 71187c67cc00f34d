//! 核心响应处理模块

use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use uuid::Uuid;

/// API 响应结构
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub request_id: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// 创建类接口的响应：201 + 响应包装
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn created<T>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}
