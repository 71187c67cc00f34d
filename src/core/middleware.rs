//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::CoreError;
use crate::app::AppState;

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - User-Agent: {:?}",
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    response
}

/// 从 `Authorization: Bearer <token>` 中取出令牌
fn bearer_token(req: &Request) -> Option<Uuid> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    let token = value.strip_prefix("Bearer ")?.trim();
    Uuid::parse_str(token).ok()
}

/// 后台认证中间件
///
/// 令牌必须对应一个有效会话，会话写入请求扩展供处理器使用。
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let denied = || {
        CoreError::Unauthorized(
            "Acceso denegado. Por favor, inicie sesión para acceder al panel de administración"
                .to_string(),
        )
    };

    let token = bearer_token(&req).ok_or_else(denied)?;
    let session = match state.auth.session(&token)? {
        Some(session) => session,
        None => {
            warn!("无效的管理员令牌: {} {}", req.method(), req.uri().path());
            return Err(denied());
        }
    };

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
