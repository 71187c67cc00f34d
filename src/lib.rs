//! # Distribuidora Renata 店铺服务
//!
//! 为食品批发商的网站提供数据接口：
//! - 商品目录与筛选（关键字、分类、价格区间）
//! - 联系表单与后台收件箱
//! - 后台管理：登录、商品/分类维护、仪表盘、通知、站点设置
//!
//! 所有数据保存在内存中，启动时载入示例数据。

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod seed;

use std::time::Duration;

use axum::{
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use app::{admin, catalog, inbox, AppState};
use crate::core::middleware::{request_logging_middleware, require_admin};

/// 构建完整路由
pub fn build_router(state: AppState, timeout: Duration) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(catalog::handler::list_products))
        .route(
            "/api/products/featured",
            get(catalog::handler::featured_products),
        )
        .route(
            "/api/products/price-range",
            get(catalog::handler::price_range),
        )
        .route("/api/products/:id", get(catalog::handler::get_product))
        .route("/api/categories", get(catalog::handler::list_categories))
        .route("/api/categories/:id", get(catalog::handler::get_category))
        .route("/api/contact", post(inbox::handler::submit_contact))
        .route(
            "/api/contact/whatsapp",
            post(inbox::handler::contact_whatsapp),
        )
        .route("/api/settings", get(admin::handler::get_settings))
        .route("/api/admin/login", post(admin::handler::login));

    let protected = Router::new()
        .route("/api/admin/logout", post(admin::handler::logout))
        .route("/api/admin/dashboard", get(admin::handler::dashboard))
        .route(
            "/api/admin/products",
            post(catalog::handler::create_product),
        )
        .route(
            "/api/admin/products/:id",
            put(catalog::handler::update_product).delete(catalog::handler::delete_product),
        )
        .route(
            "/api/admin/categories",
            post(catalog::handler::create_category),
        )
        .route("/api/admin/messages", get(inbox::handler::list_messages))
        .route(
            "/api/admin/messages/:id",
            get(inbox::handler::view_message).delete(inbox::handler::delete_message),
        )
        .route(
            "/api/admin/messages/:id/read",
            post(inbox::handler::mark_message_read),
        )
        .route(
            "/api/admin/messages/:id/reply-links",
            get(inbox::handler::reply_links),
        )
        .route(
            "/api/admin/notifications",
            get(admin::handler::notifications),
        )
        .route(
            "/api/admin/notifications/read-all",
            post(admin::handler::mark_all_notifications_read),
        )
        .route(
            "/api/admin/notifications/clear",
            post(admin::handler::clear_notifications),
        )
        .route(
            "/api/admin/notifications/:id/read",
            post(admin::handler::mark_notification_read),
        )
        .route("/api/admin/settings", put(admin::handler::update_settings))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public
        .merge(protected)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}

/// 健康检查
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": "in-memory",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
