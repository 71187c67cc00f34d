//! 后台管理处理器

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use tracing::warn;

use super::model::{
    AdminSession, DashboardStats, LoginRequest, Notification, NotificationFeed, SiteSettings,
};
use crate::{
    app::AppState,
    core::{error::CoreError, extract::ApiJson, response::ApiResponse},
};

pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AdminSession>>, CoreError> {
    let session = state.auth.login(&payload)?;
    Ok(Json(ApiResponse::success(session)))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Json<ApiResponse<Value>>, CoreError> {
    state.auth.logout(&session.token)?;
    Ok(Json(ApiResponse::success(json!({ "loggedOut": true }))))
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, CoreError> {
    let stock = state.catalog.stock_summary(state.low_stock_threshold)?;
    let stats = DashboardStats {
        total_products: stock.total_products,
        products_in_stock: stock.products_in_stock,
        low_stock_products: stock.low_stock_products,
        unread_messages: state.inbox.unread_count()?,
        total_messages: state.inbox.total()?,
        total_categories: state.catalog.category_count()?,
    };
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<NotificationFeed>>, CoreError> {
    let feed = state.notifications.feed(chrono::Utc::now())?;
    Ok(Json(ApiResponse::success(feed)))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>, CoreError> {
    Ok(Json(ApiResponse::success(
        state.notifications.mark_read(&id)?,
    )))
}

pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, CoreError> {
    let updated = state.notifications.mark_all_read()?;
    Ok(Json(ApiResponse::success(json!({ "updated": updated }))))
}

pub async fn clear_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, CoreError> {
    let removed = state.notifications.clear()?;
    Ok(Json(ApiResponse::success(json!({ "removed": removed }))))
}

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SiteSettings>>, CoreError> {
    Ok(Json(ApiResponse::success(state.settings.get()?)))
}

pub async fn update_settings(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SiteSettings>,
) -> Result<Json<ApiResponse<SiteSettings>>, CoreError> {
    let settings = state.settings.replace(payload)?;
    if let Err(err) = state.notifications.settings_changed(&settings.company_name) {
        warn!("设置变更提醒写入失败: {}", err);
    }
    Ok(Json(ApiResponse::success(settings)))
}
