//! 商品目录处理器

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use tracing::warn;

use super::{
    filter::ProductFilter,
    model::{Category, NewCategory, NewProduct, PriceBounds, Product, ProductPatch},
};
use crate::{
    app::AppState,
    core::{
        error::CoreError,
        extract::{ApiJson, ApiQuery},
        response::{created, ApiResponse, Created},
    },
};

/// 首页默认展示的推荐商品数量
const DEFAULT_FEATURED_LIMIT: usize = 4;

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let products = state.catalog.list_products(&filter)?;
    Ok(Json(ApiResponse::success(products)))
}

pub async fn featured_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FeaturedQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    let products = state.catalog.featured_products(limit)?;
    Ok(Json(ApiResponse::success(products)))
}

pub async fn price_range(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PriceBounds>>, CoreError> {
    Ok(Json(ApiResponse::success(state.catalog.price_bounds()?)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.catalog.get_product(&id)?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>, CoreError> {
    Ok(Json(ApiResponse::success(state.catalog.list_categories()?)))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Category>>, CoreError> {
    Ok(Json(ApiResponse::success(state.catalog.get_category(&id)?)))
}

pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProduct>,
) -> Result<Created<Product>, CoreError> {
    let product = state.catalog.create_product(payload)?;
    notify_low_stock(&state, &product);
    Ok(created(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.catalog.update_product(&id, patch)?;
    notify_low_stock(&state, &product);
    Ok(Json(ApiResponse::success(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.catalog.delete_product(&id)?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewCategory>,
) -> Result<Created<Category>, CoreError> {
    let category = state.catalog.create_category(payload)?;
    Ok(created(category))
}

/// 通知失败不影响商品操作本身
fn notify_low_stock(state: &AppState, product: &Product) {
    if let Err(err) = state
        .notifications
        .check_stock(product, state.low_stock_threshold)
    {
        warn!("库存提醒写入失败: {}", err);
    }
}
