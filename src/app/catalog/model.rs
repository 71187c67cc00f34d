//! 商品目录数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 新商品未提供图片时使用的占位图
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    /// 不校验是否存在于分类表
    pub category_id: String,
    pub featured: bool,
    pub on_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// 新建商品请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, max = 120, message = "El nombre del producto es obligatorio"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "El precio debe ser mayor que cero"))]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(length(min = 1, message = "La categoría es obligatoria"))]
    pub category_id: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub on_sale: bool,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "El precio de oferta no puede ser negativo"))]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub stock: u32,
}

/// 更新商品请求，只修改提供的字段
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[validate(length(min = 1, max = 120, message = "El nombre del producto es obligatorio"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "El precio debe ser mayor que cero"))]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    #[validate(length(min = 1, message = "La categoría es obligatoria"))]
    pub category_id: Option<String>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,
    #[validate(range(min = 0.0, message = "El precio de oferta no puede ser negativo"))]
    pub sale_price: Option<f64>,
    pub stock: Option<u32>,
}

/// 新建分类请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// 未提供时自动生成 `cat-N`
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 80, message = "Por favor ingrese un nombre para la categoría"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// 商品列表价格区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBounds {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// 库存概况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_products: usize,
    pub products_in_stock: usize,
    pub low_stock_products: usize,
}

impl NewProduct {
    /// 去除首尾空白，使全空白字段无法通过长度校验
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.category_id = self.category_id.trim().to_string();
        self.image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }
}

impl ProductPatch {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.map(|name| name.trim().to_string());
        self.description = self.description.map(|d| d.trim().to_string());
        self.category_id = self.category_id.map(|id| id.trim().to_string());
        self.image_url = self.image_url.map(|url| url.trim().to_string());
        self
    }
}

impl NewCategory {
    pub fn normalized(mut self) -> Self {
        self.id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self
    }
}
