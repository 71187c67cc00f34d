//! 商品筛选
//!
//! 所有条件取交集，未提供的条件不参与筛选。

use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer};

use super::model::Product;
use crate::core::error::CoreError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// 名称或描述的子串，不区分大小写
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<f64>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,
}

/// 前台清空筛选框时会发送 `minPrice=`，空白值视为未提供
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl ProductFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        for bound in [self.min_price, self.max_price].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(CoreError::BadRequest(
                    "El rango de precios no es válido".to_string(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(CoreError::BadRequest(
                    "El precio mínimo no puede superar al máximo".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// 空白搜索词视为未提供
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    fn matches(&self, product: &Product, term: Option<&str>) -> bool {
        if let Some(term) = term {
            let hit = product.name.to_lowercase().contains(term)
                || product.description.to_lowercase().contains(term);
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category.as_deref() {
            if product.category_id != category {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }

        if self.featured.is_some_and(|featured| product.featured != featured) {
            return false;
        }
        if self.on_sale.is_some_and(|on_sale| product.on_sale != on_sale) {
            return false;
        }

        true
    }

    /// 按原有顺序返回匹配的商品
    pub fn apply<'a, I>(&self, products: I) -> Vec<Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let term = self.search_term();
        products
            .into_iter()
            .filter(|product| self.matches(product, term.as_deref()))
            .cloned()
            .collect()
    }
}
