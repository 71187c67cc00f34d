//! 商品目录业务服务

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use tracing::{debug, info};
use validator::Validate;

use super::{
    filter::ProductFilter,
    model::{
        Category, NewCategory, NewProduct, PriceBounds, Product, ProductPatch, StockSummary,
        PLACEHOLDER_IMAGE,
    },
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct CatalogService {
    products: Arc<RwLock<Vec<Product>>>,
    categories: Arc<RwLock<Vec<Category>>>,
    next_product: Arc<AtomicU64>,
    next_category: Arc<AtomicU64>,
}

impl CatalogService {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        // 编号从当前条数之后开始，删除后也不会复用
        let next_product = products.len() as u64 + 1;
        let next_category = categories.len() as u64 + 1;
        Self {
            products: Arc::new(RwLock::new(products)),
            categories: Arc::new(RwLock::new(categories)),
            next_product: Arc::new(AtomicU64::new(next_product)),
            next_category: Arc::new(AtomicU64::new(next_category)),
        }
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CoreError> {
        filter.validate()?;
        let products = self.products.read()?;
        let result = filter.apply(products.iter());
        debug!("商品筛选: {:?} -> {} / {}", filter, result.len(), products.len());
        Ok(result)
    }

    pub fn featured_products(&self, limit: usize) -> Result<Vec<Product>, CoreError> {
        let products = self.products.read()?;
        Ok(products
            .iter()
            .filter(|product| product.featured)
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn price_bounds(&self) -> Result<PriceBounds, CoreError> {
        let products = self.products.read()?;
        let prices = products.iter().map(|product| product.price);
        Ok(PriceBounds {
            min_price: prices.clone().reduce(f64::min),
            max_price: prices.reduce(f64::max),
        })
    }

    pub fn get_product(&self, id: &str) -> Result<Product, CoreError> {
        let products = self.products.read()?;
        products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| product_not_found(id))
    }

    pub fn create_product(&self, payload: NewProduct) -> Result<Product, CoreError> {
        let payload = payload.normalized();
        payload.validate()?;

        let id = format!(
            "product-{}",
            self.next_product.fetch_add(1, Ordering::Relaxed)
        );
        let product = Product {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            image_url: payload
                .image_url
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            category_id: payload.category_id,
            featured: payload.featured,
            on_sale: payload.on_sale,
            sale_price: if payload.on_sale {
                payload.sale_price
            } else {
                None
            },
            stock: payload.stock,
        };

        self.products.write()?.push(product.clone());
        info!("商品已创建: {} ({})", product.id, product.name);
        Ok(product)
    }

    pub fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, CoreError> {
        let patch = patch.normalized();
        patch.validate()?;

        let mut products = self.products.write()?;
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| product_not_found(id))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = if image_url.is_empty() {
                PLACEHOLDER_IMAGE.to_string()
            } else {
                image_url
            };
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = category_id;
        }
        if let Some(featured) = patch.featured {
            product.featured = featured;
        }
        if let Some(on_sale) = patch.on_sale {
            product.on_sale = on_sale;
        }
        if let Some(sale_price) = patch.sale_price {
            product.sale_price = Some(sale_price);
        }
        if !product.on_sale {
            product.sale_price = None;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }

        info!("商品已更新: {}", product.id);
        Ok(product.clone())
    }

    pub fn delete_product(&self, id: &str) -> Result<Product, CoreError> {
        let mut products = self.products.write()?;
        let index = products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| product_not_found(id))?;
        let removed = products.remove(index);
        info!("商品已删除: {}", removed.id);
        Ok(removed)
    }

    pub fn stock_summary(&self, low_stock_threshold: u32) -> Result<StockSummary, CoreError> {
        let products = self.products.read()?;
        Ok(StockSummary {
            total_products: products.len(),
            products_in_stock: products.iter().filter(|p| p.stock > 0).count(),
            low_stock_products: products
                .iter()
                .filter(|p| p.stock > 0 && p.stock < low_stock_threshold)
                .count(),
        })
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.categories.read()?.clone())
    }

    pub fn get_category(&self, id: &str) -> Result<Category, CoreError> {
        let categories = self.categories.read()?;
        categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("La categoría {} no existe", id)))
    }

    pub fn create_category(&self, payload: NewCategory) -> Result<Category, CoreError> {
        let payload = payload.normalized();
        payload.validate()?;

        let mut categories = self.categories.write()?;
        let id = match payload.id {
            Some(id) => {
                if categories.iter().any(|category| category.id == id) {
                    return Err(CoreError::Conflict(format!(
                        "Ya existe una categoría con el identificador {}",
                        id
                    )));
                }
                id
            }
            None => loop {
                let candidate = format!(
                    "cat-{}",
                    self.next_category.fetch_add(1, Ordering::Relaxed)
                );
                if !categories.iter().any(|category| category.id == candidate) {
                    break candidate;
                }
            },
        };

        let category = Category {
            id,
            name: payload.name,
            description: payload.description,
        };
        categories.push(category.clone());
        info!("分类已创建: {} ({})", category.id, category.name);
        Ok(category)
    }

    pub fn category_count(&self) -> Result<usize, CoreError> {
        Ok(self.categories.read()?.len())
    }
}

fn product_not_found(id: &str) -> CoreError {
    CoreError::NotFound(format!("El producto {} no existe", id))
}
