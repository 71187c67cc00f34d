//! 后台管理数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录会话，即后台的“管理员标记”
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub token: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub products_in_stock: usize,
    pub low_stock_products: usize,
    pub unread_messages: usize,
    pub total_messages: usize,
    pub total_categories: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Message,
    Product,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// 带相对时间的通知
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub time_ago: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub unread: usize,
    pub notifications: Vec<NotificationView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

/// 站点设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[validate(length(min = 1, max = 120, message = "El nombre de la empresa es obligatorio"))]
    pub company_name: String,
    #[validate(email(message = "Por favor ingrese un correo electrónico válido"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub schedule_weekdays: String,
    #[serde(default)]
    pub schedule_saturday: String,
    #[serde(default)]
    pub show_featured_products: bool,
    #[serde(default)]
    pub show_sale_products: bool,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub site_description: String,
}

impl SiteSettings {
    pub fn normalized(mut self) -> Self {
        self.company_name = self.company_name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self
    }
}
