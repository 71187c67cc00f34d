//! 联系消息数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub date: DateTime<Utc>,
    pub read: bool,
}

/// 联系表单
///
/// 缺失的字段按空值处理，交给校验给出具体提示。
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "El nombre es obligatorio"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Por favor ingrese un correo electrónico válido"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "El mensaje es obligatorio"))]
    pub message: String,
}

impl ContactForm {
    /// 去除首尾空白，空电话视为未提供
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self
            .phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());
        self.message = self.message.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// WhatsApp 跳转链接
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppLink {
    pub url: String,
}

/// 后台回复消息所用的链接
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyLinks {
    pub mailto: String,
    /// 发件人未留电话时为空
    pub whatsapp: Option<String>,
}
