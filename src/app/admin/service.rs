//! 后台管理业务服务

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::model::{
    AdminSession, LoginRequest, Notification, NotificationFeed, NotificationKind,
    NotificationView, SiteSettings,
};
use crate::{app::catalog::model::Product, core::error::CoreError};

/// 管理员认证
///
/// 账号密码来自配置，登录成功后发放会话令牌。
/// 会话超过有效期即失效，过期会话在登录和校验时清理。
#[derive(Clone)]
pub struct AuthService {
    email: String,
    password: String,
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, AdminSession>>>,
}

impl AuthService {
    pub fn new(email: impl Into<String>, password: impl Into<String>, ttl: Duration) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<AdminSession, CoreError> {
        if request.email.trim() != self.email || request.password != self.password {
            warn!("管理员登录失败: {}", request.email);
            return Err(CoreError::Unauthorized(
                "Correo electrónico o contraseña incorrectos".to_string(),
            ));
        }

        let now = Utc::now();
        let session = AdminSession {
            token: Uuid::new_v4(),
            email: self.email.clone(),
            created_at: now,
        };

        let mut sessions = self.sessions.write()?;
        let before = sessions.len();
        sessions.retain(|_, existing| !self.expired(existing, now));
        if sessions.len() < before {
            debug!("清理过期会话: {}", before - sessions.len());
        }
        sessions.insert(session.token, session.clone());

        info!("管理员登录成功: {}", session.email);
        Ok(session)
    }

    pub fn logout(&self, token: &Uuid) -> Result<bool, CoreError> {
        Ok(self.sessions.write()?.remove(token).is_some())
    }

    pub fn session(&self, token: &Uuid) -> Result<Option<AdminSession>, CoreError> {
        self.session_at(token, Utc::now())
    }

    fn session_at(
        &self,
        token: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<AdminSession>, CoreError> {
        let session = match self.sessions.read()?.get(token) {
            Some(session) => session.clone(),
            None => return Ok(None),
        };
        if self.expired(&session, now) {
            self.sessions.write()?.remove(token);
            info!("管理员会话已过期: {}", session.email);
            return Ok(None);
        }
        Ok(Some(session))
    }

    fn expired(&self, session: &AdminSession, now: DateTime<Utc>) -> bool {
        now - session.created_at >= self.ttl
    }
}

/// 后台通知
#[derive(Clone)]
pub struct NotificationService {
    items: Arc<RwLock<Vec<Notification>>>,
    next_id: Arc<AtomicU64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn push(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Notification, CoreError> {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
            title: title.into(),
            message: message.into(),
            date: Utc::now(),
            read: false,
            kind,
        };
        self.items.write()?.push(notification.clone());
        Ok(notification)
    }

    pub fn new_message(&self, sender: &str) -> Result<Notification, CoreError> {
        self.push(
            NotificationKind::Message,
            "Nuevo mensaje",
            format!("Ha recibido un nuevo mensaje de contacto de {}", sender),
        )
    }

    pub fn settings_changed(&self, company_name: &str) -> Result<Notification, CoreError> {
        self.push(
            NotificationKind::System,
            "Configuración actualizada",
            format!("Se actualizaron los ajustes del sitio de {}", company_name),
        )
    }

    /// 库存大于 0 且低于阈值时发出提醒
    pub fn check_stock(
        &self,
        product: &Product,
        threshold: u32,
    ) -> Result<Option<Notification>, CoreError> {
        if product.stock == 0 || product.stock >= threshold {
            return Ok(None);
        }
        let unidades = if product.stock == 1 { "unidad" } else { "unidades" };
        self.push(
            NotificationKind::Product,
            "Stock bajo",
            format!(
                "El producto \"{}\" tiene stock bajo ({} {})",
                product.name, product.stock, unidades
            ),
        )
        .map(Some)
    }

    /// 最新的在前
    pub fn feed(&self, now: DateTime<Utc>) -> Result<NotificationFeed, CoreError> {
        let items = self.items.read()?;
        let unread = items.iter().filter(|n| !n.read).count();
        let notifications = items
            .iter()
            .rev()
            .map(|notification| NotificationView {
                time_ago: format_time_ago(notification.date, now),
                notification: notification.clone(),
            })
            .collect();
        Ok(NotificationFeed {
            unread,
            notifications,
        })
    }

    pub fn mark_read(&self, id: &str) -> Result<Notification, CoreError> {
        let mut items = self.items.write()?;
        let notification = items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("La notificación {} no existe", id)))?;
        notification.read = true;
        Ok(notification.clone())
    }

    pub fn mark_all_read(&self) -> Result<usize, CoreError> {
        let mut items = self.items.write()?;
        let mut changed = 0;
        for notification in items.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        Ok(changed)
    }

    pub fn clear(&self) -> Result<usize, CoreError> {
        let mut items = self.items.write()?;
        let removed = items.len();
        items.clear();
        Ok(removed)
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// 站点设置
#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<RwLock<SiteSettings>>,
}

impl SettingsService {
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn get(&self) -> Result<SiteSettings, CoreError> {
        Ok(self.settings.read()?.clone())
    }

    pub fn replace(&self, settings: SiteSettings) -> Result<SiteSettings, CoreError> {
        let settings = settings.normalized();
        settings.validate()?;
        *self.settings.write()? = settings.clone();
        info!("站点设置已更新");
        Ok(settings)
    }
}

/// 相对时间描述，例如 "Hace 25 minutos"
pub fn format_time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_secs = (now - date).num_seconds().max(0) as f64;
    let minutes = (elapsed_secs / 60.0).round() as i64;
    if minutes < 60 {
        return format!("Hace {} {}", minutes, plural(minutes, "minuto", "minutos"));
    }

    let hours = (minutes as f64 / 60.0).round() as i64;
    if hours < 24 {
        return format!("Hace {} {}", hours, plural(hours, "hora", "horas"));
    }

    let days = (hours as f64 / 24.0).round() as i64;
    format!("Hace {} {}", days, plural(days, "día", "días"))
}

fn plural<'a>(count: i64, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
