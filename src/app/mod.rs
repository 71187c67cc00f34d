//! 应用层
//!
//! - catalog: 商品与分类
//! - inbox: 联系表单与收件箱
//! - admin: 登录、仪表盘、通知与站点设置

pub mod admin;
pub mod catalog;
pub mod inbox;

use crate::{infrastructure::config::Config, seed};
use admin::service::{AuthService, NotificationService, SettingsService};
use catalog::service::CatalogService;
use inbox::service::InboxService;

/// 所有处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub inbox: InboxService,
    pub auth: AuthService,
    pub notifications: NotificationService,
    pub settings: SettingsService,
    pub low_stock_threshold: u32,
}

impl AppState {
    /// 使用示例数据初始化内存表
    pub fn seeded(config: &Config) -> Self {
        Self {
            catalog: CatalogService::new(seed::products(), seed::categories()),
            inbox: InboxService::new(seed::messages()),
            auth: AuthService::new(
                config.admin.email.clone(),
                config.admin.password.clone(),
                chrono::Duration::minutes(i64::from(config.admin.session_ttl_minutes)),
            ),
            notifications: NotificationService::new(),
            settings: SettingsService::new(seed::site_settings()),
            low_stock_threshold: config.admin.low_stock_threshold,
        }
    }
}
