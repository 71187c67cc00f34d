use std::time::Duration;

use renata_store::{
    app::AppState,
    build_router,
    infrastructure::{config::load_config, logger::init_logging},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let _log_guard = init_logging(&config.logging)?;

    info!("启动 Distribuidora Renata 店铺服务...");

    let state = AppState::seeded(&config);
    let app = build_router(state, Duration::from_secs(config.http.timeout_seconds));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 服务运行在 http://{}", addr);
    info!("📖 公开接口: /api/products /api/categories /api/contact /api/settings");
    info!("🔒 后台接口: /api/admin/* (先调用 POST /api/admin/login)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭...");
    }
}
