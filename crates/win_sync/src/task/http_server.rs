use std::sync::Arc;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sea_orm::DatabaseConnection;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use crate::api::routes::router;
use crate::config::Config;

/// 启动目录与上传服务，监听任务退出时返回
pub async fn http_server(database_connection: Arc<DatabaseConnection>, config: Arc<Config>) -> Result<()> {
    let app = router(database_connection, config.clone());
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("bind address failed")?;
    info!("目录服务正在监听 {}", config.bind_address);
    Ok(axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?)
}
