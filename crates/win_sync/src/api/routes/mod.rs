use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Request, State};
use axum::http::{HeaderMap, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use reqwest::StatusCode;
use sea_orm::DatabaseConnection;
use tower_http::services::ServeDir;

use crate::config::Config;

mod upload;
mod videos;

pub fn router(database_connection: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .nest_service("/media", ServeDir::new(&config.media_dir))
        .nest(
            "/api",
            videos::router()
                .merge(upload::router())
                .layer(middleware::from_fn_with_state(config.clone(), auth)),
        )
        .layer(Extension(database_connection))
        .layer(Extension(config))
}

/// 中间件：橱窗目录公开可读，除 GET 外的请求必须携带与配置一致的 Authorization
/// 客户端里的登录校验只是界面摆设，这里才是真正挡人的地方
pub async fn auth(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if request.method() != &Method::GET && get_token(&headers) != Some(config.auth_token.clone()) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn get_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .map(Into::into)
}
