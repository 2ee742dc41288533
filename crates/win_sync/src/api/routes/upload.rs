use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Extension, Multipart};
use axum::routing::post;
use axum::{Json, Router};
use tokio::fs;
use uuid::Uuid;

use crate::api::error::InnerApiError;
use crate::api::response::UploadResponse;
use crate::api::wrapper::ApiError;
use crate::config::Config;

pub(super) fn router() -> Router {
    // 上传的是完整视频文件，axum 默认 2MB 的请求体上限远远不够
    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(512 * 1024 * 1024))
}

/// 接收 multipart 文件，落盘到媒体目录后返回可公开访问的 URL
/// 与原服务一致：按 content-type 粗分图片和视频两种扩展名，不做其余校验
pub async fn upload_file(
    Extension(config): Extension<Arc<Config>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let content_type = field.content_type().unwrap_or_default().to_string();
        // 整个文件读进内存再落盘，上传体量小，没必要流式
        let data = field.bytes().await?;
        let file_id = Uuid::new_v4().to_string();
        let extension = if content_type.contains("image") { ".jpg" } else { ".mp4" };
        let file_name = format!("{file_id}{extension}");
        fs::create_dir_all(&config.media_dir).await?;
        fs::write(config.media_dir.join(&file_name), &data).await?;
        debug!("已保存上传文件 {file_name}（{} 字节）", data.len());
        return Ok(Json(UploadResponse {
            success: true,
            url: format!("{}/{}", config.public_base.trim_end_matches('/'), file_name),
            file_id,
        }));
    }
    Err(InnerApiError::BadRequest("no file field in request".to_string()).into())
}
