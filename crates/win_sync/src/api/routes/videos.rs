use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use reqwest::StatusCode;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use win_sync_entity::video;

use crate::api::error::InnerApiError;
use crate::api::request::{CreateVideoRequest, DeleteVideoRequest, UpdateVideoRequest, VideosQuery};
use crate::api::response::{DeleteVideoResponse, VideoResponse};
use crate::api::wrapper::{ApiError, ValidatedJson};

pub(super) fn router() -> Router {
    Router::new().route(
        "/videos",
        get(get_videos).post(create_video).put(update_video).delete(delete_video),
    )
}

/// 列出全部记录，带 id 参数时返回单条，橱窗页和管理端共用
pub async fn get_videos(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(params): Query<VideosQuery>,
) -> Result<Response, ApiError> {
    if let Some(id) = params.id {
        let Some(model) = video::Entity::find_by_id(id).one(db.as_ref()).await? else {
            return Err(InnerApiError::NotFound(id).into());
        };
        return Ok(Json(VideoResponse::from(model)).into_response());
    }
    let videos = video::Entity::find()
        .order_by_desc(video::Column::CreatedAt)
        .order_by_desc(video::Column::Id)
        .all(db.as_ref())
        .await?
        .into_iter()
        .map(VideoResponse::from)
        .collect::<Vec<_>>();
    Ok(Json(videos).into_response())
}

/// 新建记录，id 与时间戳由数据库分配，返回完整的新行
pub async fn create_video(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    ValidatedJson(payload): ValidatedJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>), ApiError> {
    let model = video::Entity::insert(video::ActiveModel {
        title: Set(payload.title),
        video_url: Set(payload.video_url),
        thumbnail_url: Set(payload.thumbnail_url),
        amount: Set(payload.amount),
        views: Set(payload.views),
        ..Default::default()
    })
    .exec_with_returning(db.as_ref())
    .await?;
    Ok((StatusCode::CREATED, Json(model.into())))
}

pub async fn update_video(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    ValidatedJson(payload): ValidatedJson<UpdateVideoRequest>,
) -> Result<Json<VideoResponse>, ApiError> {
    let Some(model) = video::Entity::find_by_id(payload.id).one(db.as_ref()).await? else {
        return Err(InnerApiError::NotFound(payload.id).into());
    };
    let mut model: video::ActiveModel = model.into();
    model.title = Set(payload.title);
    model.video_url = Set(payload.video_url);
    model.thumbnail_url = Set(payload.thumbnail_url);
    model.amount = Set(payload.amount);
    model.views = Set(payload.views);
    model.updated_at = Set(Utc::now().naive_utc());
    Ok(Json(model.update(db.as_ref()).await?.into()))
}

/// 删除指定 id 的记录，返回与原服务一致的 {"success": true, "id": ...}
pub async fn delete_video(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<DeleteVideoRequest>,
) -> Result<Json<DeleteVideoResponse>, ApiError> {
    let result = video::Entity::delete_by_id(payload.id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(InnerApiError::NotFound(payload.id).into());
    }
    Ok(Json(DeleteVideoResponse { success: true, id: payload.id }))
}
