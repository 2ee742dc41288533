use serde::Serialize;
use win_sync_entity::video;

/// 目录记录的对外形态，时间戳序列化成字符串，客户端可以原样忽略
#[derive(Serialize)]
pub struct VideoResponse {
    pub id: i32,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub amount: String,
    pub views: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<video::Model> for VideoResponse {
    fn from(model: video::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            video_url: model.video_url,
            thumbnail_url: model.thumbnail_url,
            amount: model.amount,
            views: model.views,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct DeleteVideoResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub file_id: String,
}
