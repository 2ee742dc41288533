use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize)]
pub struct VideosQuery {
    pub id: Option<i32>,
}

/// 新建记录的请求体，五个字段均必填且非空
#[derive(Deserialize, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub video_url: String,
    #[validate(length(min = 1))]
    pub thumbnail_url: String,
    #[validate(length(min = 1))]
    pub amount: String,
    #[validate(length(min = 1))]
    pub views: String,
}

/// 更新请求体，必须携带已存在记录的 id
#[derive(Deserialize, Validate)]
pub struct UpdateVideoRequest {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub video_url: String,
    #[validate(length(min = 1))]
    pub thumbnail_url: String,
    #[validate(length(min = 1))]
    pub amount: String,
    #[validate(length(min = 1))]
    pub views: String,
}

#[derive(Deserialize)]
pub struct DeleteVideoRequest {
    pub id: i32,
}
