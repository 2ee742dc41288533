use anyhow::Result;
use reqwest::Method;
use serde::Serialize;

use crate::catalog::{Client, Validate, VideoRecord};
use crate::error::EmptyFieldError;

/// 远端目录仓库的 HTTP 客户端，目录内容以远端为准
pub struct CatalogStore {
    client: Client,
    endpoint: String,
    token: String,
}

/// 创建与更新共用的请求体，五个字段都必须非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoPayload {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub amount: String,
    pub views: String,
}

impl VideoPayload {
    /// 发起网络请求之前的本地校验，任何空字段都会在这里被拦下
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("title", &self.title),
            ("video_url", &self.video_url),
            ("thumbnail_url", &self.thumbnail_url),
            ("amount", &self.amount),
            ("views", &self.views),
        ] {
            if value.is_empty() {
                return Err(EmptyFieldError(name).into());
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    id: i32,
    #[serde(flatten)]
    payload: &'a VideoPayload,
}

#[derive(Serialize)]
struct DeleteBody {
    id: i32,
}

impl CatalogStore {
    pub fn new(client: Client, endpoint: String, token: String) -> Self {
        Self { client, endpoint, token }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// 拉取完整的目录列表，远端按创建时间倒序返回
    pub async fn list(&self) -> Result<Vec<VideoRecord>> {
        Ok(self
            .client
            .request(Method::GET, &self.endpoint, None)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<VideoRecord>>()
            .await?)
    }

    /// 按 id 获取单条记录
    pub async fn get(&self, id: i32) -> Result<VideoRecord> {
        Ok(self
            .client
            .request(Method::GET, &self.endpoint, None)
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?
            .json::<VideoRecord>()
            .await?)
    }

    pub async fn create(&self, payload: &VideoPayload) -> Result<VideoRecord> {
        Ok(self
            .client
            .request(Method::POST, &self.endpoint, Some(&self.token))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json::<VideoRecord>()
            .await?)
    }

    pub async fn update(&self, id: i32, payload: &VideoPayload) -> Result<VideoRecord> {
        Ok(self
            .client
            .request(Method::PUT, &self.endpoint, Some(&self.token))
            .json(&UpdateBody { id, payload })
            .send()
            .await?
            .error_for_status()?
            .json::<VideoRecord>()
            .await?)
    }

    /// 删除返回 {"success": true, "id": ...} 信封
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.client
            .request(Method::DELETE, &self.endpoint, Some(&self.token))
            .json(&DeleteBody { id })
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?
            .validate()?;
        Ok(())
    }
}
