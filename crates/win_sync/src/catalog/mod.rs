use anyhow::{Result, bail, ensure};
pub use client::Client;
pub use error::CatalogError;
use serde::{Deserialize, Serialize};
pub use store::{CatalogStore, VideoPayload};
pub use upload::Uploader;

mod client;
mod error;
mod store;
mod upload;

/// 远端目录中的一条视频记录，id 由远端分配
/// amount 与 views 是展示用的自由文本，永远不做数值解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: i32,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub amount: String,
    pub views: String,
}

pub(crate) trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output>;
}

/// 上传与删除接口返回 {"success": bool, ...} 信封，校验通过后原样返回
impl Validate for serde_json::Value {
    type Output = serde_json::Value;

    fn validate(self) -> Result<Self::Output> {
        let Some(success) = self["success"].as_bool() else {
            bail!(CatalogError::InvalidResponse(self.to_string()));
        };
        ensure!(success, CatalogError::ErrorResponse(self.to_string()));
        Ok(self)
    }
}
