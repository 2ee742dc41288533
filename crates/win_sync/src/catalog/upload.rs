use std::path::Path;

use anyhow::{Context, Result, bail};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::catalog::{CatalogError, Client, Validate};

/// 把本地文件提交到上传接口，换取一个可公开访问的 URL
/// 不做重试、分块和类型校验，失败直接返回错误交给调用方提示
pub struct Uploader {
    client: Client,
    endpoint: String,
    token: String,
}

impl Uploader {
    pub fn new(client: Client, endpoint: String, token: String) -> Self {
        Self { client, endpoint, token }
    }

    pub async fn upload(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read file {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let part = Part::bytes(bytes).file_name(file_name).mime_str(guess_mime(path))?;
        let mut res = self
            .client
            .request(Method::POST, &self.endpoint, Some(&self.token))
            .multipart(Form::new().part("file", part))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?
            .validate()?;
        match res["url"].take() {
            serde_json::Value::String(url) if !url.is_empty() => Ok(url),
            _ => bail!(CatalogError::UploadUrlMissing(res.to_string())),
        }
    }
}

/// 远端按 content-type 里是否带 image 决定扩展名，这里给个粗略的猜测就够了
fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "video/mp4",
    }
}
