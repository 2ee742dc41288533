use anyhow::Result;
use futures::future;
use serde::{Deserialize, Serialize};

/// 一次操作结果对应的一条用户可见通知，标题区分场景，正文是通用描述
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: &'static str,
    pub body: &'static str,
    pub success: bool,
}

impl Notification {
    pub fn success(title: &'static str, body: &'static str) -> Self {
        Self { title, body, success: true }
    }

    pub fn failure(title: &'static str, body: &'static str) -> Self {
        Self { title, body, success: false }
    }
}

/// 通知途径：终端日志，或向外部 webhook 推送一条 JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Notifier {
    Log,
    Webhook { url: String },
}

pub trait NotifierAllExt {
    async fn notify_all(&self, client: &reqwest::Client, notification: &Notification) -> Result<()>;
}

impl NotifierAllExt for Vec<Notifier> {
    async fn notify_all(&self, client: &reqwest::Client, notification: &Notification) -> Result<()> {
        future::join_all(self.iter().map(|notifier| notifier.notify(client, notification))).await;
        Ok(())
    }
}

impl Notifier {
    pub async fn notify(&self, client: &reqwest::Client, notification: &Notification) -> Result<()> {
        match self {
            Notifier::Log => {
                if notification.success {
                    info!("{}: {}", notification.title, notification.body);
                } else {
                    error!("{}: {}", notification.title, notification.body);
                }
            }
            Notifier::Webhook { url } => {
                client
                    .post(url)
                    .json(&serde_json::json!({
                        "title": notification.title,
                        "description": notification.body,
                        "success": notification.success,
                    }))
                    .send()
                    .await?
                    .error_for_status()?;
            }
        }
        Ok(())
    }
}
