use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::catalog::{Uploader, VideoPayload, VideoRecord};
use crate::error::EmptyFieldError;
use crate::sync::CatalogSync;

/// 正在编辑、尚未持久化的字段值
/// 两个媒体槽位各自可以挂一个待上传的本地文件，文件与手填 URL 互斥
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub amount: String,
    pub views: String,
    video_url: String,
    thumbnail_url: String,
    video_file: Option<PathBuf>,
    thumbnail_file: Option<PathBuf>,
}

impl Draft {
    pub fn from_record(record: &VideoRecord) -> Self {
        Self {
            title: record.title.clone(),
            amount: record.amount.clone(),
            views: record.views.clone(),
            video_url: record.video_url.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
            video_file: None,
            thumbnail_file: None,
        }
    }

    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn video_file(&self) -> Option<&Path> {
        self.video_file.as_deref()
    }

    pub fn thumbnail_file(&self) -> Option<&Path> {
        self.thumbnail_file.as_deref()
    }

    /// 手填视频 URL，同时清掉该槽位挂着的本地文件
    pub fn set_video_url(&mut self, url: impl Into<String>) {
        self.video_url = url.into();
        self.video_file = None;
    }

    /// 挂载待上传的视频文件，同时清掉手填的 URL
    pub fn attach_video(&mut self, path: impl Into<PathBuf>) {
        self.video_file = Some(path.into());
        self.video_url.clear();
    }

    pub fn set_thumbnail_url(&mut self, url: impl Into<String>) {
        self.thumbnail_url = url.into();
        self.thumbnail_file = None;
    }

    pub fn attach_thumbnail(&mut self, path: impl Into<PathBuf>) {
        self.thumbnail_file = Some(path.into());
        self.thumbnail_url.clear();
    }

    /// 提交前的本地校验：五个必填项都要有内容，媒体槽位挂着待传文件也算已填
    fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(EmptyFieldError("title").into());
        }
        if self.video_url.is_empty() && self.video_file.is_none() {
            return Err(EmptyFieldError("video_url").into());
        }
        if self.thumbnail_url.is_empty() && self.thumbnail_file.is_none() {
            return Err(EmptyFieldError("thumbnail_url").into());
        }
        if self.amount.is_empty() {
            return Err(EmptyFieldError("amount").into());
        }
        if self.views.is_empty() {
            return Err(EmptyFieldError("views").into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Closed,
    CreatingNew(Draft),
    EditingExisting { id: i32, draft: Draft },
}

/// 编辑会话控制器
/// 只有 create/update 成功后会话才会关闭，失败保留草稿让操作员直接重试
pub struct EditSession {
    state: SessionState,
    // 会话纪元，取消或关闭都会递增
    // 提交中的请求无法中止，靠它丢弃迟到的结果，避免写回已经翻篇的会话
    epoch: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Closed,
            epoch: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Closed)
    }

    pub fn editing_id(&self) -> Option<i32> {
        match &self.state {
            SessionState::EditingExisting { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// 开始新建，草稿为空表单
    pub fn begin_create(&mut self) {
        self.epoch += 1;
        self.state = SessionState::CreatingNew(Draft::default());
    }

    /// 开始编辑，草稿预填自已有记录
    pub fn begin_edit(&mut self, record: &VideoRecord) {
        self.epoch += 1;
        self.state = SessionState::EditingExisting {
            id: record.id,
            draft: Draft::from_record(record),
        };
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            SessionState::Closed => None,
            SessionState::CreatingNew(draft) | SessionState::EditingExisting { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.state {
            SessionState::Closed => None,
            SessionState::CreatingNew(draft) | SessionState::EditingExisting { draft, .. } => Some(draft),
        }
    }

    /// 无条件丢弃草稿并关闭会话
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.state = SessionState::Closed;
    }

    /// 提交当前草稿：先把挂着的文件按视频、封面的顺序换成 URL，任何一个上传失败则整体失败，
    /// 不会发起 create/update；目录调用成功之后会话才关闭
    pub async fn submit(&mut self, sync: &mut CatalogSync, uploader: &Uploader) -> Result<()> {
        let (id, mut draft) = match &self.state {
            SessionState::Closed => bail!("no active edit session"),
            SessionState::CreatingNew(draft) => (None, draft.clone()),
            SessionState::EditingExisting { id, draft } => (Some(*id), draft.clone()),
        };
        draft.validate()?;
        let epoch = self.epoch;
        if let Some(path) = draft.video_file().map(Path::to_path_buf) {
            let url = uploader.upload(&path).await?;
            draft.set_video_url(url);
        }
        if let Some(path) = draft.thumbnail_file().map(Path::to_path_buf) {
            let url = uploader.upload(&path).await?;
            draft.set_thumbnail_url(url);
        }
        let payload = VideoPayload {
            title: draft.title.clone(),
            video_url: draft.video_url().to_string(),
            thumbnail_url: draft.thumbnail_url().to_string(),
            amount: draft.amount.clone(),
            views: draft.views.clone(),
        };
        match id {
            None => sync.create(&payload).await?,
            Some(id) => sync.update(id, &payload).await?,
        }
        // 提交期间会话可能已被取消或重新打开，此时丢弃结果，不再动当前状态
        if self.epoch == epoch {
            self.epoch += 1;
            self.state = SessionState::Closed;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogStore, Client};
    use crate::utils::test_support::{TestServer, spawn_server};

    fn record() -> VideoRecord {
        VideoRecord {
            id: 5,
            title: "МАКСИМАЛЬНЫЙ ЗАНОС".to_string(),
            video_url: "https://www.youtube.com/embed/abc".to_string(),
            thumbnail_url: "https://example.com/cover.jpg".to_string(),
            amount: "1,200,000₽".to_string(),
            views: "2.9M".to_string(),
        }
    }

    fn filled_draft(draft: &mut Draft) {
        draft.title = "НЕВЕРОЯТНЫЙ ЗАНОС 1.5М".to_string();
        draft.set_video_url("https://www.youtube.com/embed/abc");
        draft.set_thumbnail_url("https://example.com/cover.jpg");
        draft.amount = "1,500,000₽".to_string();
        draft.views = "2.3M".to_string();
    }

    fn sync_for(server: &TestServer) -> CatalogSync {
        let store = CatalogStore::new(
            Client::new(),
            server.config.catalog_endpoint.clone(),
            server.config.auth_token.clone(),
        );
        CatalogSync::new(store, vec![])
    }

    fn uploader_for(server: &TestServer) -> Uploader {
        Uploader::new(
            Client::new(),
            server.config.upload_endpoint.clone(),
            server.config.auth_token.clone(),
        )
    }

    fn unreachable_uploader() -> Uploader {
        Uploader::new(
            Client::new(),
            "http://127.0.0.1:1/api/upload".to_string(),
            "token".to_string(),
        )
    }

    async fn temp_media_file(name: &str, len: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!("win-sync-{}-{name}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, vec![0u8; len]).await.unwrap();
        path
    }

    #[test]
    fn test_attach_clears_url_and_url_clears_attachment() {
        let mut draft = Draft::default();
        draft.set_video_url("https://www.youtube.com/embed/abc");
        draft.attach_video("/tmp/clip.mp4");
        assert_eq!(draft.video_url(), "");
        assert_eq!(draft.video_file(), Some(Path::new("/tmp/clip.mp4")));

        draft.set_video_url("https://www.youtube.com/embed/def");
        assert_eq!(draft.video_url(), "https://www.youtube.com/embed/def");
        assert_eq!(draft.video_file(), None);

        draft.attach_thumbnail("/tmp/cover.jpg");
        assert_eq!(draft.thumbnail_url(), "");
        draft.set_thumbnail_url("https://example.com/cover.jpg");
        assert_eq!(draft.thumbnail_file(), None);
    }

    #[test]
    fn test_begin_edit_prefills_draft_from_record() {
        let mut session = EditSession::new();
        session.begin_edit(&record());
        assert!(session.is_open());
        assert_eq!(session.editing_id(), Some(5));
        let draft = session.draft().unwrap();
        assert_eq!(draft.title, "МАКСИМАЛЬНЫЙ ЗАНОС");
        assert_eq!(draft.video_url(), "https://www.youtube.com/embed/abc");
        assert_eq!(draft.video_file(), None);
    }

    #[test]
    fn test_cancel_discards_draft_unconditionally() {
        let mut session = EditSession::new();
        session.begin_create();
        session.draft_mut().unwrap().title = "ДЖЕКПОТ".to_string();
        session.cancel();
        assert!(!session.is_open());
        assert!(session.draft().is_none());
        // 再次打开拿到的是全新草稿
        session.begin_create();
        assert_eq!(session.draft().unwrap(), &Draft::default());
    }

    #[tokio::test]
    async fn test_submit_rejects_incomplete_draft_before_any_request() {
        let store = CatalogStore::new(
            Client::new(),
            "http://127.0.0.1:1/api/videos".to_string(),
            "token".to_string(),
        );
        let mut sync = CatalogSync::new(store, vec![]);
        let mut session = EditSession::new();
        session.begin_create();
        session.draft_mut().unwrap().title = "БЕЗ ОСТАЛЬНЫХ ПОЛЕЙ".to_string();
        let err = session.submit(&mut sync, &unreachable_uploader()).await.unwrap_err();
        assert_eq!(err.downcast_ref::<EmptyFieldError>().unwrap().0, "video_url");
        // 校验失败会话保持打开，草稿原样保留
        assert!(session.is_open());
        assert_eq!(session.draft().unwrap().title, "БЕЗ ОСТАЛЬНЫХ ПОЛЕЙ");
    }

    #[tokio::test]
    async fn test_submit_uploads_attachment_then_creates() {
        let server = spawn_server().await;
        let mut sync = sync_for(&server);
        let uploader = uploader_for(&server);

        let clip = temp_media_file("clip.mp4", 2 * 1024 * 1024).await;
        let mut session = EditSession::new();
        session.begin_create();
        let draft = session.draft_mut().unwrap();
        filled_draft(draft);
        draft.attach_video(&clip);

        server.requests.lock().clear();
        session.submit(&mut sync, &uploader).await.unwrap();
        assert!(!session.is_open());
        // 恰好一次上传、一次创建、一次重拉
        assert_eq!(
            *server.requests.lock(),
            vec![
                ("POST".to_string(), "/api/upload".to_string()),
                ("POST".to_string(), "/api/videos".to_string()),
                ("GET".to_string(), "/api/videos".to_string()),
            ]
        );
        let video = &sync.videos()[0];
        assert!(video.video_url.starts_with(&server.config.public_base));
        assert!(video.video_url.ends_with(".mp4"));
        // 手填的封面 URL 原样入库
        assert_eq!(video.thumbnail_url, "https://example.com/cover.jpg");
        tokio::fs::remove_file(&clip).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_upload_aborts_submit_without_catalog_call() {
        let server = spawn_server().await;
        let mut sync = sync_for(&server);
        // 上传端令牌错误，远端会拒绝
        let uploader = Uploader::new(
            Client::new(),
            server.config.upload_endpoint.clone(),
            "wrong-token".to_string(),
        );

        let clip = temp_media_file("clip.mp4", 1024).await;
        let mut session = EditSession::new();
        session.begin_create();
        let draft = session.draft_mut().unwrap();
        filled_draft(draft);
        draft.attach_video(&clip);

        server.requests.lock().clear();
        assert!(session.submit(&mut sync, &uploader).await.is_err());
        // 上传失败后不应有任何目录调用，会话保持打开
        assert_eq!(
            *server.requests.lock(),
            vec![("POST".to_string(), "/api/upload".to_string())]
        );
        assert!(session.is_open());
        assert_eq!(session.draft().unwrap().video_file(), Some(clip.as_path()));
        tokio::fs::remove_file(&clip).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_save_keeps_session_open_for_retry() {
        let server = spawn_server().await;
        // 目录端令牌错误，create 会收到 401
        let store = CatalogStore::new(
            Client::new(),
            server.config.catalog_endpoint.clone(),
            "wrong-token".to_string(),
        );
        let mut sync = CatalogSync::new(store, vec![]);
        let uploader = uploader_for(&server);

        let mut session = EditSession::new();
        session.begin_create();
        filled_draft(session.draft_mut().unwrap());
        let before = session.draft().unwrap().clone();
        assert!(session.submit(&mut sync, &uploader).await.is_err());
        assert!(session.is_open());
        assert_eq!(session.draft().unwrap(), &before);
    }

    #[tokio::test]
    async fn test_submit_updates_existing_record() {
        let server = spawn_server().await;
        let mut sync = sync_for(&server);
        let uploader = uploader_for(&server);

        let mut session = EditSession::new();
        session.begin_create();
        filled_draft(session.draft_mut().unwrap());
        session.submit(&mut sync, &uploader).await.unwrap();
        let created = sync.videos()[0].clone();

        session.begin_edit(&created);
        session.draft_mut().unwrap().title = "ЛЕГЕНДАРНАЯ РАЗДАЧА".to_string();
        session.submit(&mut sync, &uploader).await.unwrap();
        assert_eq!(sync.videos().len(), 1);
        assert_eq!(sync.videos()[0].id, created.id);
        assert_eq!(sync.videos()[0].title, "ЛЕГЕНДАРНАЯ РАЗДАЧА");
        assert_eq!(sync.videos()[0].views, created.views);
    }
}
