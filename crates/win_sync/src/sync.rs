use anyhow::Result;

use crate::catalog::{CatalogStore, VideoPayload, VideoRecord};
use crate::error::MutationInFlightError;
use crate::notifier::{Notification, Notifier, NotifierAllExt};

/// 目录同步组件，独占持有目录快照
/// 快照永远是最近一次成功拉取的完整结果，变更成功后整体重拉，绝不增量修补
pub struct CatalogSync {
    store: CatalogStore,
    notifiers: Vec<Notifier>,
    videos: Vec<VideoRecord>,
    // 在途标记，挡掉操作员连点两次提交造成的并发变更
    in_flight: bool,
}

enum Mutation<'a> {
    Create(&'a VideoPayload),
    Update(i32, &'a VideoPayload),
    Delete(i32),
}

impl Mutation<'_> {
    fn success_notification(&self) -> Notification {
        match self {
            Mutation::Create(_) => Notification::success("Видео добавлено!", "Изменения сохранены успешно"),
            Mutation::Update(..) => Notification::success("Видео обновлено!", "Изменения сохранены успешно"),
            Mutation::Delete(_) => Notification::success("Видео удалено!", "Видео успешно удалено"),
        }
    }

    fn failure_notification(&self) -> Notification {
        match self {
            Mutation::Create(_) | Mutation::Update(..) => {
                Notification::failure("Ошибка", "Не удалось сохранить видео")
            }
            Mutation::Delete(_) => Notification::failure("Ошибка", "Не удалось удалить видео"),
        }
    }
}

impl CatalogSync {
    pub fn new(store: CatalogStore, notifiers: Vec<Notifier>) -> Self {
        Self {
            store,
            notifiers,
            videos: Vec::new(),
            in_flight: false,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// 最近一次成功拉取的目录快照
    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    /// 重新拉取完整列表，成功整体替换快照，失败保持原快照不动
    pub async fn refresh(&mut self) -> Result<()> {
        self.videos = self.store.list().await?;
        Ok(())
    }

    pub async fn create(&mut self, payload: &VideoPayload) -> Result<()> {
        self.mutate(Mutation::Create(payload)).await
    }

    pub async fn update(&mut self, id: i32, payload: &VideoPayload) -> Result<()> {
        self.mutate(Mutation::Update(id, payload)).await
    }

    /// 调用方必须先拿到操作员的明确确认
    pub async fn delete(&mut self, id: i32) -> Result<()> {
        self.mutate(Mutation::Delete(id)).await
    }

    /// 所有变更的公共路径：至多一次远端调用、成功后恰好一次 refresh、恰好一条通知
    /// 失败时快照保持调用前的原样
    async fn mutate(&mut self, mutation: Mutation<'_>) -> Result<()> {
        if self.in_flight {
            return Err(MutationInFlightError().into());
        }
        if let Mutation::Create(payload) | Mutation::Update(_, payload) = &mutation {
            if let Err(e) = payload.validate() {
                self.notify(mutation.failure_notification()).await;
                return Err(e);
            }
        }
        self.in_flight = true;
        let result = match &mutation {
            Mutation::Create(payload) => self.store.create(payload).await.map(|_| ()),
            Mutation::Update(id, payload) => self.store.update(*id, payload).await.map(|_| ()),
            Mutation::Delete(id) => self.store.delete(*id).await,
        };
        self.in_flight = false;
        match result {
            Ok(()) => {
                self.notify(mutation.success_notification()).await;
                self.refresh().await
            }
            Err(e) => {
                self.notify(mutation.failure_notification()).await;
                Err(e)
            }
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self
            .notifiers
            .notify_all(self.store.client().inner_client(), &notification)
            .await
        {
            warn!("通知发送失败：{e:#}");
        }
    }
}
