use std::io::Write;
use std::sync::Arc;

use anyhow::{Result, ensure};

use crate::auth::AuthGate;
use crate::catalog::{CatalogStore, Client, Uploader};
use crate::config::{CONFIG, DraftArgs};
use crate::database::{database_connection, migrate_database};
use crate::session::EditSession;
use crate::sync::CatalogSync;
use crate::task::http_server;
use crate::utils::terminate;

/// 启动目录与上传服务，直到收到退出信号
pub async fn serve() -> Result<()> {
    migrate_database().await?;
    let connection = Arc::new(database_connection().await?);
    let config = Arc::new(CONFIG.clone());
    tokio::select! {
        res = http_server(connection, config) => res,
        _ = terminate() => {
            info!("接收到终止信号，服务退出");
            Ok(())
        }
    }
}

/// 拉取并打印当前目录快照
pub async fn list() -> Result<()> {
    let mut sync = catalog_sync();
    sync.refresh().await?;
    if sync.videos().is_empty() {
        println!("Каталог пуст");
        return Ok(());
    }
    for video in sync.videos() {
        println!("{:>5}  {}  |  {}  |  {}", video.id, video.title, video.amount, video.views);
    }
    Ok(())
}

pub async fn add(args: &DraftArgs) -> Result<()> {
    authenticate()?;
    let mut sync = catalog_sync();
    let uploader = uploader();
    let mut session = EditSession::new();
    session.begin_create();
    apply_args(&mut session, args);
    session.submit(&mut sync, &uploader).await
}

pub async fn edit(id: i32, args: &DraftArgs) -> Result<()> {
    authenticate()?;
    let mut sync = catalog_sync();
    let uploader = uploader();
    // 草稿预填远端当前的内容，命令行参数只覆盖给出的字段
    let record = sync.store().get(id).await?;
    let mut session = EditSession::new();
    session.begin_edit(&record);
    apply_args(&mut session, args);
    session.submit(&mut sync, &uploader).await
}

pub async fn delete(id: i32, yes: bool) -> Result<()> {
    authenticate()?;
    // 删除必须先经过阻塞式确认
    if !yes && !confirmed(&prompt("Удалить это видео? [y/N] ")?) {
        info!("Удаление отменено");
        return Ok(());
    }
    let mut sync = catalog_sync();
    sync.delete(id).await
}

fn catalog_sync() -> CatalogSync {
    let store = CatalogStore::new(
        Client::new(),
        CONFIG.catalog_endpoint.clone(),
        CONFIG.auth_token.clone(),
    );
    CatalogSync::new(store, CONFIG.notifiers.clone())
}

fn uploader() -> Uploader {
    Uploader::new(Client::new(), CONFIG.upload_endpoint.clone(), CONFIG.auth_token.clone())
}

/// 登录提示，等价于原站的登录对话框：不通过就不放行后续的变更操作
fn authenticate() -> Result<()> {
    let mut gate = AuthGate::default();
    while !gate.is_authenticated() {
        let username = prompt("Логин: ")?;
        let password = prompt("Пароль: ")?;
        if gate.attempt(&username, &password) {
            info!("Добро пожаловать! Вы успешно авторизовались");
        } else {
            // 不提示具体是哪一项错了
            error!("Ошибка входа: Неверный логин или пароль");
        }
    }
    Ok(())
}

fn apply_args(session: &mut EditSession, args: &DraftArgs) {
    let Some(draft) = session.draft_mut() else {
        return;
    };
    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if let Some(url) = &args.video_url {
        draft.set_video_url(url.clone());
    }
    if let Some(path) = &args.video_file {
        draft.attach_video(path.clone());
    }
    if let Some(url) = &args.thumbnail_url {
        draft.set_thumbnail_url(url.clone());
    }
    if let Some(path) = &args.thumbnail_file {
        draft.attach_thumbnail(path.clone());
    }
    if let Some(amount) = &args.amount {
        draft.amount = amount.clone();
    }
    if let Some(views) = &args.views {
        draft.views = views.clone();
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    ensure!(read > 0, "stdin closed");
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// 确认应答是否为肯定
pub(crate) fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_accepts_affirmative_answers_only() {
        assert!(confirmed("y"));
        assert!(confirmed("Yes"));
        assert!(confirmed(" да "));
        assert!(confirmed("Д"));
        assert!(!confirmed(""));
        assert!(!confirmed("n"));
        assert!(!confirmed("no"));
        assert!(!confirmed("нет"));
    }

    #[test]
    fn test_apply_args_respects_slot_exclusivity() {
        let mut session = EditSession::new();
        session.begin_create();
        apply_args(
            &mut session,
            &DraftArgs {
                title: Some("НЕВЕРОЯТНЫЙ ЗАНОС 1.5М".to_string()),
                video_url: Some("https://www.youtube.com/embed/abc".to_string()),
                video_file: Some("/tmp/clip.mp4".into()),
                thumbnail_url: None,
                thumbnail_file: None,
                amount: Some("1,500,000₽".to_string()),
                views: None,
            },
        );
        let draft = session.draft().unwrap();
        // 文件在 URL 之后应用，URL 槽位被清空
        assert_eq!(draft.video_url(), "");
        assert!(draft.video_file().is_some());
        assert_eq!(draft.title, "НЕВЕРОЯТНЫЙ ЗАНОС 1.5М");
        assert_eq!(draft.views, "");
    }
}
