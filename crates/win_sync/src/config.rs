use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::notifier::Notifier;

pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);

#[derive(Parser)]
#[command(name = "Win-Sync", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, default_value = "None,win_sync=info", env = "RUST_LOG")]
    pub log_level: String,

    #[arg(short, long, env = "WIN_SYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Запустить сервис каталога и загрузки файлов
    Serve,
    /// Показать текущий каталог видео
    List,
    /// Добавить новое видео в каталог
    Add(DraftArgs),
    /// Изменить существующее видео
    Edit {
        id: i32,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Удалить видео из каталога
    Delete {
        id: i32,
        /// Не спрашивать подтверждение
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Args)]
pub struct DraftArgs {
    /// Название видео
    #[arg(long)]
    pub title: Option<String>,

    /// Ссылка на видео (YouTube embed)
    #[arg(long, conflicts_with = "video_file")]
    pub video_url: Option<String>,

    /// Локальный видеофайл, будет загружен перед сохранением
    #[arg(long, value_name = "FILE")]
    pub video_file: Option<PathBuf>,

    /// Ссылка на обложку
    #[arg(long, conflicts_with = "thumbnail_file")]
    pub thumbnail_url: Option<String>,

    /// Локальный файл обложки, будет загружен перед сохранением
    #[arg(long, value_name = "FILE")]
    pub thumbnail_file: Option<PathBuf>,

    /// Сумма выигрыша, например "1,500,000₽"
    #[arg(long)]
    pub amount: Option<String>,

    /// Количество просмотров, например "2.3M"
    #[arg(long)]
    pub views: Option<String>,
}

pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    ARGS.config_dir
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("win-sync")))
        .expect("No config dir found")
});

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    let config = Config::load().unwrap_or_else(|err| {
        warn!("加载配置文件失败：{err}，使用默认配置");
        let new_config = Config::default();
        // 保存一次，确保配置文件存在
        new_config.save().expect("failed to save default config");
        new_config
    });
    config.check();
    config
});

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog_endpoint: String,
    pub upload_endpoint: String,
    pub auth_token: String,
    pub bind_address: String,
    pub media_dir: PathBuf,
    pub public_base: String,
    pub notifiers: Vec<Notifier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_endpoint: "http://127.0.0.1:12345/api/videos".to_string(),
            upload_endpoint: "http://127.0.0.1:12345/api/upload".to_string(),
            auth_token: uuid::Uuid::new_v4().to_string(),
            bind_address: "0.0.0.0:12345".to_string(),
            media_dir: CONFIG_DIR.join("media"),
            public_base: "http://127.0.0.1:12345/media".to_string(),
            notifiers: vec![Notifier::Log],
        }
    }
}

impl Config {
    /// 简单的预检查
    pub fn check(&self) {
        assert!(!self.catalog_endpoint.is_empty(), "catalog endpoint must not be empty");
        assert!(!self.upload_endpoint.is_empty(), "upload endpoint must not be empty");
        assert!(!self.auth_token.is_empty(), "auth token must not be empty");
        assert!(!self.public_base.is_empty(), "public base must not be empty");
        assert!(self.media_dir.is_absolute(), "media dir must be absolute");
    }

    fn load() -> Result<Self> {
        let config_path = CONFIG_DIR.join("config.toml");
        let config_content = std::fs::read_to_string(config_path)?;
        Ok(toml::from_str(&config_content)?)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = CONFIG_DIR.join("config.toml");
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
