use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use parking_lot::Mutex;
use sea_orm::{ConnectOptions, Database};
use win_sync_migration::{Migrator, MigratorTrait};

use crate::api::routes::router;
use crate::config::Config;

/// 按到达顺序记录的 (method, path)，测试用它断言"恰好一次调用"
pub type RequestLog = Arc<Mutex<Vec<(String, String)>>>;

pub struct TestServer {
    pub config: Arc<Config>,
    pub requests: RequestLog,
}

/// 起一个完整的目录服务：内存 SQLite + 真实路由，绑定随机端口
pub async fn spawn_server() -> TestServer {
    let mut option = ConnectOptions::new("sqlite::memory:");
    // 内存库只能用单连接，连接池里每条连接都是一个独立的空库
    option.max_connections(1).min_connections(1);
    let db = Arc::new(Database::connect(option).await.expect("connect memory db"));
    Migrator::up(db.as_ref(), None).await.expect("migrate memory db");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let media_dir = std::env::temp_dir().join(format!("win-sync-test-{}", uuid::Uuid::new_v4()));
    let config = Arc::new(Config {
        catalog_endpoint: format!("http://{addr}/api/videos"),
        upload_endpoint: format!("http://{addr}/api/upload"),
        auth_token: "test-token".to_string(),
        bind_address: addr.to_string(),
        media_dir,
        public_base: format!("http://{addr}/media"),
        notifiers: vec![],
    });

    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();
    let app = router(db.clone(), config.clone()).layer(middleware::from_fn(move |request: Request, next: Next| {
        let log = log.clone();
        async move {
            log.lock()
                .push((request.method().to_string(), request.uri().path().to_string()));
            next.run(request).await
        }
    }));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    TestServer { config, requests }
}
