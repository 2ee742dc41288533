use std::io;

use tokio::signal;
use tracing_subscriber::util::SubscriberInitExt;

#[cfg(test)]
pub mod test_support;

/// 初始化全局日志，过滤规则来自 --log-level（或 RUST_LOG）
pub fn init_logger(log_level: &str) {
    tracing_subscriber::fmt::Subscriber::builder()
        .compact()
        .with_env_filter(tracing_subscriber::EnvFilter::builder().parse_lossy(log_level))
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new("%b %d %H:%M:%S".to_owned()))
        .finish()
        .try_init()
        .expect("初始化日志失败");
}

#[cfg(target_family = "windows")]
pub async fn terminate() -> io::Result<()> {
    signal::ctrl_c().await
}

/// ctrl + c 对应 SIGINT，docker stop 发的是 SIGTERM，两个都要响应
#[cfg(target_family = "unix")]
pub async fn terminate() -> io::Result<()> {
    use tokio::select;

    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    let mut int = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
    select! {
        _ = term.recv() => Ok(()),
        _ = int.recv() => Ok(()),
    }
}
