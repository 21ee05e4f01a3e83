//! # 日志初始化
//!
//! 控制台与按天滚动的日志文件双路输出。`RUST_LOG` 存在时优先于配置中的级别。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use voltrack_core::config::LogConfig;

const LOG_FILE_PREFIX: &str = "voltrack.log";

/// # Summary
/// 初始化全局 tracing 订阅器。
///
/// # Returns
/// 文件写入线程的守卫，必须在进程存活期间持有，否则缓冲日志会丢失。
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.dir)?;

    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX));

    let console_layer = fmt::layer().with_target(true).with_filter(filter());
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
