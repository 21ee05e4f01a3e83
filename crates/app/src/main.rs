mod logging;
mod settings;
mod ticker;

use std::sync::Arc;

use tracing::info;

use voltrack_api::server::{AppState, start_server};
use voltrack_core::common::time::{ExchangeClock, RealTimeProvider};
use voltrack_core::volume::port::VolumeProjector;
use voltrack_projection::service::ProjectionService;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化具体实现组件并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 加载配置并初始化全局日志。
/// 2. 构造交易所时钟与推算服务。
/// 3. 启动时钟心跳。
/// 4. 启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load()?;
    let _log_guard = logging::init_logging(&config.log)?;
    info!("Voltrack starting...");

    // 2. 时钟与推算服务
    let clock = Arc::new(ExchangeClock::from_timezone_name(
        Arc::new(RealTimeProvider),
        &config.market.timezone,
    )?);
    let projector: Arc<dyn VolumeProjector> = Arc::new(ProjectionService::new());
    info!(
        "Exchange clock ready: timezone={}, local time={}",
        clock.timezone(),
        clock.now().format("%Y-%m-%d %H:%M:%S")
    );

    // 3. 时钟心跳
    let heartbeat = tokio::spawn(ticker::run(
        projector.clone(),
        clock.clone(),
        config.clock.tick_secs,
        config.market.default_average_daily_volume.clone(),
    ));

    // 4. HTTP 服务
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        projector,
        clock,
        app_config: Arc::new(config),
    };

    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received. Exiting..."),
    }
    heartbeat.abort();

    Ok(())
}
