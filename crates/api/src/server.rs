//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use voltrack_core::common::time::ExchangeClock;
use voltrack_core::config::AppConfig;
use voltrack_core::volume::port::VolumeProjector;

use crate::routes::{projection, session, slots};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - `projector` 为无状态纯计算，并发请求之间互不影响。
#[derive(Clone)]
pub struct AppState {
    /// 成交量推算服务端口
    pub projector: Arc<dyn VolumeProjector>,
    /// 交易所时钟 (请求未指定时刻时使用)
    pub clock: Arc<ExchangeClock>,
    /// 全局配置
    pub app_config: Arc<AppConfig>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Voltrack 日内成交量推算 API",
        version = "0.1.0",
        description = "基于 50 日均量与日内成交量分布曲线，推算当日全天累计成交量。",
        license(name = "MIT")
    ),
    tags(
        (name = "推算 (Projection)", description = "单值/分时模式推算与时段输入指引"),
        (name = "时段 (Session)", description = "交易时段判定与成交量节奏评估")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
pub fn build_router(state: AppState) -> Router {
    // 1. 注册路由并自动收集 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(projection::project_scalar))
        .routes(routes!(projection::project_granular))
        .routes(routes!(slots::list_slots))
        .routes(routes!(session::get_session))
        .routes(routes!(session::get_pace))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (图表前端可能与 API 不同源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 构建路由并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
///
/// # Returns
/// TCP 绑定或服务运行失败时返回错误。
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Voltrack API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
