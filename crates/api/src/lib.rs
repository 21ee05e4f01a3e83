//! # `voltrack-api` - HTTP API 网关
//!
//! 本 crate 是日内成交量推算引擎的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自图表前端的 HTTP 请求，把自由文本成交量 (如 `"2.1m"`) 归一化为数值
//! - 调用下层 `VolumeProjector` 完成推算，每个请求都是一次完整的重新计算
//! - 将领域模型转换为 DTO 返回给前端，`null` 表示无数据而非 0

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
