//! # `voltrack-core` - 领域内核
//!
//! 定义日内成交量推算系统的领域实体、端口 (Port) 契约与通用工具。
//! 本 crate 不包含任何推算算法实现，具体实现位于 `voltrack-projection`，
//! 由 `crates/app` 的 DI 容器通过 `Arc<dyn VolumeProjector>` 注入到适配层。

pub mod common;
pub mod config;
pub mod volume;
