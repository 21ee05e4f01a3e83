//! # `voltrack-projection` - 成交量推算引擎
//!
//! 根据 50 日均量、盘中稀疏观测 (单个累计值或分时单段值) 与固定的成交量分布曲线，
//! 推算全天累计成交量曲线，并在观测段与推算段之间做平滑过渡。
//!
//! ## 模块划分
//! - `grid`: 交易日 5 分钟时间网格
//! - `session`: 交易时段判定
//! - `distribution`: 常规时段与盘前的累计占比表、插值与差分
//! - `scalar` / `granular`: 两种推算模式
//! - `pace` / `guide`: 节奏状态与分时输入指引
//! - `service`: `VolumeProjector` 端口的实现

pub mod distribution;
pub mod granular;
pub mod grid;
pub mod guide;
pub mod pace;
pub mod scalar;
pub mod service;
pub mod session;
