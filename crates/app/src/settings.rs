//! # 配置加载
//!
//! 按优先级由低到高叠加配置源：内置默认值、`config/default.toml`、
//! `VOLTRACK_CONFIG` 指定的文件、`VOLTRACK__` 前缀的环境变量。

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use voltrack_core::config::AppConfig;

/// 默认配置文件路径 (相对工作目录，可缺省)
const DEFAULT_CONFIG_FILE: &str = "config/default.toml";
/// 指定额外配置文件的环境变量
const CONFIG_PATH_ENV: &str = "VOLTRACK_CONFIG";
const ENV_PREFIX: &str = "VOLTRACK";

/// # Summary
/// 从进程环境加载全局配置。
pub fn load() -> Result<AppConfig, ConfigError> {
    let mut files = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        files.push(PathBuf::from(path));
    }
    load_from(&files, Environment::with_prefix(ENV_PREFIX))
}

/// # Summary
/// 按给定顺序叠加配置文件与环境变量源，后者覆盖前者。
///
/// # Arguments
/// * `files`: 依次加载的配置文件，不存在的文件直接跳过。
/// * `env`: 环境变量源，键以 `__` 分隔层级 (例如 `VOLTRACK__SERVER__PORT`)。
pub fn load_from(files: &[PathBuf], env: Environment) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    for path in files {
        builder = builder.add_source(File::from(path.as_path()).required(false));
    }
    builder
        .add_source(env.separator("__").try_parsing(true))
        .build()?
        .try_deserialize()
}
