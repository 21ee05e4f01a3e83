use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use std::sync::{Arc, PoisonError, RwLock};

use crate::volume::error::VolumeError;

/// # Summary
/// 时间供给器接口，用于隔离物理系统时钟。
/// 推算引擎本身不读取时钟，"当前时间" 一律由调用方通过此接口获取后显式传入。
pub trait TimeProvider: Send + Sync {
    /// 获取当前时间 (UTC)
    fn now(&self) -> DateTime<Utc>;
}

/// # Summary
/// 实盘使用的真实时钟，直接返回操作系统当前时间。
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// 可拨动的虚拟时钟，用于测试与历史场景回放。
///
/// # Invariants
/// - 并发安全：内部利用 `RwLock` 提供多线程安全的读写。
pub struct FakeClockProvider {
    current_time: RwLock<DateTime<Utc>>,
}

impl FakeClockProvider {
    /// 使用指定的初始时间创建虚拟时钟
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// 强制修改时钟的当前时间
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *time = new_time;
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current_time
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// # Summary
/// 交易所本地时钟，将 UTC 时间换算为交易所所在时区的当日时刻。
///
/// # Invariants
/// - 时区在构造后不可变。
/// - 仅负责换算，不做任何交易时段判断。
#[derive(Clone)]
pub struct ExchangeClock {
    // 底层时间源
    provider: Arc<dyn TimeProvider>,
    // 交易所时区 (例如: America/New_York)
    timezone: Tz,
}

impl ExchangeClock {
    pub fn new(provider: Arc<dyn TimeProvider>, timezone: Tz) -> Self {
        Self { provider, timezone }
    }

    /// # Summary
    /// 根据 IANA 时区名称构造交易所时钟。
    ///
    /// # Arguments
    /// * `provider`: 底层时间源。
    /// * `timezone`: IANA 时区名，如 `"America/New_York"`。
    ///
    /// # Returns
    /// 时区名非法时返回 `VolumeError::InvalidTimezone`。
    pub fn from_timezone_name(
        provider: Arc<dyn TimeProvider>,
        timezone: &str,
    ) -> Result<Self, VolumeError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| VolumeError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self::new(provider, timezone))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// 交易所本地的当前时间
    pub fn now(&self) -> DateTime<Tz> {
        self.provider.now().with_timezone(&self.timezone)
    }

    /// 交易所本地的当日时刻，作为推算引擎的 `now` 输入
    pub fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}
