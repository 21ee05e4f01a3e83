use chrono::NaiveTime;

use crate::volume::entity::{
    MarketSession, PaceReport, Projection, ProjectionRequest, SlotGuide, TimeSlot,
};

/// # Summary
/// 成交量推算服务契约 (Port)。
///
/// # Invariants
/// - 所有方法均为同步纯计算，不做 I/O、不读取时钟、不缓存上一次结果。
/// - 相同输入必然得到相同输出，可在定时器、事件或请求处理器等任意上下文中调用。
pub trait VolumeProjector: Send + Sync {
    /// # Summary
    /// 获取交易日的 5 分钟时间网格 (08:00 - 16:55)。
    ///
    /// # Returns
    /// 按时间升序排列的时段切片。
    fn time_grid(&self) -> &[TimeSlot];

    /// # Summary
    /// 判定某一时刻所处的交易时段。
    ///
    /// # Arguments
    /// * `now`: 交易所本地时刻。
    fn classify(&self, now: NaiveTime) -> MarketSession;

    /// # Summary
    /// 根据均量与观测数据推算全天累计成交量曲线。
    ///
    /// # Logic
    /// 1. 单值模式：按当前累计量与期望占比的比例整体缩放期望曲线。
    /// 2. 分时模式：重建累计量，计算节奏比例，并在最后一次观测后的一小时内平滑过渡到推算曲线。
    ///
    /// # Arguments
    /// * `request`: 推算输入。
    ///
    /// # Returns
    /// 完整的图表点序列与推算摘要；无法推算时实际值为 None。
    fn project(&self, request: &ProjectionRequest) -> Projection;

    /// # Summary
    /// 计算截至 `now` 的期望累计成交量。
    fn expected_volume_now(&self, average_daily_volume: f64, now: NaiveTime) -> f64;

    /// # Summary
    /// 评估当前成交量相对期望值的节奏。
    ///
    /// # Returns
    /// 期望值不可用 (<= 0) 时返回 None。
    fn pace(
        &self,
        average_daily_volume: f64,
        current_volume: f64,
        now: NaiveTime,
    ) -> Option<PaceReport>;

    /// # Summary
    /// 生成每个时段的期望单段/累计成交量，供分时输入作为占位提示。
    fn slot_guide(&self, average_daily_volume: f64) -> Vec<SlotGuide>;
}
