//! # 成交量文本工具
//!
//! 负责自由文本 (如 `"2.1m"`, `"65k"`, `"1,000"`) 与成交量数值之间的互相转换。
//! 这些函数只做数值归一化，不参与任何推算逻辑。

/// # Summary
/// 将带后缀的成交量文本解析为纯数值。
///
/// # Logic
/// 1. 去除首尾空白并转为小写，剔除千分位分隔符 (`,` 与 `_`)。
/// 2. 读取开头的十进制数字部分，无法读取则视为无值。
/// 3. 紧随其后的首个非空白字符若为 `k`/`m`/`b`，分别乘以 1e3/1e6/1e9。
/// 4. 结果四舍五入为整数股数。
///
/// # Arguments
/// * `input`: 用户输入的原始文本。
///
/// # Returns
/// 可解析时返回 `Some(数值)`；空串或无法解析的文本返回 `None`（而不是 0）。
pub fn parse_volume(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    let numeric_len = leading_decimal_len(&cleaned);
    if numeric_len == 0 {
        return None;
    }

    let magnitude: f64 = cleaned[..numeric_len].parse().ok()?;
    let multiplier = match cleaned[numeric_len..].trim_start().chars().next() {
        Some('k') => 1e3,
        Some('m') => 1e6,
        Some('b') => 1e9,
        _ => 1.0,
    };

    Some((magnitude * multiplier).round())
}

// 开头连续的数字与至多一个小数点所占的字节长度
fn leading_decimal_len(text: &str) -> usize {
    let mut seen_dot = false;
    let mut len = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        len = idx + c.len_utf8();
    }
    len
}

/// # Summary
/// 将成交量数值格式化为便于阅读的短文本。
///
/// # Logic
/// - `>= 1e9` 输出 `X.XXB`
/// - `>= 1e6` 输出 `X.XM`
/// - `>= 1e3` 输出 `X.XK`
/// - 其余输出整数
/// - 无值输出 `N/A`
pub fn format_volume(volume: Option<f64>) -> String {
    match volume {
        None => "N/A".to_string(),
        Some(v) if v >= 1e9 => format!("{:.2}B", v / 1e9),
        Some(v) if v >= 1e6 => format!("{:.1}M", v / 1e6),
        Some(v) if v >= 1e3 => format!("{:.1}K", v / 1e3),
        Some(v) => format!("{:.0}", v),
    }
}
