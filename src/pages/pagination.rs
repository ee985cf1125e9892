// 分页窗口
// 最多显示5个页码，当前页尽量居中

use crate::models::PaginationMeta;

/// 窗口内最多显示的页码数
pub const WINDOW: u32 = 5;

/// 计算要显示的页码
///
/// # Arguments
/// * `current` - 当前页 (从1开始)
/// * `total` - 总页数
///
/// # Returns
/// * 连续页码列表
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total <= WINDOW {
        return (1..=total).collect();
    }
    let current = current.clamp(1, total);
    let start = if current <= 3 {
        1
    } else if current >= total - 2 {
        total - 4
    } else {
        current - 2
    };
    (start..start + WINDOW).collect()
}

/// "Showing X to Y of Z results"
pub fn showing_summary(meta: &PaginationMeta) -> String {
    format!(
        "Showing {} to {} of {} results",
        meta.from.unwrap_or(0),
        meta.to.unwrap_or(0),
        meta.total
    )
}
