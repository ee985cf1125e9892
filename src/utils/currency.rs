// 金额格式化
// 后端金额统一为整数分

use rust_decimal::Decimal;

/// 分转美元，始终保留两位小数
///
/// # Arguments
/// * `cents` - 金额 (分)，如 3999
///
/// # Returns
/// * 如 "$39.99"
pub fn format_currency(cents: i64) -> String {
    format!("${:.2}", Decimal::new(cents, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(3999), "$39.99");
        assert_eq!(format_currency(4000), "$40.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(0), "$0.00");
    }

    #[test]
    fn test_large_amounts_have_no_grouping() {
        assert_eq!(format_currency(123456), "$1234.56");
    }
}
