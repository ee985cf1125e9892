// 国旗表情
// 两位 ISO 国家代码转为区域指示符号

const REGIONAL_INDICATOR_OFFSET: u32 = 127397;

/// 国家代码转国旗，代码无效时返回空字符串
pub fn country_flag(code: Option<&str>) -> String {
    let code = match code {
        Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => code,
        _ => return String::new(),
    };

    code.to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(REGIONAL_INDICATOR_OFFSET + c as u32))
        .collect()
}

/// 国旗加大写代码，如 "🇳🇱 NL"；无国家时返回 "—"
pub fn country_flag_with_code(code: Option<&str>) -> String {
    let Some(raw) = code.filter(|c| !c.is_empty()) else {
        return "—".to_string();
    };

    let flag = country_flag(Some(raw));
    if flag.is_empty() {
        raw.to_uppercase()
    } else {
        format!("{} {}", flag, raw.to_uppercase())
    }
}
