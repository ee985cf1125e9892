// 二维码生成工具
// 在终端渲染2FA配置二维码

use anyhow::{Context, Result};
use qrcode::render::unicode;
use qrcode::QrCode;

/// 渲染终端二维码
///
/// # Arguments
/// * `uri` - otpauth:// 配置地址
///
/// # Returns
/// * 由半块字符组成的多行字符串
pub fn render_terminal_qr(uri: &str) -> Result<String> {
    // 创建二维码
    let code = QrCode::new(uri.as_bytes()).context("Failed to create QR code")?;

    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// 从 otpauth 地址中取出密钥，便于手动输入
pub fn otpauth_secret(uri: &str) -> Option<String> {
    let parsed = url::Url::parse(uri).ok()?;
    if parsed.scheme() != "otpauth" {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(key, _)| key == "secret")
        .map(|(_, value)| value.into_owned())
}
