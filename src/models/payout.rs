// 收款方式数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 收款渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Paypal,
    Wise,
    /// 银行电汇
    Wire,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Wise => "Wise",
            PaymentMethod::Wire => "Wire Transfer",
        }
    }
}

/// 电汇收款信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireTransferDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub address: String,
    pub zip_code: String,
    pub iban: String,
    pub swift_code: String,
}

/// PayPal / Wise 收款信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailDetails {
    pub email: String,
}

/// 各渠道的收款信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayoutDetails {
    Wire(WireTransferDetails),
    Email(EmailDetails),
}

impl PayoutDetails {
    /// 列表中展示的简要信息
    pub fn summary(&self) -> String {
        match self {
            PayoutDetails::Email(details) => details.email.clone(),
            PayoutDetails::Wire(details) => {
                let holder = match details.business_name.as_deref().filter(|b| !b.is_empty()) {
                    Some(business) => business.to_string(),
                    None => format!("{} {}", details.first_name, details.last_name),
                };
                format!("{} ({})", holder, mask_iban(&details.iban))
            }
        }
    }
}

/// 仅保留 IBAN 后四位
fn mask_iban(iban: &str) -> String {
    let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();
    let count = compact.chars().count();
    if count <= 4 {
        return compact;
    }
    let tail: String = compact.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

/// 收款方式，同一时间最多一个默认项，由服务端保证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutOption {
    pub id: String,
    pub method: PaymentMethod,
    /// 是否为默认收款方式
    pub is_default: bool,
    pub details: PayoutDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新增收款方式请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayoutRequest {
    pub method: PaymentMethod,
    pub details: PayoutDetails,
}
