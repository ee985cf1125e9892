// 收款方式设置页
// 列表、新增 (PayPal/Wise 邮箱或电汇信息)、设为默认、输入 DELETE 后删除

use log::error;

use crate::error::ServiceError;
use crate::models::{CreatePayoutRequest, EmailDetails, PaymentMethod, PayoutDetails, PayoutOption, WireTransferDetails};
use crate::services::PayoutService;
use crate::utils::InputValidator;

use super::confirm::ConfirmDialog;

/// 新增收款方式表单
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutOptionForm {
    pub method: PaymentMethod,
    pub email: String,
    pub wire: WireTransferDetails,
}

impl Default for PayoutOptionForm {
    fn default() -> Self {
        Self {
            method: PaymentMethod::Paypal,
            email: String::new(),
            wire: WireTransferDetails::default(),
        }
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl PayoutOptionForm {
    /// 必填项检查
    pub fn validate(&self) -> Result<(), String> {
        let mut validator = InputValidator::new();
        match self.method {
            PaymentMethod::Paypal | PaymentMethod::Wise => {
                validator.validate_email_field("email", self.email.trim());
            }
            PaymentMethod::Wire => {
                let wire = &self.wire;
                for (field, value) in [
                    ("address", &wire.address),
                    ("city", &wire.city),
                    ("first_name", &wire.first_name),
                    ("iban", &wire.iban),
                    ("last_name", &wire.last_name),
                    ("swift_code", &wire.swift_code),
                    ("zip_code", &wire.zip_code),
                ] {
                    validator.validate_required(field, value);
                }
            }
        }
        validator.into_result()
    }

    /// 组装请求，电汇的可选字段为空时不发送
    pub fn to_request(&self) -> CreatePayoutRequest {
        let details = match self.method {
            PaymentMethod::Paypal | PaymentMethod::Wise => PayoutDetails::Email(EmailDetails {
                email: self.email.trim().to_string(),
            }),
            PaymentMethod::Wire => PayoutDetails::Wire(WireTransferDetails {
                business_name: optional(&self.wire.business_name),
                state: optional(&self.wire.state),
                ..self.wire.clone()
            }),
        };
        CreatePayoutRequest {
            method: self.method,
            details,
        }
    }
}

/// 收款方式页
pub struct PayoutOptionsPage {
    service: PayoutService,
    options: Vec<PayoutOption>,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
    form: Option<PayoutOptionForm>,
    creating: bool,
    pub delete_dialog: ConfirmDialog<String>,
}

impl PayoutOptionsPage {
    pub fn new(service: PayoutService) -> Self {
        Self {
            service,
            options: Vec::new(),
            loading: true,
            error: None,
            success: None,
            form: None,
            creating: false,
            delete_dialog: ConfirmDialog::typed_delete(),
        }
    }

    pub fn options(&self) -> &[PayoutOption] {
        &self.options
    }

    pub fn default_option(&self) -> Option<&PayoutOption> {
        self.options.iter().find(|option| option.is_default)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    fn report(&mut self, err: ServiceError) {
        error!("Payout option action failed: {}", err);
        self.error = Some(err.message().to_string());
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.service.list().await {
            Ok(options) => self.options = options,
            Err(err) => self.report(err),
        }
        self.loading = false;
    }

    /// 打开或收起新增表单
    pub fn toggle_form(&mut self) {
        self.form = match self.form {
            Some(_) => None,
            None => Some(PayoutOptionForm::default()),
        };
    }

    pub fn form_mut(&mut self) -> Option<&mut PayoutOptionForm> {
        self.form.as_mut()
    }

    pub async fn create(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        self.error = None;
        self.success = None;
        if let Err(message) = form.validate() {
            self.error = Some(message);
            return;
        }

        let request = form.to_request();
        self.creating = true;
        let result = self.service.create(&request).await;
        self.creating = false;

        match result {
            Ok(_) => {
                self.success = Some("Payout option created successfully!".to_string());
                self.form = None;
                self.load().await;
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn set_default(&mut self, id: &str) {
        self.error = None;
        match self.service.set_default(id).await {
            Ok(_) => self.load().await,
            Err(err) => self.report(err),
        }
    }

    /// 确认删除，失败时也关闭弹窗并显示错误
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.delete_dialog.begin().cloned() else {
            return;
        };
        self.error = None;
        let result = self.service.delete(&id).await;
        self.delete_dialog.close();

        match result {
            Ok(()) => {
                self.success = Some("Payout option deleted successfully!".to_string());
                self.load().await;
            }
            Err(err) => self.report(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_methods_need_valid_email() {
        let mut form = PayoutOptionForm::default();
        assert_eq!(form.validate(), Err("Invalid email format".to_string()));

        form.email = " payouts@example.com ".into();
        assert!(form.validate().is_ok());
        assert_eq!(
            serde_json::to_value(form.to_request()).unwrap(),
            serde_json::json!({"method": "paypal", "details": {"email": "payouts@example.com"}})
        );
    }

    #[test]
    fn test_wire_form() {
        let mut form = PayoutOptionForm {
            method: PaymentMethod::Wire,
            ..Default::default()
        };
        assert_eq!(form.validate(), Err("This field is required".to_string()));

        form.wire = WireTransferDetails {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            business_name: Some("  ".into()),
            city: "Berlin".into(),
            state: None,
            address: "Main 1".into(),
            zip_code: "10115".into(),
            iban: "DE89370400440532013000".into(),
            swift_code: "COBADEFFXXX".into(),
        };
        assert!(form.validate().is_ok());

        let value = serde_json::to_value(form.to_request()).unwrap();
        assert_eq!(value["method"], "wire");
        assert!(value["details"].get("business_name").is_none());
        assert_eq!(value["details"]["iban"], "DE89370400440532013000");
    }
}
