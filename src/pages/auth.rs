// 登录、注册与登录2FA验证页

use log::{error, info};

use crate::models::RegisterRequest;
use crate::services::{AuthService, CountryService};
use crate::utils::{validate_two_factor_code, InputValidator};

use super::navigation::Route;
use super::profile::country_options;
use super::security::INVALID_CODE_FORMAT;
use super::select::SearchableSelect;

/// 登录页
pub struct LoginPage {
    service: AuthService,
    pub username: String,
    pub password: String,
    /// 由 `/login?require2fa=true` 进入
    require_two_factor: bool,
    loading: bool,
    error: Option<String>,
}

impl LoginPage {
    pub fn new(service: AuthService, require_two_factor: bool) -> Self {
        Self {
            service,
            username: String::new(),
            password: String::new(),
            require_two_factor,
            loading: false,
            error: None,
        }
    }

    pub fn requires_two_factor(&self) -> bool {
        self.require_two_factor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 登录成功后跳转仪表盘
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;
        self.loading = true;
        let result = self.service.login(self.username.trim(), &self.password).await;
        self.loading = false;

        match result {
            Ok(_) => {
                self.password.clear();
                Some(Route::Dashboard)
            }
            Err(err) => {
                self.error = Some(err.message().to_string());
                None
            }
        }
    }
}

/// 登录后的2FA验证
pub struct TwoFactorChallengePage {
    service: AuthService,
    pub code: String,
    error: Option<String>,
}

impl TwoFactorChallengePage {
    pub fn new(service: AuthService) -> Self {
        Self {
            service,
            code: String::new(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 后端是否仍在等待验证码
    pub async fn is_pending(&self) -> bool {
        match self.service.two_factor_pending().await {
            Ok(pending) => pending,
            Err(err) => {
                error!("Two-factor status unknown: {}", err);
                self.service.current_session().require_two_factor
            }
        }
    }

    pub async fn submit(&mut self) -> Option<Route> {
        if !validate_two_factor_code(&self.code) {
            self.error = Some(INVALID_CODE_FORMAT.to_string());
            return None;
        }
        self.error = None;

        match self.service.verify_two_factor(&self.code).await {
            Ok(()) => Some(Route::Dashboard),
            Err(err) => {
                self.error = Some(err.message().to_string());
                None
            }
        }
    }
}

/// 注册页
pub struct RegisterPage {
    auth: AuthService,
    countries: CountryService,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: SearchableSelect<u64>,
    loading: bool,
    error: Option<String>,
}

impl RegisterPage {
    pub fn new(auth: AuthService, countries: CountryService) -> Self {
        Self {
            auth,
            countries,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            country: SearchableSelect::new(Vec::new()),
            loading: false,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load_countries(&mut self) {
        match self.countries.list().await {
            Ok(countries) => self.country.set_options(country_options(&countries)),
            Err(err) => {
                error!("Country list unavailable: {}", err);
                self.error = Some("Failed to load countries. Please refresh the page.".to_string());
            }
        }
    }

    pub fn validate(&self) -> Result<RegisterRequest, String> {
        let mut validator = InputValidator::new();
        validator.validate_email_field("email", self.email.trim());
        validator.validate_required("first_name", &self.first_name);
        validator.validate_required("last_name", &self.last_name);
        let country_id = self.country.selected().copied();
        if country_id.is_none() {
            validator.add_error("country_id", "Please select a country");
        }
        validator.into_result()?;

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            country_id: country_id.unwrap_or_default(),
        })
    }

    /// 注册成功后直接进入仪表盘
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;
        let request = match self.validate() {
            Ok(request) => request,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };

        self.loading = true;
        let result = self.auth.register(&request).await;
        self.loading = false;

        match result {
            Ok(user) => {
                info!("Registered affiliate {}", user.username);
                Some(Route::Dashboard)
            }
            Err(err) => {
                self.error = Some(err.message().to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::ApiClient;
    use crate::pages::select::SelectOption;
    use crate::session::MemorySessionStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn register_page() -> RegisterPage {
        let client = ApiClient::new(
            "http://127.0.0.1:9",
            Duration::from_millis(200),
            Arc::new(MemorySessionStore::default()),
        )
        .unwrap();
        RegisterPage::new(AuthService::new(client.clone()), CountryService::new(client))
    }

    #[test]
    fn test_register_requires_country() {
        let mut page = register_page();
        page.first_name = " Jane ".into();
        page.last_name = "Doe".into();
        page.email = "jane@example.com".into();
        assert_eq!(page.validate(), Err("Please select a country".to_string()));

        page.country.set_options(vec![SelectOption { value: 31, label: "Netherlands".into(), icon: None }]);
        page.country.select(31);
        let request = page.validate().unwrap();
        assert_eq!(request.country_id, 31);
        assert_eq!(request.first_name, "Jane");
    }

    #[tokio::test]
    async fn test_challenge_rejects_malformed_code() {
        let client = ApiClient::new(
            "http://127.0.0.1:9",
            Duration::from_millis(200),
            Arc::new(MemorySessionStore::default()),
        )
        .unwrap();
        let mut page = TwoFactorChallengePage::new(AuthService::new(client));
        for code in ["12 34", " 123456 ", "123456 "] {
            page.code = code.into();
            assert_eq!(page.submit().await, None);
            assert_eq!(page.error(), Some(INVALID_CODE_FORMAT), "code {:?}", code);
        }
    }
}
