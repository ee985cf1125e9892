// 账户资料页
// 加载资料与国家列表，国家用可搜索下拉框选择

use log::{error, info};

use crate::error::ServiceError;
use crate::models::{AffiliateProfile, Country, UpdateProfileRequest};
use crate::services::{CountryService, ProfileService};
use crate::utils::{country_flag, InputValidator};

use super::select::{SearchableSelect, SelectOption};

/// 国家下拉选项，图标优先使用后端给出的表情
pub fn country_options(countries: &[Country]) -> Vec<SelectOption<u64>> {
    countries
        .iter()
        .map(|country| {
            let icon = Some(country.flag_emoji.utf8.clone())
                .filter(|emoji| !emoji.is_empty())
                .unwrap_or_else(|| country_flag(Some(&country.iso_alpha_2)));
            SelectOption {
                value: country.id,
                label: country.name.clone(),
                icon: Some(icon).filter(|icon| !icon.is_empty()),
            }
        })
        .collect()
}

/// 资料页状态
pub struct ProfilePage {
    profiles: ProfileService,
    countries: CountryService,
    profile: Option<AffiliateProfile>,
    pub form: UpdateProfileRequest,
    pub country: SearchableSelect<u64>,
    loading: bool,
    saving: bool,
    error: Option<ServiceError>,
    success: Option<String>,
}

impl ProfilePage {
    pub fn new(profiles: ProfileService, countries: CountryService) -> Self {
        Self {
            profiles,
            countries,
            profile: None,
            form: UpdateProfileRequest::default(),
            country: SearchableSelect::new(Vec::new()),
            loading: true,
            saving: false,
            error: None,
            success: None,
        }
    }

    pub fn profile(&self) -> Option<&AffiliateProfile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// 同时加载资料和国家列表
    pub async fn load(&mut self) {
        self.loading = true;
        let (profile, countries) = tokio::join!(self.profiles.get(), self.countries.list());

        match countries {
            Ok(countries) => self.country.set_options(country_options(&countries)),
            Err(err) => error!("Country list unavailable: {}", err),
        }

        match profile {
            Ok(profile) => {
                self.apply(profile);
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
        self.loading = false;
    }

    fn apply(&mut self, profile: AffiliateProfile) {
        self.form = UpdateProfileRequest::from(&profile);
        self.country.select(profile.lc_country_id);
        self.profile = Some(profile);
    }

    /// 本地必填项检查
    pub fn validate(&self) -> Result<(), String> {
        let mut validator = InputValidator::new();
        validator.validate_required("company_name", &self.form.company_name);
        validator.validate_email_field("email", self.form.email.trim());
        if self.country.selected().is_none() {
            validator.add_error("lc_country_id", "Please select a country");
        }
        validator.into_result()
    }

    pub async fn save(&mut self) {
        self.success = None;
        if let Err(message) = self.validate() {
            self.error = Some(ServiceError::new(message));
            return;
        }

        let mut request = self.form.clone();
        if let Some(country_id) = self.country.selected() {
            request.lc_country_id = *country_id;
        }

        self.saving = true;
        let result = self.profiles.update(&request).await;
        self.saving = false;

        match result {
            Ok(profile) => {
                info!("Profile {} updated", profile.id);
                self.apply(profile);
                self.error = None;
                self.success = Some("Profile updated successfully!".to_string());
            }
            Err(err) => self.error = Some(err),
        }
    }
}
