// 账户资料服务

use log::error;

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{AffiliateProfile, UpdateProfileRequest};
use crate::repositories::ProfileRepository;

use super::fail;

#[derive(Clone)]
pub struct ProfileService {
    repository: ProfileRepository,
}

impl ProfileService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: ProfileRepository::new(client),
        }
    }

    pub async fn get(&self) -> Result<AffiliateProfile, ServiceError> {
        self.repository.get().await.map_err(|err| {
            fail(err, "fetch profile", "Unable to load profile. Please try again later.")
        })
    }

    /// 更新资料，422 时依次取 email、website 字段的首条错误
    pub async fn update(&self, request: &UpdateProfileRequest) -> Result<AffiliateProfile, ServiceError> {
        match self.repository.update(request).await {
            Ok(response) => Ok(response.data),
            Err(err) if err.is_validation() => {
                error!("Profile update rejected: {}", err);
                let message = err
                    .first_field_error("email")
                    .or_else(|| err.first_field_error("website"))
                    .or_else(|| err.backend_message())
                    .unwrap_or("Validation failed.")
                    .to_string();
                Err(ServiceError::from_api(&err, message))
            }
            Err(err) => Err(fail(err, "update profile", "Unable to update profile. Please try again later.")),
        }
    }
}
