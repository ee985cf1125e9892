// 密码服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::UpdatePasswordRequest;
use crate::repositories::PasswordRepository;

use super::fail_validation;

#[derive(Clone)]
pub struct PasswordService {
    repository: PasswordRepository,
}

impl PasswordService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: PasswordRepository::new(client),
        }
    }

    /// 修改密码，成功时返回后端消息
    pub async fn update(&self, request: &UpdatePasswordRequest) -> Result<String, ServiceError> {
        self.repository
            .update(request)
            .await
            .map(|response| response.message)
            .map_err(|err| {
                fail_validation(
                    err,
                    "update password",
                    "Validation failed.",
                    "Unable to update password. Please try again later.",
                )
            })
    }
}
