// 收款方式服务

use log::{error, info};

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{CreatePayoutRequest, PayoutOption};
use crate::repositories::PayoutRepository;

use super::{fail, fail_not_found, fail_validation};

#[derive(Clone)]
pub struct PayoutService {
    repository: PayoutRepository,
}

impl PayoutService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: PayoutRepository::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<PayoutOption>, ServiceError> {
        self.repository.list().await.map_err(|err| {
            fail(err, "fetch payout options", "Unable to fetch payout options. Please try again later.")
        })
    }

    pub async fn create(&self, request: &CreatePayoutRequest) -> Result<PayoutOption, ServiceError> {
        let option = self.repository.create(request).await.map_err(|err| {
            fail_validation(
                err,
                "create payout option",
                "Invalid payout data",
                "Unable to create payout option. Please try again later.",
            )
        })?;
        info!("Payout option created: {} ({})", option.id, option.method.label());
        Ok(option)
    }

    /// 设为默认收款方式
    pub async fn set_default(&self, id: &str) -> Result<PayoutOption, ServiceError> {
        self.repository.set_default(id).await.map_err(|err| {
            fail_not_found(
                err,
                "set default payout option",
                "Payout option not found",
                "Unable to set default payout option. Please try again later.",
            )
        })
    }

    /// 删除收款方式，默认项不可删除 (400)
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.repository.delete(id).await.map_err(|err| {
            if err.status() == Some(400) && err.redirect().is_none() {
                error!("Failed to delete payout option: {}", err);
                return ServiceError::new("Cannot delete the default payout option");
            }
            fail_not_found(
                err,
                "delete payout option",
                "Payout option not found",
                "Unable to delete payout option. Please try again later.",
            )
        })?;
        info!("Payout option deleted: {}", id);
        Ok(())
    }
}
