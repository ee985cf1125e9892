// Postback 服务

use log::info;

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{Postback, PostbackRequest};
use crate::repositories::PostbackRepository;

use super::{fail, fail_not_found, fail_validation};

#[derive(Clone)]
pub struct PostbackService {
    repository: PostbackRepository,
}

impl PostbackService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: PostbackRepository::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Postback>, ServiceError> {
        self.repository.list().await.map_err(|err| {
            fail(err, "fetch postbacks", "Unable to load postbacks. Please try again later.")
        })
    }

    /// 在列表中按ID查找，不存在时返回 None
    pub async fn find(&self, id: &str) -> Result<Option<Postback>, ServiceError> {
        Ok(self.list().await?.into_iter().find(|postback| postback.id == id))
    }

    pub async fn create(&self, request: &PostbackRequest) -> Result<Postback, ServiceError> {
        let postback = self.repository.create(request).await.map_err(|err| {
            fail_validation(
                err,
                "create postback",
                "Validation failed",
                "Unable to create postback. Please try again later.",
            )
        })?;
        info!("Postback created: {}", postback.id);
        Ok(postback)
    }

    pub async fn update(&self, id: &str, request: &PostbackRequest) -> Result<Postback, ServiceError> {
        self.repository.update(id, request).await.map_err(|err| {
            if err.is_not_found() {
                return fail(err, "update postback", "Postback not found");
            }
            fail_validation(
                err,
                "update postback",
                "Validation failed",
                "Unable to update postback. Please try again later.",
            )
        })
    }

    pub async fn toggle(&self, id: &str) -> Result<Postback, ServiceError> {
        let postback = self.repository.toggle(id).await.map_err(|err| {
            fail_not_found(
                err,
                "toggle postback",
                "Postback not found",
                "Unable to toggle postback. Please try again later.",
            )
        })?;
        info!("Postback {} is now {}", postback.id, if postback.is_active { "active" } else { "inactive" });
        Ok(postback)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.repository.delete(id).await.map_err(|err| {
            fail_not_found(
                err,
                "delete postback",
                "Postback not found",
                "Unable to delete postback. Please try again later.",
            )
        })?;
        info!("Postback deleted: {}", id);
        Ok(())
    }
}
