// 点击记录服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{Click, ClickFilters, ListQuery, Paginated};
use crate::repositories::ClickRepository;

use super::{fail, ListSource};

#[derive(Clone)]
pub struct ClickService {
    repository: ClickRepository,
}

impl ClickService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: ClickRepository::new(client),
        }
    }

    /// 分页获取点击记录
    pub async fn list(&self, query: &ListQuery<ClickFilters>) -> Result<Paginated<Click>, ServiceError> {
        self.repository.list(query).await.map_err(|err| {
            fail(err, "fetch clicks", "Unable to load clicks. Please try again later.")
        })
    }
}

impl ListSource for ClickService {
    type Item = Click;
    type Filters = ClickFilters;

    async fn fetch(&self, query: &ListQuery<ClickFilters>) -> Result<Paginated<Click>, ServiceError> {
        self.list(query).await
    }
}
