// 佣金服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{Commission, CommissionFilters, ListQuery, Paginated};
use crate::repositories::CommissionRepository;

use super::{fail, ListSource};

#[derive(Clone)]
pub struct CommissionService {
    repository: CommissionRepository,
}

impl CommissionService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: CommissionRepository::new(client),
        }
    }

    /// 分页获取佣金，后端消息优先
    pub async fn list(
        &self,
        query: &ListQuery<CommissionFilters>,
    ) -> Result<Paginated<Commission>, ServiceError> {
        self.repository.list(query).await.map_err(|err| {
            let message = err
                .backend_message()
                .unwrap_or("Unable to load commissions. Please try again later.")
                .to_string();
            fail(err, "fetch commissions", &message)
        })
    }
}

impl ListSource for CommissionService {
    type Item = Commission;
    type Filters = CommissionFilters;

    async fn fetch(
        &self,
        query: &ListQuery<CommissionFilters>,
    ) -> Result<Paginated<Commission>, ServiceError> {
        self.list(query).await
    }
}
