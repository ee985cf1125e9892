// 佣金仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{Commission, CommissionFilters, ListQuery, Paginated};

#[derive(Clone)]
pub struct CommissionRepository {
    client: ApiClient,
}

impl CommissionRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 按筛选条件分页查询
    pub async fn list(
        &self,
        query: &ListQuery<CommissionFilters>,
    ) -> Result<Paginated<Commission>, ApiError> {
        self.client.get_with_query("/commissions", &query.query_pairs()).await
    }
}
