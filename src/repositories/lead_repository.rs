// 线索仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{Lead, LeadFilters, ListQuery, Paginated};

#[derive(Clone)]
pub struct LeadRepository {
    client: ApiClient,
}

impl LeadRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 按筛选条件分页查询
    pub async fn list(&self, query: &ListQuery<LeadFilters>) -> Result<Paginated<Lead>, ApiError> {
        self.client.get_with_query("/leads", &query.query_pairs()).await
    }
}
