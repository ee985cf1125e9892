// 客户仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{Customer, CustomerFilters, ListQuery, Paginated};

#[derive(Clone)]
pub struct CustomerRepository {
    client: ApiClient,
}

impl CustomerRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 按筛选条件分页查询
    pub async fn list(
        &self,
        query: &ListQuery<CustomerFilters>,
    ) -> Result<Paginated<Customer>, ApiError> {
        self.client.get_with_query("/customers", &query.query_pairs()).await
    }
}
