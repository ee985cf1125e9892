// 点击记录仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{Click, ClickFilters, ListQuery, Paginated};

#[derive(Clone)]
pub struct ClickRepository {
    client: ApiClient,
}

impl ClickRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 按筛选条件分页查询
    pub async fn list(
        &self,
        query: &ListQuery<ClickFilters>,
    ) -> Result<Paginated<Click>, ApiError> {
        self.client.get_with_query("/clicks", &query.query_pairs()).await
    }
}
