// 打款记录仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AffiliatePayout, AffiliatePayoutDetail, AffiliatePayoutFilters, DataEnvelope, ListQuery,
    Paginated,
};

#[derive(Clone)]
pub struct AffiliatePayoutRepository {
    client: ApiClient,
}

impl AffiliatePayoutRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 按筛选条件分页查询
    pub async fn list(
        &self,
        query: &ListQuery<AffiliatePayoutFilters>,
    ) -> Result<Paginated<AffiliatePayout>, ApiError> {
        self.client
            .get_with_query("/affiliate-payouts", &query.query_pairs())
            .await
    }

    /// 打款详情，包含佣金明细
    pub async fn find(&self, id: u64) -> Result<AffiliatePayoutDetail, ApiError> {
        let response: DataEnvelope<AffiliatePayoutDetail> =
            self.client.get(&format!("/affiliate-payouts/{}", id)).await?;
        Ok(response.data)
    }
}
