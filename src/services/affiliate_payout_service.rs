// 打款记录服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{AffiliatePayout, AffiliatePayoutDetail, AffiliatePayoutFilters, ListQuery, Paginated};
use crate::repositories::AffiliatePayoutRepository;

use super::{fail, fail_not_found, ListSource};

#[derive(Clone)]
pub struct AffiliatePayoutService {
    repository: AffiliatePayoutRepository,
}

impl AffiliatePayoutService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: AffiliatePayoutRepository::new(client),
        }
    }

    /// 分页获取打款记录，后端消息优先
    pub async fn list(
        &self,
        query: &ListQuery<AffiliatePayoutFilters>,
    ) -> Result<Paginated<AffiliatePayout>, ServiceError> {
        self.repository.list(query).await.map_err(|err| {
            let message = err
                .backend_message()
                .unwrap_or("Unable to load payouts. Please try again later.")
                .to_string();
            fail(err, "fetch affiliate payouts", &message)
        })
    }

    /// 打款详情
    ///
    /// # Arguments
    /// * `id` - 打款记录ID
    ///
    /// # Returns
    /// * 打款记录及其佣金明细
    pub async fn find(&self, id: u64) -> Result<AffiliatePayoutDetail, ServiceError> {
        self.repository.find(id).await.map_err(|err| {
            fail_not_found(
                err,
                &format!("fetch payout {}", id),
                "Payout not found",
                "Unable to load payout. Please try again later.",
            )
        })
    }
}

impl ListSource for AffiliatePayoutService {
    type Item = AffiliatePayout;
    type Filters = AffiliatePayoutFilters;

    async fn fetch(
        &self,
        query: &ListQuery<AffiliatePayoutFilters>,
    ) -> Result<Paginated<AffiliatePayout>, ServiceError> {
        self.list(query).await
    }
}
