// 仪表盘统计服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::DashboardStats;
use crate::repositories::DashboardRepository;

use super::fail;

#[derive(Clone)]
pub struct DashboardService {
    repository: DashboardRepository,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: DashboardRepository::new(client),
        }
    }

    /// 获取权威汇总数据
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        self.repository.stats().await.map_err(|err| {
            fail(err, "fetch dashboard stats", "Unable to load dashboard statistics. Please try again later.")
        })
    }
}
