// 线索服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{Lead, LeadFilters, ListQuery, Paginated};
use crate::repositories::LeadRepository;

use super::{fail, ListSource};

#[derive(Clone)]
pub struct LeadService {
    repository: LeadRepository,
}

impl LeadService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: LeadRepository::new(client),
        }
    }

    /// 分页获取线索
    pub async fn list(&self, query: &ListQuery<LeadFilters>) -> Result<Paginated<Lead>, ServiceError> {
        self.repository.list(query).await.map_err(|err| {
            fail(err, "fetch leads", "Unable to load leads. Please try again later.")
        })
    }
}

impl ListSource for LeadService {
    type Item = Lead;
    type Filters = LeadFilters;

    async fn fetch(&self, query: &ListQuery<LeadFilters>) -> Result<Paginated<Lead>, ServiceError> {
        self.list(query).await
    }
}
