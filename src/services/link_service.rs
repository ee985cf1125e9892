// 推广链接服务

use log::{error, info};

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{AffiliateLink, CreateLinkRequest, LinkValidation, ListQuery, Paginated, QueryFilters};
use crate::repositories::LinkRepository;

use super::{fail, fail_validation, ListSource};

/// 链接列表没有筛选条件，只按页码分页
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkFilters;

impl QueryFilters for LinkFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[derive(Clone)]
pub struct LinkService {
    repository: LinkRepository,
}

impl LinkService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: LinkRepository::new(client),
        }
    }

    /// 创建推广链接
    ///
    /// # Arguments
    /// * `reference_id` - 自定义引用ID，为空时由后端生成
    ///
    /// # Returns
    /// * 新建的推广链接
    pub async fn create(&self, reference_id: Option<&str>) -> Result<AffiliateLink, ServiceError> {
        let link = self
            .repository
            .create(&CreateLinkRequest::new(reference_id))
            .await
            .map_err(|err| {
                fail_validation(
                    err,
                    "create affiliate link",
                    "Validation failed",
                    "Unable to create affiliate link. Please try again later.",
                )
            })?;

        info!("Affiliate link created: {}", link.reference_id);
        Ok(link)
    }

    /// 分页获取推广链接
    pub async fn list(&self, page: u32) -> Result<Paginated<AffiliateLink>, ServiceError> {
        self.repository.list(page).await.map_err(|err| {
            fail(err, "fetch affiliate links", "Unable to load affiliate links. Please try again later.")
        })
    }

    /// 校验推广链接
    pub async fn validate(&self, url: &str) -> Result<LinkValidation, ServiceError> {
        self.repository.validate(url).await.map_err(|err| {
            error!("Failed to validate link: {}", err);
            let message = if err.is_not_found() {
                "Link not found or invalid".to_string()
            } else {
                err.backend_message()
                    .unwrap_or("Unable to validate link. Please try again later.")
                    .to_string()
            };
            ServiceError::from_api(&err, message)
        })
    }
}

impl ListSource for LinkService {
    type Item = AffiliateLink;
    type Filters = LinkFilters;

    async fn fetch(
        &self,
        query: &ListQuery<LinkFilters>,
    ) -> Result<Paginated<AffiliateLink>, ServiceError> {
        self.list(query.page.page).await
    }
}
