// 国家服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::Country;
use crate::repositories::CountryRepository;

use super::fail;

#[derive(Clone)]
pub struct CountryService {
    repository: CountryRepository,
}

impl CountryService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: CountryRepository::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Country>, ServiceError> {
        self.repository.list().await.map_err(|err| {
            fail(err, "fetch countries", "Unable to load countries. Please try again later.")
        })
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Country, ServiceError> {
        self.repository.find(&id.to_string()).await.map_err(|err| {
            fail(err, &format!("fetch country {}", id), "Unable to load country. Please try again later.")
        })
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Country, ServiceError> {
        self.repository.find(slug).await.map_err(|err| {
            fail(err, &format!("fetch country {}", slug), "Unable to load country. Please try again later.")
        })
    }

    /// 按名称或正式名称搜索 (忽略大小写)
    pub async fn search(&self, query: &str) -> Result<Vec<Country>, ServiceError> {
        let countries = self.repository.list().await.map_err(|err| {
            fail(err, "search countries", "Unable to search countries. Please try again later.")
        })?;
        Ok(countries.into_iter().filter(|country| country.matches(query)).collect())
    }
}
