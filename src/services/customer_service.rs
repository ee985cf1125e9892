// 客户服务

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::{Customer, CustomerFilters, ListQuery, Paginated};
use crate::repositories::CustomerRepository;

use super::{fail, ListSource};

#[derive(Clone)]
pub struct CustomerService {
    repository: CustomerRepository,
}

impl CustomerService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: CustomerRepository::new(client),
        }
    }

    /// 分页获取客户
    pub async fn list(&self, query: &ListQuery<CustomerFilters>) -> Result<Paginated<Customer>, ServiceError> {
        self.repository.list(query).await.map_err(|err| {
            fail(err, "fetch customers", "Unable to load customers. Please try again later.")
        })
    }
}

impl ListSource for CustomerService {
    type Item = Customer;
    type Filters = CustomerFilters;

    async fn fetch(&self, query: &ListQuery<CustomerFilters>) -> Result<Paginated<Customer>, ServiceError> {
        self.list(query).await
    }
}
