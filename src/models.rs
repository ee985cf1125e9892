// 联盟面板数据模型定义
// 后端拥有的记录在客户端的镜像：链接、流量、佣金、打款、Postback、账户

mod affiliate_payout;
mod auth;
mod click;
mod commission;
mod country;
mod customer;
mod dashboard;
mod lead;
mod link;
mod password;
mod payout;
mod postback;
mod profile;
mod two_factor;

// 重新导出核心类型
pub use affiliate_payout::*;
pub use auth::*;
pub use click::*;
pub use commission::*;
pub use country::*;
pub use customer::*;
pub use dashboard::*;
pub use lead::*;
pub use link::*;
pub use password::*;
pub use payout::*;
pub use postback::*;
pub use profile::*;
pub use two_factor::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 默认每页条数
pub const DEFAULT_PER_PAGE: u32 = 15;

/// 标准数据包裹 `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// 仅包含消息的响应 `{ "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// 当前页数据
    pub data: Vec<T>,
    /// 首/尾/上一页/下一页链接
    #[serde(default)]
    pub links: PaginationLinks,
    /// 分页元信息
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// 分页元信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// 当前页码 (从1开始)
    pub current_page: u32,
    /// 本页第一条记录的序号，空页时为 null
    pub from: Option<u64>,
    /// 最后一页页码
    pub last_page: u32,
    #[serde(default)]
    pub links: Vec<PageLink>,
    #[serde(default)]
    pub path: String,
    /// 每页条数
    pub per_page: u32,
    /// 本页最后一条记录的序号
    pub to: Option<u64>,
    /// 记录总数
    pub total: u64,
    /// 推广站点地址 (仅链接列表返回)
    #[serde(default)]
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    #[serde(default)]
    pub page: Option<u32>,
    pub active: bool,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// 分页请求参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page: page.max(1), per_page }
    }

    pub fn first() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// 列表筛选条件：转换为查询参数，空值不出现在查询串中
pub trait QueryFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// 列表请求：筛选条件 + 排序方向 + 分页
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery<F> {
    pub filters: F,
    pub order: SortOrder,
    pub page: PageRequest,
}

impl<F: QueryFilters> ListQuery<F> {
    pub fn new(filters: F, order: SortOrder, page: PageRequest) -> Self {
        Self { filters, order, page }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.filters.query_pairs();
        pairs.push(("sort_order", self.order.as_str().to_string()));
        pairs.extend(self.page.query_pairs());
        pairs
    }
}

/// 日期筛选统一使用 `YYYY-MM-DD`
pub(crate) fn push_date(pairs: &mut Vec<(&'static str, String)>, key: &'static str, date: Option<NaiveDate>) {
    if let Some(date) = date {
        pairs.push((key, date.format("%Y-%m-%d").to_string()));
    }
}
