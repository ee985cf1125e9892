// 列表页通用状态
// 筛选、排序、分页与加载状态；任何筛选变化都回到第1页并重新拉取

use log::error;

use crate::error::ServiceError;
use crate::models::{ListQuery, PageRequest, Paginated, PaginationMeta, SortOrder, DEFAULT_PER_PAGE};
use crate::services::ListSource;

use super::pagination::{page_window, showing_summary};

/// 每页条数可选项
pub const PER_PAGE_OPTIONS: [u32; 4] = [15, 25, 50, 100];

/// 列表查询状态
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<F> {
    filters: F,
    order: SortOrder,
    per_page: u32,
    page: u32,
    /// 最近一次响应的总页数
    last_page: u32,
}

impl<F: Default> Default for ListState<F> {
    fn default() -> Self {
        Self {
            filters: F::default(),
            order: SortOrder::default(),
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            last_page: 1,
        }
    }
}

impl<F: Clone + Default> ListState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    /// 修改筛选条件，回到第1页
    pub fn update_filters(&mut self, update: impl FnOnce(&mut F)) {
        update(&mut self.filters);
        self.page = 1;
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
        self.page = 1;
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// 跳转到指定页，限制在 [1, last_page]
    pub fn go_to(&mut self, page: u32) {
        self.page = page.clamp(1, self.last_page.max(1));
    }

    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// 恢复默认：清空筛选、每页15条、倒序、第1页
    pub fn reset(&mut self) {
        let last_page = self.last_page;
        *self = Self::default();
        self.last_page = last_page;
    }

    /// 根据响应同步页码信息
    pub fn sync(&mut self, meta: &PaginationMeta) {
        self.last_page = meta.last_page.max(1);
        self.page = meta.current_page.clamp(1, self.last_page);
    }

    pub fn query(&self) -> ListQuery<F> {
        ListQuery {
            filters: self.filters.clone(),
            order: self.order,
            page: PageRequest::new(self.page, self.per_page),
        }
    }

    /// 当前可点击的页码
    pub fn window(&self) -> Vec<u32> {
        page_window(self.page, self.last_page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }
}

/// 列表显示状态
#[derive(Debug, Clone)]
pub enum ListView<T> {
    Loading,
    Empty,
    Loaded(Paginated<T>),
    Failed(ServiceError),
}

impl<T> ListView<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListView::Loaded(page) => &page.data,
            _ => &[],
        }
    }

    pub fn meta(&self) -> Option<&PaginationMeta> {
        match self {
            ListView::Loaded(page) => Some(&page.meta),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListView::Loading)
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            ListView::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// 分页摘要
    pub fn summary(&self) -> Option<String> {
        self.meta().map(showing_summary)
    }
}

/// 通用列表页：数据源 + 查询状态 + 显示状态
pub struct ListPage<S: ListSource> {
    source: S,
    state: ListState<S::Filters>,
    view: ListView<S::Item>,
}

impl<S: ListSource> ListPage<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ListState::default(),
            view: ListView::Loading,
        }
    }

    pub fn state(&self) -> &ListState<S::Filters> {
        &self.state
    }

    pub fn view(&self) -> &ListView<S::Item> {
        &self.view
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 按当前状态拉取一页，失败时记录日志并进入 Failed
    pub async fn load(&mut self) {
        self.view = ListView::Loading;
        match self.source.fetch(&self.state.query()).await {
            Ok(page) => {
                self.state.sync(&page.meta);
                self.view = if page.data.is_empty() {
                    ListView::Empty
                } else {
                    ListView::Loaded(page)
                };
            }
            Err(err) => {
                error!("List fetch failed: {}", err);
                self.view = ListView::Failed(err);
            }
        }
    }

    pub async fn update_filters(&mut self, update: impl FnOnce(&mut S::Filters)) {
        self.state.update_filters(update);
        self.load().await;
    }

    pub async fn set_order(&mut self, order: SortOrder) {
        self.state.set_order(order);
        self.load().await;
    }

    pub async fn set_per_page(&mut self, per_page: u32) {
        self.state.set_per_page(per_page);
        self.load().await;
    }

    pub async fn go_to(&mut self, page: u32) {
        self.state.go_to(page);
        self.load().await;
    }

    pub async fn next(&mut self) {
        if self.state.has_next() {
            self.state.next();
            self.load().await;
        }
    }

    pub async fn previous(&mut self) {
        if self.state.has_previous() {
            self.state.previous();
            self.load().await;
        }
    }

    pub async fn reset(&mut self) {
        self.state.reset();
        self.load().await;
    }
}
