// 可搜索下拉框
// 按标签过滤 (忽略大小写)，方向键移动高亮

/// 下拉选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
    /// 标签前的图标，如国旗
    pub icon: Option<String>,
}

/// 可搜索下拉框状态
#[derive(Debug, Clone)]
pub struct SearchableSelect<V> {
    options: Vec<SelectOption<V>>,
    selected: Option<V>,
    query: String,
    open: bool,
    highlighted: usize,
}

impl<V: Clone + PartialEq> SearchableSelect<V> {
    pub fn new(options: Vec<SelectOption<V>>) -> Self {
        Self {
            options,
            selected: None,
            query: String::new(),
            open: false,
            highlighted: 0,
        }
    }

    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        self.options = options;
        self.highlighted = 0;
    }

    pub fn open(&mut self) {
        self.open = true;
        self.highlighted = 0;
    }

    /// 关闭并清空搜索词
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 修改搜索词，高亮回到第一项
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.highlighted = 0;
        self.open = true;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 过滤后的选项
    pub fn filtered(&self) -> Vec<&SelectOption<V>> {
        let query = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(&query))
            .collect()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn move_down(&mut self) {
        let count = self.filtered().len();
        if count > 0 && self.highlighted + 1 < count {
            self.highlighted += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// 回车选中高亮项
    pub fn confirm(&mut self) -> Option<V> {
        let value = self.filtered().get(self.highlighted).map(|option| option.value.clone())?;
        self.select(value.clone());
        Some(value)
    }

    pub fn select(&mut self, value: V) {
        self.selected = Some(value);
        self.close();
    }

    pub fn selected(&self) -> Option<&V> {
        self.selected.as_ref()
    }

    /// 已选项的标签
    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected.as_ref()?;
        self.options
            .iter()
            .find(|option| &option.value == selected)
            .map(|option| option.label.as_str())
    }
}
