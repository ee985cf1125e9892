// 推广链接页
// 创建链接、为某条链接拼接目标页面与子参数、校验链接

use log::{debug, error};
use url::Url;

use crate::error::ServiceError;
use crate::models::{AffiliateLink, LinkValidation};
use crate::services::LinkService;

use super::listing::ListPage;
use super::traffic::{format_datetime, TableRow};

impl TableRow for AffiliateLink {
    const HEADERS: &'static [&'static str] = &["Reference ID", "URL", "Clicks", "Created At"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.reference_id.clone(),
            self.url.clone(),
            self.clicks_count.to_string(),
            format_datetime(&self.created_at),
        ]
    }
}

/// 拼接推广地址
///
/// # Arguments
/// * `website_url` - 推广站点根地址
/// * `path` - 目标页面路径 (可带查询串和锚点)
/// * `reference_id` - ref 参数
/// * `subs` - sub1..sub3，空值不出现在结果中
///
/// # Returns
/// * 完整地址，站点地址无效时返回 None
pub fn compose_link(website_url: &str, path: &str, reference_id: &str, subs: [&str; 3]) -> Option<String> {
    let base = Url::parse(website_url).ok()?;
    let mut url = base.join(path).ok()?;

    let mut params = vec![("ref", reference_id)];
    for (key, value) in ["sub1", "sub2", "sub3"].into_iter().zip(subs) {
        if !value.is_empty() {
            params.push((key, value));
        }
    }
    set_query_params(&mut url, &params);
    Some(url.to_string())
}

/// 覆盖同名参数，其他参数保持原顺序
fn set_query_params(url: &mut Url, params: &[(&str, &str)]) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    for (key, value) in params {
        match pairs.iter().position(|(existing, _)| existing == key) {
            Some(index) => {
                pairs[index].1 = value.to_string();
                let mut seen = false;
                pairs.retain(|(existing, _)| {
                    if existing != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}

/// 单条链接的地址生成器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkComposer {
    website_url: Option<String>,
    reference_id: String,
    target_path: String,
    pub sub1: String,
    pub sub2: String,
    pub sub3: String,
    url_error: Option<String>,
}

impl LinkComposer {
    pub fn new(link: &AffiliateLink, website_url: Option<String>) -> Self {
        Self {
            website_url,
            reference_id: link.reference_id.clone(),
            target_path: "/".to_string(),
            sub1: String::new(),
            sub2: String::new(),
            sub3: String::new(),
            url_error: None,
        }
    }

    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn url_error(&self) -> Option<&str> {
        self.url_error.as_deref()
    }

    /// 输入目标页面
    ///
    /// 完整地址必须与站点同源，通过时只保留路径、查询串和锚点；
    /// 不通过时给出错误并保留上一次的有效路径。其他输入补齐前导 `/`。
    pub fn set_target(&mut self, value: &str) {
        let Some(website_url) = self.website_url.as_deref() else {
            self.target_path = value.to_string();
            self.url_error = None;
            return;
        };

        if value.starts_with("http://") || value.starts_with("https://") {
            let (pasted, ours) = match (Url::parse(value), Url::parse(website_url)) {
                (Ok(pasted), Ok(ours)) => (pasted, ours),
                _ => {
                    self.url_error = Some("Invalid URL format. Please enter a valid page path.".to_string());
                    return;
                }
            };

            if pasted.origin() != ours.origin() {
                self.url_error = Some(format!(
                    "Only URLs from {} are allowed. Please use a valid page path.",
                    ours.host_str().unwrap_or_default()
                ));
                return;
            }

            let mut path = pasted.path().to_string();
            if let Some(query) = pasted.query() {
                path.push('?');
                path.push_str(query);
            }
            if let Some(fragment) = pasted.fragment() {
                path.push('#');
                path.push_str(fragment);
            }
            self.target_path = path;
            self.url_error = None;
        } else {
            self.target_path = if value.starts_with('/') {
                value.to_string()
            } else {
                format!("/{}", value)
            };
            self.url_error = None;
        }
    }

    /// 生成的推广地址
    pub fn generated_link(&self) -> Option<String> {
        if self.target_path.is_empty() {
            return None;
        }
        compose_link(
            self.website_url.as_deref()?,
            &self.target_path,
            &self.reference_id,
            [&self.sub1, &self.sub2, &self.sub3],
        )
    }
}

/// 链接校验结果
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Valid(LinkValidation),
    Invalid(ServiceError),
}

/// 推广链接页状态
pub struct LinkBuilderPage {
    pub links: ListPage<LinkService>,
    pub reference_id: String,
    creating: bool,
    error: Option<String>,
    success: Option<String>,
    composer: Option<LinkComposer>,
    pub test_url: String,
    validation: Option<ValidationOutcome>,
}

impl LinkBuilderPage {
    pub fn new(service: LinkService) -> Self {
        Self {
            links: ListPage::new(service),
            reference_id: String::new(),
            creating: false,
            error: None,
            success: None,
            composer: None,
            test_url: String::new(),
            validation: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// 列表响应中的推广站点地址
    pub fn website_url(&self) -> Option<String> {
        self.links.view().meta().and_then(|meta| meta.website_url.clone())
    }

    /// 创建链接后刷新当前页
    pub async fn create(&mut self) {
        self.creating = true;
        self.error = None;
        self.success = None;

        let reference_id = Some(self.reference_id.as_str()).filter(|r| !r.is_empty());
        match self.links.source().create(reference_id).await {
            Ok(_) => {
                self.success = Some("Link created successfully!".to_string());
                self.reference_id.clear();
                self.links.load().await;
            }
            Err(err) => {
                error!("Failed to create link: {}", err);
                self.error = Some(err.message().to_string());
            }
        }
        self.creating = false;
    }

    /// 打开地址生成器
    pub fn open_composer(&mut self, link: &AffiliateLink) {
        debug!("Composing link for {}", link.reference_id);
        self.composer = Some(LinkComposer::new(link, self.website_url()));
    }

    pub fn composer(&self) -> Option<&LinkComposer> {
        self.composer.as_ref()
    }

    pub fn composer_mut(&mut self) -> Option<&mut LinkComposer> {
        self.composer.as_mut()
    }

    pub fn close_composer(&mut self) {
        self.composer = None;
    }

    /// 校验测试地址，空地址不发请求
    pub async fn validate(&mut self) {
        let url = self.test_url.trim().to_string();
        if url.is_empty() {
            return;
        }
        self.validation = None;
        self.validation = Some(match self.links.source().validate(&url).await {
            Ok(result) => ValidationOutcome::Valid(result),
            Err(err) => ValidationOutcome::Invalid(err),
        });
    }

    pub fn validation(&self) -> Option<&ValidationOutcome> {
        self.validation.as_ref()
    }
}
