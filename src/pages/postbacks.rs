// Postback 设置页
// 表单 (地址/方法/事件/请求头/请求体)、占位符插入、启停与删除确认

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error, info};

use crate::error::ServiceError;
use crate::models::{Postback, PostbackEvent, PostbackMethod, PostbackRequest};
use crate::services::PostbackService;
use crate::utils::validate_https_url;

use super::confirm::ConfirmDialog;
use super::navigation::Route;

/// 占位符说明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub token: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

/// 回调地址/请求头/请求体中可用的占位符
pub const PLACEHOLDERS: [Placeholder; 10] = [
    Placeholder {
        token: "{click_id}",
        description: "Unique click identifier (UUID) generated by our system",
        example: "550e8400-e29b-41d4-a716-446655440000",
    },
    Placeholder { token: "{affiliate_id}", description: "Your affiliate ID", example: "12345" },
    Placeholder { token: "{ref}", description: "Your reference/link ID", example: "link-001" },
    Placeholder {
        token: "{country}",
        description: "User country code (ISO 3166-1 alpha-2)",
        example: "US, GB, FR, DE",
    },
    Placeholder {
        token: "{event}",
        description: "Event type",
        example: "click, registration, conversion",
    },
    Placeholder {
        token: "{commission}",
        description: "Commission amount in cents, only for conversion events",
        example: "1299, 2500, 599",
    },
    Placeholder {
        token: "{timestamp}",
        description: "Event timestamp (ISO 8601 with timezone)",
        example: "2025-10-25T14:30:00+00:00",
    },
    Placeholder { token: "{sub1}", description: "Custom sub-parameter 1", example: "campaign-a" },
    Placeholder { token: "{sub2}", description: "Custom sub-parameter 2", example: "source-123" },
    Placeholder { token: "{sub3}", description: "Custom sub-parameter 3", example: "variation-b" },
];

/// 键值行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueRow {
    pub key: String,
    pub value: String,
}

/// 表单中可输入文字的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Url,
    HeaderKey(usize),
    HeaderValue(usize),
    BodyKey(usize),
    BodyValue(usize),
}

/// 光标选区 (字符下标)，start == end 表示无选中
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

/// Postback 表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostbackForm {
    pub url: String,
    pub method: PostbackMethod,
    events: BTreeSet<PostbackEvent>,
    pub headers: Vec<KeyValueRow>,
    pub body: Vec<KeyValueRow>,
    active: Option<(FormField, Selection)>,
}

impl Default for PostbackForm {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: PostbackMethod::Get,
            events: BTreeSet::new(),
            headers: vec![KeyValueRow::default()],
            body: vec![KeyValueRow::default()],
            active: None,
        }
    }
}

impl PostbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 编辑时预填，"Key: Value" 请求头拆回键值行
    pub fn from_postback(postback: &Postback) -> Self {
        let mut headers: Vec<KeyValueRow> = postback
            .headers
            .iter()
            .map(|header| match header.split_once(':') {
                Some((key, value)) => KeyValueRow {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                },
                None => KeyValueRow {
                    key: header.trim().to_string(),
                    value: String::new(),
                },
            })
            .collect();
        if headers.is_empty() {
            headers.push(KeyValueRow::default());
        }

        let mut body: Vec<KeyValueRow> = postback
            .body
            .iter()
            .flatten()
            .map(|(key, value)| KeyValueRow {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        if body.is_empty() {
            body.push(KeyValueRow::default());
        }

        Self {
            url: postback.url.clone(),
            method: postback.method,
            events: postback.events.iter().copied().collect(),
            headers,
            body,
            active: None,
        }
    }

    pub fn events(&self) -> impl Iterator<Item = PostbackEvent> + '_ {
        self.events.iter().copied()
    }

    pub fn has_event(&self, event: PostbackEvent) -> bool {
        self.events.contains(&event)
    }

    pub fn toggle_event(&mut self, event: PostbackEvent) {
        if !self.events.remove(&event) {
            self.events.insert(event);
        }
    }

    pub fn add_header(&mut self) {
        self.headers.push(KeyValueRow::default());
    }

    pub fn remove_header(&mut self, index: usize) {
        if index < self.headers.len() {
            self.headers.remove(index);
            self.active = None;
        }
    }

    pub fn add_body_param(&mut self) {
        self.body.push(KeyValueRow::default());
    }

    pub fn remove_body_param(&mut self, index: usize) {
        if index < self.body.len() {
            self.body.remove(index);
            self.active = None;
        }
    }

    fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Url => Some(&mut self.url),
            FormField::HeaderKey(i) => self.headers.get_mut(i).map(|row| &mut row.key),
            FormField::HeaderValue(i) => self.headers.get_mut(i).map(|row| &mut row.value),
            FormField::BodyKey(i) => self.body.get_mut(i).map(|row| &mut row.key),
            FormField::BodyValue(i) => self.body.get_mut(i).map(|row| &mut row.value),
        }
    }

    pub fn field(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Url => Some(&self.url),
            FormField::HeaderKey(i) => self.headers.get(i).map(|row| row.key.as_str()),
            FormField::HeaderValue(i) => self.headers.get(i).map(|row| row.value.as_str()),
            FormField::BodyKey(i) => self.body.get(i).map(|row| row.key.as_str()),
            FormField::BodyValue(i) => self.body.get(i).map(|row| row.value.as_str()),
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if let Some(slot) = self.field_mut(field) {
            *slot = value.into();
        }
    }

    /// 记录当前获得焦点的字段及选区
    pub fn focus(&mut self, field: FormField, selection: Selection) {
        self.active = Some((field, selection));
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<(FormField, Selection)> {
        self.active
    }

    /// 用占位符替换当前字段的选区，光标移到占位符之后
    ///
    /// # Returns
    /// * 没有活动字段时返回 false，不做任何修改
    pub fn insert_placeholder(&mut self, token: &str) -> bool {
        let Some((field, selection)) = self.active else {
            return false;
        };
        let Some(value) = self.field_mut(field) else {
            return false;
        };

        let length = value.chars().count();
        let start = selection.start.min(length);
        let end = selection.end.clamp(start, length);
        let byte = |index: usize| value.char_indices().nth(index).map(|(b, _)| b).unwrap_or(value.len());
        let (start_byte, end_byte) = (byte(start), byte(end));

        value.replace_range(start_byte..end_byte, token);
        let caret = start + token.chars().count();
        self.active = Some((field, Selection::caret(caret)));
        debug!("Inserted {} into {:?}", token, field);
        true
    }

    /// 提交前校验
    pub fn validate(&self) -> Result<(), String> {
        if self.events.is_empty() {
            return Err("Please select at least one event".to_string());
        }
        if !validate_https_url(&self.url) {
            return Err("URL must start with https://".to_string());
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// 组装请求：空请求头省略，请求体只在 POST 且非空时发送
    pub fn to_request(&self) -> PostbackRequest {
        let headers: Vec<String> = self
            .headers
            .iter()
            .filter(|row| !row.key.trim().is_empty() && !row.value.trim().is_empty())
            .map(|row| format!("{}: {}", row.key, row.value))
            .collect();

        let body: BTreeMap<String, String> = match self.method {
            PostbackMethod::Post => self
                .body
                .iter()
                .filter(|row| !row.key.trim().is_empty())
                .map(|row| (row.key.clone(), row.value.clone()))
                .collect(),
            PostbackMethod::Get => BTreeMap::new(),
        };

        PostbackRequest {
            url: self.url.clone(),
            method: self.method,
            events: self.events.iter().copied().collect(),
            headers: Some(headers).filter(|h| !h.is_empty()),
            body: Some(body).filter(|b| !b.is_empty()),
        }
    }
}

/// 表单弹窗：新建或编辑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModal {
    pub form: PostbackForm,
    editing: Option<String>,
    submitting: bool,
    error: Option<String>,
}

impl FormModal {
    pub fn create() -> Self {
        Self {
            form: PostbackForm::new(),
            editing: None,
            submitting: false,
            error: None,
        }
    }

    pub fn edit(postback: &Postback) -> Self {
        Self {
            form: PostbackForm::from_postback(postback),
            editing: Some(postback.id.clone()),
            submitting: false,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Postback"
        } else {
            "Create Postback"
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 校验并提交，成功返回保存后的 Postback
    async fn submit(&mut self, service: &PostbackService) -> Option<Postback> {
        if let Err(message) = self.form.validate() {
            self.error = Some(message);
            return None;
        }

        self.submitting = true;
        self.error = None;
        let request = self.form.to_request();
        let result = match &self.editing {
            Some(id) => service.update(id, &request).await,
            None => service.create(&request).await,
        };
        self.submitting = false;

        match result {
            Ok(postback) => Some(postback),
            Err(err) => {
                self.error = Some(err.message().to_string());
                None
            }
        }
    }
}

/// Postback 列表页
pub struct PostbacksPage {
    service: PostbackService,
    postbacks: Vec<Postback>,
    loading: bool,
    error: Option<ServiceError>,
    modal: Option<FormModal>,
    pub toggle_dialog: ConfirmDialog<String>,
    pub delete_dialog: ConfirmDialog<String>,
}

impl PostbacksPage {
    pub fn new(service: PostbackService) -> Self {
        Self {
            service,
            postbacks: Vec::new(),
            loading: true,
            error: None,
            modal: None,
            toggle_dialog: ConfirmDialog::simple(),
            delete_dialog: ConfirmDialog::typed_delete(),
        }
    }

    pub fn postbacks(&self) -> &[Postback] {
        &self.postbacks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.service.list().await {
            Ok(postbacks) => {
                self.postbacks = postbacks;
                self.error = None;
            }
            Err(err) => {
                error!("Postback list failed: {}", err);
                self.error = Some(err);
            }
        }
        self.loading = false;
    }

    pub fn open_create(&mut self) {
        self.modal = Some(FormModal::create());
    }

    pub fn open_edit(&mut self, id: &str) {
        if let Some(postback) = self.postbacks.iter().find(|p| p.id == id) {
            self.modal = Some(FormModal::edit(postback));
        }
    }

    pub fn modal(&self) -> Option<&FormModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut FormModal> {
        self.modal.as_mut()
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// 提交弹窗表单，成功后关闭弹窗并刷新列表
    pub async fn submit(&mut self) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        if modal.submit(&self.service).await.is_some() {
            self.modal = None;
            self.load().await;
        }
    }

    /// 确认启停
    pub async fn confirm_toggle(&mut self) {
        let Some(id) = self.toggle_dialog.begin().cloned() else {
            return;
        };
        match self.service.toggle(&id).await {
            Ok(_) => {
                self.toggle_dialog.close();
                self.load().await;
            }
            Err(err) => {
                self.toggle_dialog.fail();
                self.error = Some(err);
            }
        }
    }

    /// 确认删除，需要已输入 DELETE
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.delete_dialog.begin().cloned() else {
            return;
        };
        match self.service.delete(&id).await {
            Ok(()) => {
                self.delete_dialog.close();
                self.load().await;
            }
            Err(err) => {
                self.delete_dialog.fail();
                self.error = Some(err);
            }
        }
    }
}

/// 单个 Postback 详情页
pub struct PostbackDetailPage {
    service: PostbackService,
    id: String,
    postback: Option<Postback>,
    loading: bool,
    error: Option<ServiceError>,
    modal: Option<FormModal>,
    pub toggle_dialog: ConfirmDialog<String>,
    pub delete_dialog: ConfirmDialog<String>,
}

impl PostbackDetailPage {
    pub fn new(service: PostbackService, id: impl Into<String>) -> Self {
        Self {
            service,
            id: id.into(),
            postback: None,
            loading: true,
            error: None,
            modal: None,
            toggle_dialog: ConfirmDialog::simple(),
            delete_dialog: ConfirmDialog::typed_delete(),
        }
    }

    pub fn postback(&self) -> Option<&Postback> {
        self.postback.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.service.find(&self.id).await {
            Ok(Some(postback)) => {
                self.postback = Some(postback);
                self.error = None;
            }
            Ok(None) => {
                self.postback = None;
                self.error = Some(ServiceError::new("Postback not found"));
            }
            Err(err) => self.error = Some(err),
        }
        self.loading = false;
    }

    pub fn open_edit(&mut self) {
        if let Some(postback) = &self.postback {
            self.modal = Some(FormModal::edit(postback));
        }
    }

    pub fn modal_mut(&mut self) -> Option<&mut FormModal> {
        self.modal.as_mut()
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub async fn submit(&mut self) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        if modal.submit(&self.service).await.is_some() {
            self.modal = None;
            self.load().await;
        }
    }

    pub fn request_toggle(&mut self) {
        self.toggle_dialog.open(self.id.clone());
    }

    pub fn request_delete(&mut self) {
        self.delete_dialog.open(self.id.clone());
    }

    pub async fn confirm_toggle(&mut self) {
        let Some(id) = self.toggle_dialog.begin().cloned() else {
            return;
        };
        match self.service.toggle(&id).await {
            Ok(_) => {
                self.toggle_dialog.close();
                self.load().await;
            }
            Err(err) => {
                self.toggle_dialog.fail();
                self.error = Some(err);
            }
        }
    }

    /// 删除成功后返回列表页
    pub async fn confirm_delete(&mut self) -> Option<Route> {
        let id = self.delete_dialog.begin().cloned()?;
        match self.service.delete(&id).await {
            Ok(()) => {
                info!("Leaving detail page of deleted postback {}", id);
                self.delete_dialog.close();
                Some(Route::SettingsPostbacks)
            }
            Err(err) => {
                self.delete_dialog.fail();
                self.error = Some(err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PostbackForm {
        let mut form = PostbackForm::new();
        form.url = "https://hooks.example.com/t".into();
        form.toggle_event(PostbackEvent::Conversion);
        form
    }

    #[test]
    fn test_submission_requires_event_and_https() {
        let mut form = PostbackForm::new();
        form.url = "https://hooks.example.com".into();
        assert_eq!(form.validate(), Err("Please select at least one event".to_string()));

        form.toggle_event(PostbackEvent::Click);
        assert!(form.can_submit());

        form.url = "http://hooks.example.com".into();
        assert_eq!(form.validate(), Err("URL must start with https://".to_string()));

        form.url = "https://hooks.example.com".into();
        form.toggle_event(PostbackEvent::Click);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_request_building() {
        let mut form = valid_form();
        form.headers = vec![
            KeyValueRow { key: "X-Token".into(), value: "abc".into() },
            KeyValueRow { key: "X-Empty".into(), value: " ".into() },
        ];
        form.body = vec![
            KeyValueRow { key: "id".into(), value: "{click_id}".into() },
            KeyValueRow { key: " ".into(), value: "ignored".into() },
        ];

        let request = form.to_request();
        assert_eq!(request.headers, Some(vec!["X-Token: abc".to_string()]));
        assert_eq!(request.body, None, "GET never sends a body");

        form.method = PostbackMethod::Post;
        let request = form.to_request();
        let body = request.body.unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body["id"], "{click_id}");

        let empty = valid_form().to_request();
        assert_eq!(empty.headers, None);
        assert_eq!(empty.body, None);
    }

    #[test]
    fn test_insert_placeholder_replaces_selection() {
        let mut form = valid_form();
        form.url = "https://x.test/cb?id=XXX&e=1".into();

        assert!(!form.insert_placeholder("{click_id}"), "no active field");

        form.focus(FormField::Url, Selection { start: 21, end: 24 });
        assert!(form.insert_placeholder("{click_id}"));
        assert_eq!(form.url, "https://x.test/cb?id={click_id}&e=1");
        assert_eq!(form.active(), Some((FormField::Url, Selection::caret(31))));

        form.focus(FormField::BodyValue(0), Selection::caret(0));
        assert!(form.insert_placeholder("{event}"));
        assert_eq!(form.body[0].value, "{event}");

        form.focus(FormField::HeaderKey(5), Selection::caret(0));
        assert!(!form.insert_placeholder("{ref}"));
    }

    #[test]
    fn test_prefill_from_postback() {
        let postback: Postback = serde_json::from_value(serde_json::json!({
            "id": "pb_1", "url": "https://hooks.example.com", "method": "POST",
            "events": ["registration"], "is_active": true, "secret": "s",
            "headers": ["Authorization: Bearer a:b"], "body": {"ref": "{ref}"},
            "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let form = PostbackForm::from_postback(&postback);
        assert_eq!(form.headers[0], KeyValueRow { key: "Authorization".into(), value: "Bearer a:b".into() });
        assert_eq!(form.body[0].key, "ref");
        assert!(form.has_event(PostbackEvent::Registration));
        assert_eq!(form.to_request().headers, Some(vec!["Authorization: Bearer a:b".to_string()]));
    }

    #[test]
    fn test_placeholder_table() {
        let tokens: Vec<&str> = PLACEHOLDERS.iter().map(|p| p.token).collect();
        assert_eq!(tokens[0], "{click_id}");
        assert!(tokens.contains(&"{commission}"));
        assert!(PLACEHOLDERS.iter().all(|p| !p.example.is_empty()));
    }
}
