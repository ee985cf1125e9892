// 确认弹窗
// 普通确认 (如启停 Postback) 与需输入 DELETE 的删除确认

/// 删除确认需要输入的文字，大小写敏感
pub const DELETE_CONFIRMATION: &str = "DELETE";

/// 确认弹窗状态，`T` 为待操作对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<T> {
    target: Option<T>,
    typed: String,
    require_typed: bool,
    busy: bool,
}

impl<T> ConfirmDialog<T> {
    /// 点击确认即可
    pub fn simple() -> Self {
        Self { target: None, typed: String::new(), require_typed: false, busy: false }
    }

    /// 需要输入 DELETE
    pub fn typed_delete() -> Self {
        Self { require_typed: true, ..Self::simple() }
    }

    /// 打开弹窗，清空已输入内容
    pub fn open(&mut self, target: T) {
        self.target = Some(target);
        self.typed.clear();
        self.busy = false;
    }

    /// 关闭弹窗
    pub fn close(&mut self) {
        self.target = None;
        self.typed.clear();
        self.busy = false;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn set_typed(&mut self, value: impl Into<String>) {
        self.typed = value.into();
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// 确认按钮是否可用
    pub fn can_confirm(&self) -> bool {
        self.is_open() && !self.busy && (!self.require_typed || self.typed == DELETE_CONFIRMATION)
    }

    /// 开始执行操作，不满足条件时返回 None
    pub fn begin(&mut self) -> Option<&T> {
        if !self.can_confirm() {
            return None;
        }
        self.busy = true;
        self.target.as_ref()
    }

    /// 操作失败，保留弹窗以便重试
    pub fn fail(&mut self) {
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_requires_exact_text() {
        let mut dialog = ConfirmDialog::typed_delete();
        assert!(!dialog.can_confirm());

        dialog.open("pb_1");
        for typed in ["", "delete", "Delete", "DELETE ", " DELETE", "DEL"] {
            dialog.set_typed(typed);
            assert!(!dialog.can_confirm(), "{:?} must not confirm", typed);
            assert!(dialog.begin().is_none());
        }

        dialog.set_typed("DELETE");
        assert_eq!(dialog.begin(), Some(&"pb_1"));
        assert!(dialog.is_busy());
        assert!(!dialog.can_confirm());

        dialog.fail();
        assert!(dialog.can_confirm());

        dialog.close();
        dialog.open("pb_2");
        assert_eq!(dialog.typed(), "");
    }

    #[test]
    fn test_simple_confirm() {
        let mut dialog = ConfirmDialog::simple();
        dialog.open(7u64);
        assert!(dialog.can_confirm());
        assert_eq!(dialog.begin(), Some(&7));
    }
}
