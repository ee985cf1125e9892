// 路由与侧边栏
// 页面路径和导航菜单的纯数据模型

use std::collections::BTreeSet;

/// 面板路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login { require_2fa: bool },
    Register,
    Dashboard,
    Clicks,
    Customers,
    Leads,
    LinkBuilder,
    Payouts,
    Settings,
    SettingsPostbacks,
    SettingsPostback(String),
    SettingsPayoutDetails,
    SettingsSecurity,
}

impl Route {
    /// 路由对应的路径
    pub fn path(&self) -> String {
        match self {
            Route::Login { require_2fa: true } => "/login?require2fa=true".to_string(),
            Route::Login { require_2fa: false } => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Clicks => "/traffic/clicks".to_string(),
            Route::Customers => "/traffic/customers".to_string(),
            Route::Leads => "/traffic/leads".to_string(),
            Route::LinkBuilder => "/linkbuilder".to_string(),
            Route::Payouts => "/payouts".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::SettingsPostbacks => "/settings/postback".to_string(),
            Route::SettingsPostback(id) => format!("/settings/postback/{}", id),
            Route::SettingsPayoutDetails => "/settings/payout-details".to_string(),
            Route::SettingsSecurity => "/settings/security".to_string(),
        }
    }

    /// 解析路径，未知路径返回 None
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let path = path.trim_end_matches('/');

        let route = match path {
            "/login" => Route::Login {
                require_2fa: query
                    .map(|q| q.split('&').any(|pair| pair == "require2fa=true"))
                    .unwrap_or(false),
            },
            "/register" => Route::Register,
            "" | "/dashboard" => Route::Dashboard,
            "/traffic/clicks" => Route::Clicks,
            "/traffic/customers" => Route::Customers,
            "/traffic/leads" => Route::Leads,
            "/linkbuilder" => Route::LinkBuilder,
            "/payouts" => Route::Payouts,
            "/settings" => Route::Settings,
            "/settings/postback" => Route::SettingsPostbacks,
            "/settings/payout-details" => Route::SettingsPayoutDetails,
            "/settings/security" => Route::SettingsSecurity,
            other => {
                let id = other.strip_prefix("/settings/postback/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::SettingsPostback(id.to_string())
            }
        };
        Some(route)
    }

    /// 是否无需登录
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login { .. } | Route::Register)
    }
}

/// 侧边栏菜单项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: &'static str,
    pub route: Option<Route>,
    pub submenu: Vec<MenuItem>,
}

impl MenuItem {
    fn link(name: &'static str, route: Route) -> Self {
        Self { name, route: Some(route), submenu: Vec::new() }
    }
}

/// 侧边栏：菜单结构与展开状态
#[derive(Debug, Clone)]
pub struct Sidebar {
    items: Vec<MenuItem>,
    expanded: BTreeSet<&'static str>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    pub fn new() -> Self {
        let items = vec![
            MenuItem::link("Dashboard", Route::Dashboard),
            MenuItem {
                name: "Traffic",
                route: None,
                submenu: vec![
                    MenuItem::link("Clicks", Route::Clicks),
                    MenuItem::link("Customers", Route::Customers),
                    MenuItem::link("Leads", Route::Leads),
                ],
            },
            MenuItem::link("Link Builder", Route::LinkBuilder),
            MenuItem::link("Payouts", Route::Payouts),
        ];
        let mut expanded = BTreeSet::new();
        expanded.insert("Traffic");
        Self { items, expanded }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    /// 展开/收起子菜单
    pub fn toggle(&mut self, name: &str) {
        if let Some(item) = self.items.iter().find(|item| item.name == name && !item.submenu.is_empty()) {
            if !self.expanded.remove(item.name) {
                self.expanded.insert(item.name);
            }
        }
    }

    /// 当前路径是否选中该路由，设置页按前缀匹配
    pub fn is_active(current_path: &str, route: &Route) -> bool {
        let path = route.path();
        if *route == Route::Settings {
            return current_path.starts_with("/settings");
        }
        current_path == path
    }

    /// Traffic 分组是否选中
    pub fn is_traffic_active(current_path: &str) -> bool {
        current_path.starts_with("/traffic")
    }
}

/// 设置页子导航 (名称, 路由)
pub fn settings_sections() -> Vec<(&'static str, Route)> {
    vec![
        ("General", Route::Settings),
        ("Postback URLs", Route::SettingsPostbacks),
        ("Payout Details", Route::SettingsPayoutDetails),
        ("Security", Route::SettingsSecurity),
    ]
}

/// 设置页子导航选中判断，Postback 详情页也算 Postback URLs
pub fn is_settings_section_active(current_path: &str, route: &Route) -> bool {
    if *route == Route::SettingsPostbacks {
        return current_path.starts_with("/settings/postback");
    }
    current_path == route.path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse_roundtrip() {
        for route in [
            Route::Login { require_2fa: true },
            Route::Login { require_2fa: false },
            Route::Dashboard,
            Route::Leads,
            Route::SettingsPostback("pb_9".into()),
            Route::SettingsSecurity,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(Route::parse("/unknown"), None);
        assert_eq!(Route::parse("/settings/postback/a/b"), None);
    }

    #[test]
    fn test_sidebar_state() {
        let mut sidebar = Sidebar::new();
        assert!(sidebar.is_expanded("Traffic"));
        sidebar.toggle("Traffic");
        assert!(!sidebar.is_expanded("Traffic"));
        sidebar.toggle("Dashboard");
        assert!(!sidebar.is_expanded("Dashboard"));

        assert!(Sidebar::is_active("/settings/security", &Route::Settings));
        assert!(!Sidebar::is_active("/traffic/leads", &Route::Clicks));
        assert!(Sidebar::is_traffic_active("/traffic/leads"));
        assert!(is_settings_section_active("/settings/postback/pb_1", &Route::SettingsPostbacks));
        assert!(!is_settings_section_active("/settings/security", &Route::Settings));
    }
}
