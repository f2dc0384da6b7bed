//! Menu items and the composed menu.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::routes::RouteName;

/// Menu locations.
pub struct Menu;

impl Menu {
    /// Primary sidebar navigation.
    pub const MAIN: &'static str = "main";
}

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemMenu {
    pub label: String,
    pub icon: Option<String>,
    /// Named route the entry points to.
    pub route: Option<String>,
    pub url: Option<String>,
    /// Permission key required to see the entry.
    pub permission: Option<String>,
    pub sort: i32,
    /// Section header rendered above the entry.
    pub title: Option<String>,
}

impl ItemMenu {
    pub fn label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: None,
            route: None,
            url: None,
            permission: None,
            sort: 0,
            title: None,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// Point at a resource route; the URL is resolved immediately.
    pub fn route(mut self, route: RouteName, resource: &str) -> Self {
        self.route = Some(route.name().to_string());
        self.url = Some(route.url(resource, None));
        self
    }

    pub fn permission(mut self, permission: &str) -> Self {
        self.permission = Some(permission.to_string());
        self
    }

    pub fn sort(mut self, sort: i32) -> Self {
        self.sort = sort;
        self
    }

    pub fn title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }
}

/// Menu entries grouped by location.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DashboardMenu {
    locations: BTreeMap<String, Vec<ItemMenu>>,
}

impl DashboardMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, location: &str, item: ItemMenu) {
        self.locations
            .entry(location.to_string())
            .or_default()
            .push(item);
    }

    /// Entries of a location ordered by sort weight; ties keep insertion order.
    pub fn items(&self, location: &str) -> Vec<&ItemMenu> {
        let mut items: Vec<&ItemMenu> = self
            .locations
            .get(location)
            .map(|items| items.iter().collect())
            .unwrap_or_default();
        items.sort_by_key(|item| item.sort);
        items
    }

    /// Total entries across all locations.
    pub fn len(&self) -> usize {
        self.locations.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
