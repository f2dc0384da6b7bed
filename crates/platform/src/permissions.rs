//! Permission registry.
//!
//! Permissions are declared in named groups at startup and are read-only
//! afterwards. Registering a group that already exists appends to it.

use serde::Serialize;

/// A single permission key with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub key: String,
    pub label: String,
}

/// A named group of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPermission {
    pub group: String,
    pub permissions: Vec<Permission>,
}

impl ItemPermission {
    /// Start a new group.
    pub fn group(name: &str) -> Self {
        Self {
            group: name.to_string(),
            permissions: Vec::new(),
        }
    }

    pub fn add_permission(mut self, key: &str, label: &str) -> Self {
        self.permissions.push(Permission {
            key: key.to_string(),
            label: label.to_string(),
        });
        self
    }
}

/// All registered permission groups, in first-registration order.
#[derive(Debug, Default, Clone)]
pub struct PermissionRegistry {
    groups: Vec<ItemPermission>,
}

impl PermissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group, merging into an existing group of the same name.
    pub fn register(&mut self, item: ItemPermission) {
        match self.groups.iter_mut().find(|g| g.group == item.group) {
            Some(existing) => existing.permissions.extend(item.permissions),
            None => self.groups.push(item),
        }
    }

    pub fn groups(&self) -> &[ItemPermission] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ItemPermission> {
        self.groups.iter().find(|g| g.group == name)
    }

    /// Total number of permission entries across groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.permissions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
