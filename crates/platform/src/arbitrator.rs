//! Resource registry.
//!
//! The [`Arbitrator`] collects resources at startup, puts them in navigation
//! order and wires each into the permission registry and the dashboard menu.
//! It is booted once and then shared read-only for the life of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::menu::{DashboardMenu, ItemMenu, Menu, MenuComposer, MenuProvider};
use crate::permissions::{ItemPermission, PermissionRegistry};
use crate::resource::Resource;
use crate::routes::RouteName;

/// Permission group every resource is registered under.
pub const PERMISSION_GROUP: &str = "CRUD";

/// Section header carried by the first resource menu entry.
pub const MENU_TITLE: &str = "Resources";

/// Registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArbitratorError {
    #[error("no resource is registered under identifier '{0}'")]
    Unresolvable(String),

    #[error("resource '{0}' not found")]
    NotFound(String),

    #[error("resource registry is already booted")]
    AlreadyBooted,
}

/// Builds a resource instance.
pub type ResourceConstructor = fn() -> Arc<dyn Resource>;

/// Maps identifiers to resource constructors.
#[derive(Default, Clone)]
pub struct ResourceFactory {
    constructors: HashMap<String, ResourceConstructor>,
}

impl ResourceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identifier: &str, constructor: ResourceConstructor) -> Self {
        self.constructors
            .insert(identifier.to_string(), constructor);
        self
    }

    pub fn resolve(&self, identifier: &str) -> Result<Arc<dyn Resource>, ArbitratorError> {
        self.constructors
            .get(identifier)
            .map(|constructor| constructor())
            .ok_or_else(|| ArbitratorError::Unresolvable(identifier.to_string()))
    }
}

/// A resource to register: either an identifier for the factory or a ready instance.
#[derive(Clone)]
pub enum ResourceRef {
    Identifier(String),
    Instance(Arc<dyn Resource>),
}

impl From<&str> for ResourceRef {
    fn from(identifier: &str) -> Self {
        ResourceRef::Identifier(identifier.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(identifier: String) -> Self {
        ResourceRef::Identifier(identifier)
    }
}

impl From<Arc<dyn Resource>> for ResourceRef {
    fn from(resource: Arc<dyn Resource>) -> Self {
        ResourceRef::Instance(resource)
    }
}

impl fmt::Debug for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
            ResourceRef::Instance(r) => f.debug_tuple("Instance").field(&r.uri_key()).finish(),
        }
    }
}

/// The resource registry.
#[derive(Default)]
pub struct Arbitrator {
    factory: ResourceFactory,
    resources: Vec<Arc<dyn Resource>>,
    /// uri key -> position of its first occurrence in `resources`.
    index: HashMap<String, usize>,
    booted: bool,
}

impl Arbitrator {
    pub fn new(factory: ResourceFactory) -> Self {
        Self {
            factory,
            ..Self::default()
        }
    }

    /// Register resources, resolving identifiers through the factory.
    ///
    /// Resolution happens before anything is added: if one identifier is
    /// unknown the registry is left unchanged. Once booted, the registry is
    /// closed and every call fails with [`ArbitratorError::AlreadyBooted`].
    pub fn register<I, R>(&mut self, resources: I) -> Result<&mut Self, ArbitratorError>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceRef>,
    {
        if self.booted {
            return Err(ArbitratorError::AlreadyBooted);
        }

        let resolved = resources
            .into_iter()
            .map(|r| match r.into() {
                ResourceRef::Identifier(id) => self.factory.resolve(&id),
                ResourceRef::Instance(resource) => Ok(resource),
            })
            .collect::<Result<Vec<_>, _>>()?;

        for resource in resolved {
            debug!(resource = %resource.uri_key(), "resource registered");
            self.resources.push(resource);
        }
        self.rebuild_index();

        Ok(self)
    }

    /// Order resources by `(sort, label)` and wire them into permissions and the menu.
    ///
    /// Runs once; later calls are ignored.
    pub fn boot(&mut self, permissions: &mut PermissionRegistry, menu: &mut MenuComposer) {
        if self.booted {
            warn!("resource registry already booted, ignoring");
            return;
        }

        self.resources.sort_by(|a, b| {
            a.sort()
                .cmp(&b.sort())
                .then_with(|| a.label().cmp(b.label()))
        });
        self.rebuild_index();

        for (position, resource) in self.resources.iter().enumerate() {
            permissions.register(
                ItemPermission::group(PERMISSION_GROUP)
                    .add_permission(resource.uri_key(), resource.label()),
            );
            menu.register(Box::new(ResourceMenuProvider {
                resource: Arc::clone(resource),
                position,
            }));
        }

        self.booted = true;
        info!(resources = self.resources.len(), "resource registry booted");
    }

    /// First resource with the given uri key.
    pub fn find(&self, key: &str) -> Option<&Arc<dyn Resource>> {
        self.index.get(key).and_then(|&i| self.resources.get(i))
    }

    pub fn find_or_fail(&self, key: &str) -> Result<&Arc<dyn Resource>, ArbitratorError> {
        self.find(key)
            .ok_or_else(|| ArbitratorError::NotFound(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Resource>> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, resource) in self.resources.iter().enumerate() {
            self.index.entry(resource.uri_key().to_string()).or_insert(i);
        }
    }
}

/// Adds one resource's entry to the main menu.
struct ResourceMenuProvider {
    resource: Arc<dyn Resource>,
    position: usize,
}

impl MenuProvider for ResourceMenuProvider {
    fn compose(&self, menu: &mut DashboardMenu) {
        let resource = &self.resource;
        menu.add(
            Menu::MAIN,
            ItemMenu::label(resource.label())
                .icon(resource.icon())
                .route(RouteName::List, resource.uri_key())
                .permission(resource.uri_key())
                .sort(resource.sort())
                .title((self.position == 0).then_some(MENU_TITLE)),
        );
    }
}
