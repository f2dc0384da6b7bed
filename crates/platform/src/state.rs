//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::arbitrator::{Arbitrator, ResourceFactory, ResourceRef};
use crate::config::Config;
use crate::db;
use crate::menu::MenuComposer;
use crate::model::ModelStore;
use crate::permissions::PermissionRegistry;
use crate::resource::Resource;
use crate::resources;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Everything in here is built
/// once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// SQLite connection pool.
    db: SqlitePool,

    /// Booted resource registry.
    arbitrator: Arbitrator,

    /// Permissions declared by resources.
    permissions: PermissionRegistry,

    /// Deferred dashboard menu providers.
    menu: MenuComposer,

    /// Theme engine for template rendering.
    theme: ThemeEngine,
}

impl AppState {
    /// Connect to the database and boot the resources named in the config.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        let theme = match &config.templates_dir {
            Some(dir) => ThemeEngine::with_overrides(dir)?,
            None => ThemeEngine::new()?,
        };

        Self::with_resources(
            db,
            resources::default_factory(),
            config.resources.iter().map(String::as_str),
            theme,
        )
        .await
    }

    /// Register and boot `resources`, then make sure their tables exist.
    pub async fn with_resources<I, R>(
        db: SqlitePool,
        factory: ResourceFactory,
        resources: I,
        theme: ThemeEngine,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceRef>,
    {
        let mut arbitrator = Arbitrator::new(factory);
        arbitrator
            .register(resources)
            .context("failed to register resources")?;

        let mut permissions = PermissionRegistry::new();
        let mut menu = MenuComposer::new();
        arbitrator.boot(&mut permissions, &mut menu);

        for resource in arbitrator.iter() {
            ModelStore::new(db.clone(), resource.model())
                .ensure_table()
                .await
                .with_context(|| format!("failed to prepare storage for {}", resource.uri_key()))?;
        }

        info!(
            resources = arbitrator.len(),
            permissions = permissions.len(),
            "resources ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db,
                arbitrator,
                permissions,
                menu,
                theme,
            }),
        })
    }

    /// Get the database pool.
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    pub fn arbitrator(&self) -> &Arbitrator {
        &self.inner.arbitrator
    }

    pub fn permissions(&self) -> &PermissionRegistry {
        &self.inner.permissions
    }

    pub fn menu(&self) -> &MenuComposer {
        &self.inner.menu
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Record storage for a resource.
    pub fn store(&self, resource: &dyn Resource) -> ModelStore {
        ModelStore::new(self.inner.db.clone(), resource.model())
    }

    /// Check database health.
    pub async fn db_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
