//! HTTP route handlers.

pub mod dashboard;
pub mod health;
pub mod helpers;
pub mod resource;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::session;
use crate::state::AppState;

/// Prefix shared by every admin screen.
pub const ADMIN_PREFIX: &str = "/admin";

/// Named resource routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    List,
    Create,
    Edit,
    View,
}

impl RouteName {
    pub fn name(self) -> &'static str {
        match self {
            RouteName::List => "platform.resource.list",
            RouteName::Create => "platform.resource.create",
            RouteName::Edit => "platform.resource.edit",
            RouteName::View => "platform.resource.view",
        }
    }

    /// URL of the screen. Record routes without an id fall back to the list.
    pub fn url(self, resource: &str, id: Option<i64>) -> String {
        let base = format!("{ADMIN_PREFIX}/resources/{resource}");
        match (self, id) {
            (RouteName::Create, _) => format!("{base}/create"),
            (RouteName::Edit, Some(id)) => format!("{base}/{id}/edit"),
            (RouteName::View, Some(id)) => format!("{base}/{id}"),
            _ => base,
        }
    }

    /// URL a screen's form posts to for `method`.
    pub fn action_url(self, resource: &str, id: Option<i64>, method: &str) -> String {
        format!("{}/{method}", self.url(resource, id))
    }
}

/// Build the full application router with sessions and request tracing.
pub fn build_app(state: AppState, cookie_secure: bool) -> Router {
    Router::new()
        .merge(dashboard::router())
        .merge(resource::router())
        .merge(health::router())
        // TraceLayer → session → routes
        .layer(session::create_session_layer(cookie_secure))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
