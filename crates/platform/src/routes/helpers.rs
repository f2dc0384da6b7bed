//! Shared route helpers for page rendering.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tower_sessions::Session;

use crate::error::AppResult;
use crate::menu::Menu;
use crate::resource::Resource;
use crate::routes::RouteName;
use crate::session::take_toast;
use crate::state::AppState;

/// One breadcrumb; the last one usually has no link.
#[derive(Debug, Clone, Serialize)]
pub struct Crumb {
    pub label: String,
    pub url: Option<String>,
}

impl Crumb {
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: Some(url.into()),
        }
    }

    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
        }
    }
}

/// Resource metadata exposed to templates.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceView {
    pub uri_key: String,
    pub label: String,
    pub singular_label: String,
    pub icon: String,
    pub description: Option<String>,
    pub create_button_label: String,
    pub update_button_label: String,
    pub delete_button_label: String,
    pub list_url: String,
    pub create_url: String,
}

impl ResourceView {
    pub fn new(resource: &dyn Resource) -> Self {
        let key = resource.uri_key();
        Self {
            uri_key: key.to_string(),
            label: resource.label().to_string(),
            singular_label: resource.singular_label(),
            icon: resource.icon().to_string(),
            description: resource.description(),
            create_button_label: resource.create_button_label(),
            update_button_label: resource.update_button_label(),
            delete_button_label: resource.delete_button_label(),
            list_url: RouteName::List.url(key, None),
            create_url: RouteName::Create.url(key, None),
        }
    }
}

/// Breadcrumb trail starting at the resource list.
pub fn resource_breadcrumbs(resource: &dyn Resource, current: Option<String>) -> Vec<Crumb> {
    match current {
        Some(label) => vec![
            Crumb::link(
                resource.list_breadcrumbs_message(),
                RouteName::List.url(resource.uri_key(), None),
            ),
            Crumb::current(label),
        ],
        None => vec![Crumb::current(resource.list_breadcrumbs_message())],
    }
}

/// Render a dashboard page with `200 OK`.
pub async fn render_page(
    state: &AppState,
    session: &Session,
    template: &str,
    context: tera::Context,
) -> AppResult<Response> {
    render_page_with_status(state, session, StatusCode::OK, template, context).await
}

/// Render a dashboard page.
///
/// Composes the navigation menu and takes the pending toast from the session
/// before rendering, so every page shows the current menu and each toast is
/// shown exactly once.
pub async fn render_page_with_status(
    state: &AppState,
    session: &Session,
    status: StatusCode,
    template: &str,
    mut context: tera::Context,
) -> AppResult<Response> {
    let menu = state.menu().compose();
    context.insert("menu", &menu.items(Menu::MAIN));
    context.insert("toast", &take_toast(session).await);
    if !context.contains_key("breadcrumbs") {
        context.insert("breadcrumbs", &Vec::<Crumb>::new());
    }

    let html = state.theme().render(template, &context)?;
    Ok((status, Html(html)).into_response())
}
