//! Dashboard landing page and the permission listing.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;

use crate::error::AppResult;
use crate::permissions::ItemPermission;
use crate::state::AppState;

use super::helpers::{ResourceView, render_page};

#[derive(Debug, Serialize)]
struct DashboardEntry {
    #[serde(flatten)]
    resource: ResourceView,
    count: i64,
}

/// Admin dashboard.
///
/// GET /admin
async fn dashboard(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let mut resources = Vec::with_capacity(state.arbitrator().len());
    for resource in state.arbitrator().iter() {
        let count = state.store(resource.as_ref()).count().await?;
        resources.push(DashboardEntry {
            resource: ResourceView::new(resource.as_ref()),
            count,
        });
    }

    let mut context = tera::Context::new();
    context.insert("resources", &resources);

    render_page(&state, &session, "dashboard.html", context).await
}

/// Registered permission groups.
///
/// GET /admin/permissions
async fn permissions(State(state): State<AppState>) -> Json<Vec<ItemPermission>> {
    Json(state.permissions().groups().to_vec())
}

/// Create the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/permissions", get(permissions))
}
