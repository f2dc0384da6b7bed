//! Resource screens: list, create, edit and view, plus the save, update and
//! delete actions posted from them.
//!
//! Every handler looks the resource up by its uri key first; unknown keys,
//! unknown record ids and unknown action methods all answer 404.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::fields::{Column, Field};
use crate::model::{Attributes, Record};
use crate::resource::Resource;
use crate::routes::RouteName;
use crate::session::{Toast, flash};
use crate::state::AppState;
use crate::validation::{VALIDATION_ALERT, ValidationErrors, validate};

use super::helpers::{ResourceView, render_page, render_page_with_status, resource_breadcrumbs};

/// Action requested by a form post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenMethod {
    Save,
    Update,
    Delete,
}

impl ScreenMethod {
    fn parse(method: &str) -> Option<Self> {
        match method {
            "save" => Some(ScreenMethod::Save),
            "update" => Some(ScreenMethod::Update),
            "delete" => Some(ScreenMethod::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CellView {
    value: String,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct RowView {
    id: i64,
    cells: Vec<CellView>,
    edit_url: String,
    view_url: String,
}

#[derive(Debug, Serialize)]
struct PaginationView {
    page: i64,
    last_page: i64,
    total: i64,
    previous_url: Option<String>,
    next_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct InputView {
    field: Field,
    value: String,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct LegendRow {
    title: String,
    value: String,
}

fn resolve(state: &AppState, key: &str) -> AppResult<Arc<dyn Resource>> {
    Ok(Arc::clone(state.arbitrator().find_or_fail(key)?))
}

fn parse_id(id: &str) -> AppResult<i64> {
    id.parse().map_err(|_| AppError::NotFound)
}

async fn find_record(state: &AppState, resource: &dyn Resource, id: i64) -> AppResult<Record> {
    state
        .store(resource)
        .find(id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Pick the declared fields out of a `model[<field>]` form payload.
fn model_input(resource: &dyn Resource, payload: &HashMap<String, String>) -> Attributes {
    resource
        .fields()
        .into_iter()
        .filter_map(|field| {
            payload
                .get(&format!("model[{}]", field.name))
                .map(|value| (field.name, value.clone()))
        })
        .collect()
}

fn row_view(resource: &dyn Resource, columns: &[Column], record: &Record) -> RowView {
    let key = resource.uri_key();
    let view_url = RouteName::View.url(key, Some(record.id));
    RowView {
        id: record.id,
        cells: columns
            .iter()
            .map(|column| CellView {
                value: record.value(&column.name),
                url: column.link.then(|| view_url.clone()),
            })
            .collect(),
        edit_url: RouteName::Edit.url(key, Some(record.id)),
        view_url,
    }
}

/// List screen.
///
/// GET /admin/resources/{resource}
async fn list(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    let resource = resolve(&state, &key)?;
    let page = state
        .store(resource.as_ref())
        .paginate(query.page.unwrap_or(1), resource.per_page())
        .await?;

    let columns = resource.columns();
    let rows: Vec<RowView> = page
        .records
        .iter()
        .map(|record| row_view(resource.as_ref(), &columns, record))
        .collect();

    let list_url = RouteName::List.url(&key, None);
    let pagination = PaginationView {
        page: page.page,
        last_page: page.last_page(),
        total: page.total,
        previous_url: page
            .has_previous()
            .then(|| format!("{list_url}?page={}", page.page - 1)),
        next_url: page
            .has_next()
            .then(|| format!("{list_url}?page={}", page.page + 1)),
    };

    let mut context = tera::Context::new();
    context.insert("resource", &ResourceView::new(resource.as_ref()));
    context.insert("colspan", &(columns.len() + 1));
    context.insert("columns", &columns);
    context.insert("has_rows", &!rows.is_empty());
    context.insert("rows", &rows);
    context.insert("pagination", &pagination);
    context.insert("breadcrumbs", &resource_breadcrumbs(resource.as_ref(), None));

    render_page(&state, &session, "resource/list.html", context).await
}

/// Render the create (`id` = None) or edit form.
async fn render_form(
    state: &AppState,
    session: &Session,
    status: StatusCode,
    resource: &dyn Resource,
    id: Option<i64>,
    values: &Attributes,
    errors: &ValidationErrors,
) -> AppResult<Response> {
    let key = resource.uri_key();
    let (heading, submit_label, action_url, delete_url) = match id {
        None => (
            resource.create_breadcrumbs_message(),
            resource.create_button_label(),
            RouteName::Create.action_url(key, None, "save"),
            None,
        ),
        Some(id) => (
            resource.edit_breadcrumbs_message(),
            resource.update_button_label(),
            RouteName::Edit.action_url(key, Some(id), "update"),
            Some(RouteName::Edit.action_url(key, Some(id), "delete")),
        ),
    };

    let inputs: Vec<InputView> = resource
        .fields()
        .into_iter()
        .map(|field| InputView {
            value: values.get(&field.name).cloned().unwrap_or_default(),
            error: errors.get(&field.name).map(str::to_string),
            field,
        })
        .collect();
    let error_list: Vec<_> = errors.iter().collect();

    let mut context = tera::Context::new();
    context.insert("resource", &ResourceView::new(resource));
    context.insert("heading", &heading);
    context.insert("submit_label", &submit_label);
    context.insert("action_url", &action_url);
    context.insert("delete_url", &delete_url);
    context.insert("inputs", &inputs);
    context.insert("has_errors", &!errors.is_empty());
    context.insert("errors", &error_list);
    context.insert("validation_alert", VALIDATION_ALERT);
    context.insert(
        "breadcrumbs",
        &resource_breadcrumbs(resource, Some(heading.clone())),
    );

    render_page_with_status(state, session, status, "resource/form.html", context).await
}

/// Create screen.
///
/// GET /admin/resources/{resource}/create
async fn create_form(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
) -> AppResult<Response> {
    let resource = resolve(&state, &key)?;
    render_form(
        &state,
        &session,
        StatusCode::OK,
        resource.as_ref(),
        None,
        &Attributes::new(),
        &ValidationErrors::default(),
    )
    .await
}

/// Create screen actions.
///
/// POST /admin/resources/{resource}/create/save
///
/// Success redirects (303) to the list. A failed validation does not
/// redirect: the form is rendered in place with 422 Unprocessable Entity.
async fn create_action(
    State(state): State<AppState>,
    session: Session,
    Path((key, method)): Path<(String, String)>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> AppResult<Response> {
    let resource = resolve(&state, &key)?;
    if ScreenMethod::parse(&method) != Some(ScreenMethod::Save) {
        return Err(AppError::NotFound);
    }

    let Form(payload) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let input = model_input(resource.as_ref(), &payload);
    let store = state.store(resource.as_ref());

    let errors = validate(&store, &resource.rules(None), &input, None).await?;
    if !errors.is_empty() {
        return render_form(
            &state,
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            resource.as_ref(),
            None,
            &input,
            &errors,
        )
        .await;
    }

    let id = store.insert(&input).await?;
    info!(resource = %key, id, "record created");

    flash(&session, Toast::success(resource.create_toast_message())).await?;
    Ok(Redirect::to(&RouteName::List.url(&key, None)).into_response())
}

/// Edit screen.
///
/// GET /admin/resources/{resource}/{id}/edit
async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path((key, id)): Path<(String, String)>,
) -> AppResult<Response> {
    let resource = resolve(&state, &key)?;
    let id = parse_id(&id)?;
    let record = find_record(&state, resource.as_ref(), id).await?;

    render_form(
        &state,
        &session,
        StatusCode::OK,
        resource.as_ref(),
        Some(id),
        &record.attributes,
        &ValidationErrors::default(),
    )
    .await
}

/// Edit screen actions.
///
/// POST /admin/resources/{resource}/{id}/edit/{update,delete}
///
/// As with create, a failed update renders the form with 422 instead of
/// redirecting back.
async fn edit_action(
    State(state): State<AppState>,
    session: Session,
    Path((key, id, method)): Path<(String, String, String)>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> AppResult<Response> {
    let resource = resolve(&state, &key)?;
    let id = parse_id(&id)?;
    let method = match ScreenMethod::parse(&method) {
        Some(m @ (ScreenMethod::Update | ScreenMethod::Delete)) => m,
        _ => return Err(AppError::NotFound),
    };
    let record = find_record(&state, resource.as_ref(), id).await?;
    let store = state.store(resource.as_ref());

    if method == ScreenMethod::Delete {
        store.delete(id).await?;
        info!(resource = %key, id, "record deleted");

        flash(&session, Toast::info(resource.delete_toast_message())).await?;
        return Ok(Redirect::to(&RouteName::List.url(&key, None)).into_response());
    }

    let Form(payload) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut values = record.attributes.clone();
    values.extend(model_input(resource.as_ref(), &payload));

    let errors = validate(&store, &resource.rules(Some(&record)), &values, Some(id)).await?;
    if !errors.is_empty() {
        return render_form(
            &state,
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            resource.as_ref(),
            Some(id),
            &values,
            &errors,
        )
        .await;
    }

    if !store.update(id, &values).await? {
        return Err(AppError::NotFound);
    }
    info!(resource = %key, id, "record updated");

    flash(&session, Toast::success(resource.update_toast_message())).await?;
    Ok(Redirect::to(&RouteName::List.url(&key, None)).into_response())
}

/// View screen.
///
/// GET /admin/resources/{resource}/{id}
async fn view(
    State(state): State<AppState>,
    session: Session,
    Path((key, id)): Path<(String, String)>,
) -> AppResult<Response> {
    let resource = resolve(&state, &key)?;
    let id = parse_id(&id)?;
    let record = find_record(&state, resource.as_ref(), id).await?;

    let rows: Vec<LegendRow> = resource
        .legend()
        .into_iter()
        .map(|sight| LegendRow {
            value: record.value(&sight.name),
            title: sight.title,
        })
        .collect();
    let heading = format!("{} #{id}", resource.singular_label());

    let mut context = tera::Context::new();
    context.insert("resource", &ResourceView::new(resource.as_ref()));
    context.insert("heading", &heading);
    context.insert("rows", &rows);
    context.insert("edit_url", &RouteName::Edit.url(&key, Some(id)));
    context.insert(
        "breadcrumbs",
        &resource_breadcrumbs(resource.as_ref(), Some(heading.clone())),
    );

    render_page(&state, &session, "resource/view.html", context).await
}

/// Create the resource screen router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/resources/{resource}", get(list))
        .route("/admin/resources/{resource}/create", get(create_form))
        .route(
            "/admin/resources/{resource}/create/{method}",
            post(create_action),
        )
        .route("/admin/resources/{resource}/{id}", get(view))
        .route("/admin/resources/{resource}/{id}/edit", get(edit_form))
        .route(
            "/admin/resources/{resource}/{id}/edit/{method}",
            post(edit_action),
        )
}
