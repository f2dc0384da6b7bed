#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Every test builds its own [`TestApp`]: the REAL router and state over a
//! private in-memory SQLite database, seeded with posts.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tower::ServiceExt;

use platform_crud::model::{Attributes, Record};
use platform_crud::resources::PostResource;
use platform_crud::theme::ThemeEngine;
use platform_crud::{AppState, Config, ResourceFactory, ResourceRef, routes};

/// Test application wrapper using the REAL routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    /// Seeded posts in insertion order.
    pub posts: Vec<Record>,
}

impl TestApp {
    /// App with the default resources and 50 seeded posts.
    pub async fn new() -> Self {
        let state = AppState::new(&Config::in_memory())
            .await
            .expect("Failed to initialize AppState");
        Self::seeded(state, 50).await
    }

    /// App over an explicit resource list, without seeded posts.
    pub async fn with_resources(factory: ResourceFactory, resources: Vec<ResourceRef>) -> Self {
        let db = platform_crud::db::create_pool(&Config::in_memory())
            .await
            .expect("Failed to create pool");
        let state = AppState::with_resources(
            db,
            factory,
            resources,
            ThemeEngine::new().expect("Failed to load templates"),
        )
        .await
        .expect("Failed to initialize AppState");
        Self::seeded(state, 0).await
    }

    async fn seeded(state: AppState, count: usize) -> Self {
        let store = state.store(&PostResource);
        let mut posts = Vec::with_capacity(count);
        for _ in 0..count {
            let id = store.insert(&fake_post()).await.expect("Failed to seed post");
            posts.push(store.find(id).await.unwrap().unwrap());
        }

        let router = routes::build_app(state.clone(), false);
        Self {
            router,
            state,
            posts,
        }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET with the cookie header of a previous response.
    pub async fn get_with_cookies(&self, uri: &str, cookies: &str) -> Response {
        let mut request = Request::get(uri);
        if !cookies.is_empty() {
            request = request.header(header::COOKIE, cookies);
        }
        self.request(request.body(Body::empty()).unwrap()).await
    }

    /// POST a url-encoded form.
    pub async fn post_form(&self, uri: &str, fields: &[(String, String)]) -> Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Follow a redirect, carrying the session cookie along.
    pub async fn follow(&self, response: Response) -> Response {
        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "expected a redirect"
        );
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("redirect without location")
            .to_string();
        let cookies = extract_cookies(&response);
        self.get_with_cookies(&location, &cookies).await
    }

    /// Id of the most recently inserted post.
    pub async fn latest_post_id(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT MAX(id) FROM posts")
            .fetch_one(self.state.db())
            .await
            .unwrap()
    }
}

/// Extract the `name=value` part of every Set-Cookie header.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Read a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random post attributes.
pub fn fake_post() -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("title".to_string(), format!("Title {}", random_string(12)));
    attributes.insert("description".to_string(), random_string(40));
    attributes.insert("body".to_string(), random_string(120));
    attributes
}

/// Form payload with `model[<field>]` keys.
pub fn model_payload(attributes: &Attributes) -> Vec<(String, String)> {
    attributes
        .iter()
        .map(|(k, v)| (format!("model[{k}]"), v.clone()))
        .collect()
}
