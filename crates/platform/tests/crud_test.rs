#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Full request cycles against the post resource screens.

use axum::http::StatusCode;

use platform_crud::Resource;
use platform_crud::resources::PostResource;
use platform_crud::routes::RouteName;

mod common;
use common::{TestApp, body_text, fake_post, model_payload, random_string};

// =============================================================================
// Screens
// =============================================================================

#[tokio::test]
async fn list_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;

    let response = app.get(&RouteName::List.url("posts", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(&resource.singular_label()));
    assert!(body.contains(&resource.create_button_label()));
    assert!(body.contains(&resource.list_breadcrumbs_message()));
    assert!(body.contains("Edit"));
    assert!(body.contains(&app.posts[0].value("description")));
}

#[tokio::test]
async fn list_resource_paginates() {
    let app = TestApp::new().await;

    let first = body_text(app.get("/admin/resources/posts").await).await;
    assert!(first.contains("Page 1 of 2"));
    assert!(first.contains("/admin/resources/posts?page=2"));
    assert!(!first.contains(&app.posts[30].value("description")));

    let second = body_text(app.get("/admin/resources/posts?page=2").await).await;
    assert!(second.contains("Page 2 of 2"));
    assert!(second.contains(&app.posts[30].value("description")));
    assert!(second.contains(&app.posts[49].value("description")));
    assert!(!second.contains(&app.posts[0].value("description")));
}

#[tokio::test]
async fn list_resource_clamps_page_number() {
    let app = TestApp::new().await;

    let response = app.get("/admin/resources/posts?page=9223372036854775807").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Page 2 of 2"));
    assert!(body.contains(&app.posts[49].value("description")));

    let response = app.get("/admin/resources/posts?page=-5").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Page 1 of 2"));
}

#[tokio::test]
async fn create_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;

    let response = app.get(&RouteName::Create.url("posts", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(&resource.create_button_label()));
    assert!(body.contains(&resource.create_breadcrumbs_message()));
    assert!(body.contains("A string containing the name text and design to attract attention"));
    assert!(body.contains("name=\"model[title]\""));
    assert!(body.contains("name=\"model[body]\""));
}

#[tokio::test]
async fn edit_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;
    let post = &app.posts[0];

    let response = app.get(&RouteName::Edit.url("posts", Some(post.id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(&resource.update_button_label()));
    assert!(body.contains(&resource.edit_breadcrumbs_message()));
    assert!(body.contains(&resource.delete_button_label()));
    assert!(body.contains(&post.value("title")));
    assert!(body.contains(&post.value("description")));
    assert!(body.contains(&post.value("body")));
}

#[tokio::test]
async fn view_resource() {
    let app = TestApp::new().await;
    let post = &app.posts[0];

    let response = app.get(&RouteName::View.url("posts", Some(post.id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(&post.value("title")));
    assert!(body.contains(&post.value("description")));
    assert!(body.contains(&post.value("body")));
}

// =============================================================================
// Actions
// =============================================================================

#[tokio::test]
async fn create_action_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;
    let post = fake_post();

    let response = app
        .post_form(
            &RouteName::Create.action_url("posts", None, "save"),
            &model_payload(&post),
        )
        .await;
    let response = app.follow(response).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(&resource.create_toast_message()));

    let id = app.latest_post_id().await;
    assert_eq!(id, 51);

    let response = app.get(&RouteName::Edit.url("posts", Some(id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(&resource.update_button_label()));
    assert!(body.contains(&post["title"]));
    assert!(body.contains(&post["description"]));
    assert!(body.contains(&post["body"]));
}

#[tokio::test]
async fn create_action_rules_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;
    let save_url = RouteName::Create.action_url("posts", None, "save");

    let mut post = fake_post();
    post.insert("title".to_string(), "unique title".to_string());

    let response = app.post_form(&save_url, &model_payload(&post)).await;
    let response = app.follow(response).await;
    assert!(body_text(response).await.contains(&resource.create_toast_message()));

    let mut duplicate = fake_post();
    duplicate.insert("title".to_string(), "unique title".to_string());

    let response = app.post_form(&save_url, &model_payload(&duplicate)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await;
    assert!(body.contains("The title has already been taken."));
    assert!(body.contains("Change a few things up and try submitting again."));
    // Submitted values are kept in the form
    assert!(body.contains(&duplicate["description"]));
    assert_eq!(app.latest_post_id().await, 51);
}

#[tokio::test]
async fn create_action_requires_fields() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/admin/resources/posts/create/save",
            &[("model[title]".to_string(), "Only a title".to_string())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await;
    assert!(body.contains("The description field is required."));
    assert!(body.contains("The body field is required."));
    assert_eq!(app.latest_post_id().await, 50);
}

#[tokio::test]
async fn update_action_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;
    let post = &app.posts[0];

    let mut changed = post.attributes.clone();
    let description = random_string(24);
    changed.insert("description".to_string(), description.clone());

    let response = app
        .post_form(
            &RouteName::Edit.action_url("posts", Some(post.id), "update"),
            &model_payload(&changed),
        )
        .await;
    let response = app.follow(response).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(&resource.update_toast_message()));

    let response = app.get(&RouteName::Edit.url("posts", Some(post.id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(&description));
}

#[tokio::test]
async fn update_action_keeps_own_unique_title() {
    let app = TestApp::new().await;
    let post = &app.posts[3];

    // Re-submitting the same title must not collide with the record itself
    let response = app
        .post_form(
            &RouteName::Edit.action_url("posts", Some(post.id), "update"),
            &model_payload(&post.attributes),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Taking another post's title is rejected
    let mut stolen = post.attributes.clone();
    stolen.insert("title".to_string(), app.posts[4].value("title"));
    let response = app
        .post_form(
            &RouteName::Edit.action_url("posts", Some(post.id), "update"),
            &model_payload(&stolen),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await
            .contains("The title has already been taken.")
    );
}

#[tokio::test]
async fn delete_action_resource() {
    let app = TestApp::new().await;
    let resource = PostResource;
    let post = &app.posts[0];

    let response = app
        .post_form(
            &RouteName::Edit.action_url("posts", Some(post.id), "delete"),
            &[],
        )
        .await;
    let response = app.follow(response).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(&resource.delete_toast_message()));

    let response = app.get(&RouteName::Edit.url("posts", Some(post.id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toast_is_shown_once() {
    let app = TestApp::new().await;
    let resource = PostResource;

    let response = app
        .post_form(
            "/admin/resources/posts/create/save",
            &model_payload(&fake_post()),
        )
        .await;
    let cookies = common::extract_cookies(&response);
    let response = app.follow(response).await;
    assert!(body_text(response).await.contains(&resource.create_toast_message()));

    let response = app
        .get_with_cookies("/admin/resources/posts", &cookies)
        .await;
    assert!(!body_text(response).await.contains(&resource.create_toast_message()));
}

// =============================================================================
// Not found
// =============================================================================

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/admin/resources/UnregisteredKey",
        "/admin/resources/UnregisteredKey/create",
        "/admin/resources/UnregisteredKey/1",
        "/admin/resources/UnregisteredKey/1/edit",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let app = TestApp::new().await;

    assert_eq!(
        app.get("/admin/resources/posts/9999").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get("/admin/resources/posts/abc/edit").await.status(),
        StatusCode::NOT_FOUND
    );
    let response = app
        .post_form("/admin/resources/posts/9999/edit/delete", &[])
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_method_is_not_found() {
    let app = TestApp::new().await;
    let payload = model_payload(&fake_post());

    let response = app
        .post_form("/admin/resources/posts/create/publish", &payload)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_form("/admin/resources/posts/1/edit/save", &payload)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.latest_post_id().await, 50);
}
