//! Integration tests for the snippet endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_snippet() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let category_id = app.create_category(&user.token).await;

    let body = app.create_snippet(&user.token, &category_id, "Hello").await;

    assert_eq!(body["title"], "Hello");
    assert_eq!(body["language"], "rust");
    assert_eq!(body["author_id"], user.id);
    assert_eq!(body["category"]["id"], category_id.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_with_unknown_category() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, body) = app
        .post_auth(
            "/v1/snippets",
            &user.token,
            json!({
                "title": "Orphan",
                "content": "x",
                "category_id": uuid::Uuid::new_v4(),
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "category_id");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_only_author_can_modify() {
    let app = common::TestApp::new().await;
    let author = app.create_test_user().await;
    let other = app.create_test_user().await;
    let category_id = app.create_category(&author.token).await;
    let snippet = app.create_snippet(&author.token, &category_id, "Mine").await;
    let path = format!("/v1/snippets/{}", snippet["id"].as_str().unwrap());

    let (status, _) = app
        .put_auth(&path, &other.token, json!({ "title": "Stolen" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete_auth(&path, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put_auth(&path, &author.token, json!({ "title": "Still mine" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Still mine");
    assert_eq!(body["content"], snippet["content"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_snippet() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let category_id = app.create_category(&user.token).await;
    let snippet = app.create_snippet(&user.token, &category_id, "Temp").await;
    let path = format!("/v1/snippets/{}", snippet["id"].as_str().unwrap());

    let (status, body) = app.delete_auth(&path, &user.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_filters_by_category_and_search() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let category_id = app.create_category(&user.token).await;
    app.create_snippet(&user.token, &category_id, "parse_args helper")
        .await;
    app.create_snippet(&user.token, &category_id, "parseXargs lookalike")
        .await;

    // `_` must match literally, not as a single-character wildcard
    let (status, body) = app
        .get(&format!(
            "/v1/snippets?category_id={}&search=PARSE_ARGS",
            category_id
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "parse_args helper");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_is_newest_first() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let category_id = app.create_category(&user.token).await;
    app.create_snippet(&user.token, &category_id, "older").await;
    app.create_snippet(&user.token, &category_id, "newer").await;

    let (status, body) = app
        .get(&format!("/v1/snippets?category_id={}", category_id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "newer");
    assert_eq!(body["data"][1]["title"], "older");
    assert_eq!(body["per_page"], 20);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_moves_snippet_to_other_category() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let from = app.create_category(&user.token).await;
    let to = app.create_category(&user.token).await;
    let snippet = app.create_snippet(&user.token, &from, "Mover").await;

    let (status, body) = app
        .put_auth(
            &format!("/v1/snippets/{}", snippet["id"].as_str().unwrap()),
            &user.token,
            json!({ "category_id": to }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["id"], to.as_str());
    assert_ne!(body["category"]["name"], snippet["category"]["name"]);

    let (_, listed) = app.get(&format!("/v1/categories/{}/snippets", from)).await;
    assert_eq!(listed["total"], 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_ownership_checked_before_body() {
    let app = common::TestApp::new().await;
    let author = app.create_test_user().await;
    let other = app.create_test_user().await;
    let category_id = app.create_category(&author.token).await;
    let snippet = app.create_snippet(&author.token, &category_id, "Guarded").await;
    let invalid = json!({ "title": "" });

    let (status, _) = app
        .put_auth(
            &format!("/v1/snippets/{}", snippet["id"].as_str().unwrap()),
            &other.token,
            invalid.clone(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put_auth(
            &format!("/v1/snippets/{}", uuid::Uuid::new_v4()),
            &author.token,
            invalid,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_clears_optional_fields() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let category_id = app.create_category(&user.token).await;

    let (_, created) = app
        .post_auth(
            "/v1/snippets",
            &user.token,
            json!({
                "title": "Clearable",
                "content": "x",
                "category_id": category_id,
                "description": "old",
                "language": "rust",
            }),
        )
        .await;
    let path = format!("/v1/snippets/{}", created["id"].as_str().unwrap());

    let (status, body) = app
        .put_auth(
            &path,
            &user.token,
            json!({ "description": null, "language": "" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("description").is_none());
    assert!(body.get("language").is_none());
    assert_eq!(body["title"], "Clearable");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_for_deleted_user_is_unauthorized() {
    let app = common::TestApp::new().await;
    let owner = app.create_test_user().await;
    let category_id = app.create_category(&owner.token).await;
    let ghost = app.create_test_user().await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(uuid::Uuid::parse_str(&ghost.id).unwrap())
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = app
        .post_auth(
            "/v1/snippets",
            &ghost.token,
            json!({ "title": "Orphan", "content": "x", "category_id": category_id }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].get("field").is_none());
}
