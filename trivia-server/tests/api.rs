//! Router tests against a seeded in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use trivia_server::models::{CategoryKey, NewQuestion};
use trivia_server::{build_router, AppState, MemoryStore, TriviaStore};

const CATEGORIES: [&str; 6] = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

/// Store with the default categories and `count` questions cycling
/// through categories 1..=3.
async fn app_with_questions(count: i64) -> TestApp {
    let store = Arc::new(MemoryStore::with_categories(CATEGORIES));
    for i in 1..=count {
        let question = NewQuestion::new(
            &format!("Question number {i}?"),
            &format!("Answer {i}"),
            CategoryKey::from_id((i - 1) % 3 + 1),
            (i % 5 + 1) as i32,
        )
        .unwrap();
        store.insert_question(question).await.unwrap();
    }

    TestApp {
        router: build_router(AppState::new(store.clone())),
        store,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

fn assert_error(status: StatusCode, body: &Value, code: u16) {
    assert_eq!(status.as_u16(), code, "body: {body}");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], code);
}

#[tokio::test]
async fn get_all_categories() {
    let app = app_with_questions(0).await;
    let (status, _, body) = send(&app, "GET", "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
}

#[tokio::test]
async fn no_categories_is_404() {
    let store = Arc::new(MemoryStore::new());
    let app = TestApp {
        router: build_router(AppState::new(store.clone())),
        store,
    };
    let (status, _, body) = send(&app, "GET", "/categories", None).await;
    assert_error(status, &body, 404);
}

#[tokio::test]
async fn paginated_questions() {
    let app = app_with_questions(12).await;

    let (status, _, body) = send(&app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 12);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["questions"][0]["id"], 1);
    assert_eq!(body["categories"]["2"], "Art");
    assert!(body["current_category"].is_null());

    let (status, _, body) = send(&app, "GET", "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 12]);
    assert_eq!(body["total_questions"], 12);
}

#[tokio::test]
async fn page_out_of_range_is_404() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(&app, "GET", "/questions?page=1111", None).await;
    assert_error(status, &body, 404);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn malformed_page_defaults_to_first() {
    let app = app_with_questions(3).await;
    let (status, _, body) = send(&app, "GET", "/questions?page=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn delete_question() {
    let app = app_with_questions(15).await;

    let (status, _, body) = send(&app, "DELETE", "/questions/13", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 13);
    assert!(app.store.find_question(13).await.unwrap().is_none());

    let (status, _, body) = send(&app, "DELETE", "/questions/13", None).await;
    assert_error(status, &body, 422);
    assert_eq!(body["message"], "Unable To Process");
}

#[tokio::test]
async fn delete_non_integer_id_is_404() {
    let app = app_with_questions(1).await;
    let (status, _, body) = send(&app, "DELETE", "/questions/abc", None).await;
    assert_error(status, &body, 404);
}

#[tokio::test]
async fn create_new_question() {
    let app = app_with_questions(5).await;
    let new_question = json!({
        "question": "ttt00",
        "answer": "ansttttt000",
        "difficulty": 4,
        "category": "2"
    });

    let (status, _, body) = send(&app, "POST", "/add", Some(new_question)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 6);

    let created = body["created"].as_i64().unwrap();
    assert!(created > 5);
    assert_eq!(body["questions"][0]["id"], created);
    assert_eq!(body["questions"][0]["category"], "2");
    assert_eq!(body["questions"][0]["difficulty"], 4);

    let stored = app.store.find_question(created as i32).await.unwrap().unwrap();
    assert_eq!(stored.category, "2");
    assert_eq!(stored.difficulty, 4);
}

#[tokio::test]
async fn create_with_integer_category() {
    let app = app_with_questions(0).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/add",
        Some(json!({ "question": "q", "answer": "a", "difficulty": "1", "category": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"][0]["category"], "3");
}

#[tokio::test]
async fn create_new_question_missing_field() {
    let app = app_with_questions(5).await;
    let failure_question = json!({
        "question2": "",
        "answer": "ansttttt000",
        "difficulty": 4,
        "category": "2"
    });

    let (status, _, body) = send(&app, "POST", "/add", Some(failure_question)).await;
    assert_error(status, &body, 422);
    assert_eq!(app.store.count_questions().await.unwrap(), 5);
}

#[tokio::test]
async fn create_with_bad_category_is_422() {
    let app = app_with_questions(0).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/add",
        Some(json!({ "question": "q", "answer": "a", "difficulty": 1, "category": "science" })),
    )
    .await;
    assert_error(status, &body, 422);
}

async fn send_raw(app: &TestApp, uri: &str, content_type: Option<&str>, body: &'static str) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn unreadable_body_on_add_and_quiz_is_422() {
    let app = app_with_questions(3).await;

    for uri in ["/add", "/quizzes"] {
        let (status, body) = send_raw(&app, uri, Some("application/json"), "{not json").await;
        assert_error(status, &body, 422);

        let (status, body) = send_raw(&app, uri, None, "").await;
        assert_error(status, &body, 422);
    }
    assert_eq!(app.store.count_questions().await.unwrap(), 3);
}

#[tokio::test]
async fn malformed_search_body_is_400() {
    let app = app_with_questions(3).await;

    let (status, body) = send_raw(&app, "/questions/search", Some("application/json"), "{not json").await;
    assert_error(status, &body, 400);
    assert_eq!(body["message"], "Bad Request");

    let (status, body) = send_raw(&app, "/questions/search", None, "").await;
    assert_error(status, &body, 400);
}

#[tokio::test]
async fn search_with_single_match() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/questions/search",
        Some(json!({ "searchTerm": "QUESTION NUMBER 7" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["questions"][0]["id"], 7);
    assert!(body["currentCategory"].is_null());
}

#[tokio::test]
async fn search_total_counts_current_page() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/questions/search?page=2",
        Some(json!({ "searchTerm": "question" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 2);
}

#[tokio::test]
async fn search_without_match_is_empty_success() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/questions/search",
        Some(json!({ "searchTerm": "kgl.dlfgl.dsfd" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 0);
    assert!(body["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_without_term_lists_everything() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(&app, "POST", "/questions/search", Some(json!({ "searchTerm": "" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 12);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/questions/se",
        Some(json!({ "searchTerm": "kgl.dlfgl.dsfd" })),
    )
    .await;
    assert_error(status, &body, 404);

    let (status, _, body) = send(&app, "GET", "/nowhere", None).await;
    assert_error(status, &body, 404);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = app_with_questions(1).await;
    let (status, _, body) = send(&app, "GET", "/add", None).await;
    assert_error(status, &body, 405);

    let (status, _, body) = send(&app, "GET", "/questions/1", None).await;
    assert_error(status, &body, 405);
}

#[tokio::test]
async fn questions_by_category() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(&app, "GET", "/categories/2/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["currentCategory"], "Art");
    assert_eq!(body["totalQuestions"], 4);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);
    assert!(questions.iter().all(|q| q["category"] == "2"));
}

#[tokio::test]
async fn category_without_questions_is_empty_success() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(&app, "GET", "/categories/6/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentCategory"], "Sports");
    assert_eq!(body["totalQuestions"], 0);
}

#[tokio::test]
async fn unknown_category_is_404() {
    let app = app_with_questions(12).await;
    let (status, _, body) = send(&app, "GET", "/categories/99/questions", None).await;
    assert_error(status, &body, 404);
}

#[tokio::test]
async fn quiz_never_repeats_previous_questions() {
    let app = app_with_questions(6).await;
    let previous = vec![1, 2, 3, 4, 5];

    for _ in 0..10 {
        let (status, _, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({ "previous_questions": &previous, "quiz_category": { "type": "click", "id": 0 } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["id"], 6);
    }
}

#[tokio::test]
async fn quiz_draws_from_selected_category() {
    let app = app_with_questions(12).await;
    for _ in 0..10 {
        let (status, _, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({ "previous_questions": [3], "quiz_category": { "type": "Geography", "id": "3" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["category"], "3");
        assert_ne!(body["question"]["id"], 3);
    }
}

#[tokio::test]
async fn quiz_with_no_candidates_is_422() {
    let app = app_with_questions(2).await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/quizzes",
        Some(json!({ "previous_questions": [1, 2], "quiz_category": { "id": 0 } })),
    )
    .await;
    assert_error(status, &body, 422);
}

#[tokio::test]
async fn quiz_missing_fields_is_422() {
    let app = app_with_questions(2).await;
    let (status, _, body) = send(&app, "POST", "/quizzes", Some(json!({ "quiz_category": { "id": 0 } }))).await;
    assert_error(status, &body, 422);
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = app_with_questions(1).await;

    for (method, uri) in [("GET", "/categories"), ("GET", "/questions?page=50"), ("GET", "/missing")] {
        let (_, headers, _) = send(&app, method, uri, None).await;
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "GET,POST,PUT,DELETE,OPTIONS");
    }
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let app = app_with_questions(1).await;
    let request = Request::builder()
        .uri("/categories")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn health_reports_store_contents() {
    let app = app_with_questions(4).await;
    let (status, _, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], json!({ "state": "reachable", "categories": 6, "questions": 4 }));
}
