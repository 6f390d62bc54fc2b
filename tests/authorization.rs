//! Ownership rules enforced by the drive and post handlers, exercised through the router against
//! a real PostgreSQL. Set `TEST_DATABASE_URL` to run them; without it every test returns early.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use garage_drives::{app, ensure_tables, AppState, TokenKeys};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::Mutex;
use tower::ServiceExt;

const SECRET: &str = "authorization-test-secret";

static SCHEMA_READY: Mutex<bool> = Mutex::const_new(false);

struct Harness {
    pool: PgPool,
    keys: TokenKeys,
}

impl Harness {
    async fn new() -> Option<Self> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .unwrap();
        let mut ready = SCHEMA_READY.lock().await;
        if !*ready {
            ensure_tables(&pool).await.unwrap();
            *ready = true;
        }
        drop(ready);
        Some(Harness {
            pool,
            keys: TokenKeys::new(SECRET, 3600),
        })
    }

    fn router(&self) -> Router {
        app(AppState::new(self.pool.clone(), TokenKeys::new(SECRET, 3600)), 64 * 1024)
    }

    /// Insert a user row and return a bearer header for it.
    async fn user(&self, is_admin: bool) -> String {
        let username = unique("user");
        sqlx::query("INSERT INTO users (username, is_admin) VALUES ($1, $2)")
            .bind(&username)
            .bind(is_admin)
            .execute(&self.pool)
            .await
            .unwrap();
        format!("Bearer {}", self.keys.create_token(&username, is_admin).unwrap())
    }

    async fn send(&self, method: Method, uri: &str, auth: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, auth);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

#[tokio::test]
async fn only_creator_or_admin_manage_a_drive() {
    let Some(h) = Harness::new().await else { return };
    let creator = h.user(false).await;
    let stranger = h.user(false).await;
    let admin = h.user(true).await;
    let title = unique("drive");
    let new_drive = json!({
        "title": title,
        "description": "coastal loop",
        "route_link": format!("https://maps.example.com/{}", unique("route")),
    });

    let (status, body) = h.send(Method::POST, "/drives", &creator, Some(new_drive)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["drive"]["title"], title);
    let uri = format!("/drives/{}", title);

    let patch = json!({"description": "hijacked"});
    let (status, body) = h.send(Method::PATCH, &uri, &stranger, Some(patch)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");
    let (status, _) = h.send(Method::DELETE, &uri, &stranger, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = h.send(Method::PATCH, "/drives/no-such-drive-title", &creator, Some(json!({"description": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = h.send(Method::PATCH, &uri, &creator, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = h.send(Method::PATCH, &uri, &creator, Some(json!({"description": "with lunch"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drive"]["description"], "with lunch");
    let (status, body) = h.send(Method::PATCH, &uri, &admin, Some(json!({"description": "moderated"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drive"]["description"], "moderated");

    let (status, body) = h.send(Method::DELETE, &uri, &admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], title);
    let (status, _) = h.send(Method::GET, &uri, &creator, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_edit_and_delete_follow_authorship() {
    let Some(h) = Harness::new().await else { return };
    let author = h.user(false).await;
    let stranger = h.user(false).await;
    let admin = h.user(true).await;

    let (status, body) = h
        .send(Method::POST, "/posts", &author, Some(json!({"title": "Meetup", "body": "Saturday 9am"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["post"]["id"].as_i64().unwrap();
    let uri = format!("/posts/{}", id);

    let (status, _) = h.send(Method::PATCH, &uri, &stranger, Some(json!({"body": "cancelled"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = h.send(Method::PATCH, &uri, &admin, Some(json!({"body": "Saturday 10am"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["body"], "Saturday 10am");
    assert_eq!(body["post"]["title"], "Meetup");

    let (status, _) = h.send(Method::DELETE, &uri, &admin, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = h.send(Method::DELETE, &uri, &stranger, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = h.send(Method::DELETE, &uri, &author, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], id);
}
