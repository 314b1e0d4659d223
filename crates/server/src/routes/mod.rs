//! HTTP route handlers for the user registry.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//!
//! # Users
//! POST   /users                - Create a user
//! GET    /users                - List all users
//! GET    /users/search         - Users born between `from` and `to` (exclusive)
//! PUT    /users/{email}        - Replace a user's fields (email is kept)
//! PATCH  /users/{email}        - Update only the provided fields
//! DELETE /users/{email}        - Remove every user with the email
//! ```

pub mod users;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).post(users::create))
        .route("/search", get(users::search))
        .route(
            "/{email}",
            axum::routing::put(users::update)
                .patch(users::patch)
                .delete(users::delete),
        )
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/users", user_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::{Local, Months};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;

    fn app() -> Router {
        routes().with_state(AppState::new(&ServerConfig::default()))
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn john() -> Value {
        json!({
            "email": "john.doe@example.com",
            "firstName": "John",
            "lastName": "Doe",
            "birthDate": "1985-05-10",
            "address": "123 Main St",
            "phoneNumber": "1234567890",
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app();

        let (status, body) = send(&app, json_request("POST", "/users", &john())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "User created successfully");

        let (status, body) = send(&app, empty_request("GET", "/users")).await;
        assert_eq!(status, StatusCode::OK);
        let users: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(users, json!([john()]));
    }

    #[tokio::test]
    async fn test_create_too_young() {
        let birth_date = Local::now()
            .date_naive()
            .checked_sub_months(Months::new(17 * 12))
            .unwrap();
        let mut young = john();
        young["birthDate"] = json!(birth_date.to_string());

        let (status, body) = send(&app(), json_request("POST", "/users", &young)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], "User must be at least 18 years old");
    }

    #[tokio::test]
    async fn test_create_invalid_fields() {
        let mut invalid = john();
        invalid["email"] = json!("invalid_email");

        let (status, body) = send(&app(), json_request("POST", "/users", &invalid)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], "Invalid email format");
        assert_eq!(body["violations"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Bad request"));
    }

    #[tokio::test]
    async fn test_search_rejects_inverted_range() {
        let (status, _) = send(
            &app(),
            empty_request("GET", "/users/search?from=1990-12-31&to=1980-01-01"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_requires_both_bounds() {
        let (status, _) = send(&app(), empty_request("GET", "/users/search?from=1990-12-31")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_patch_delete_unknown_user() {
        let app = app();
        let replacement = json!({
            "firstName": "Johnny",
            "lastName": "Doe",
            "birthDate": "1985-05-10",
        });

        let (status, _) = send(
            &app,
            json_request("PUT", "/users/ghost@example.com", &replacement),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            json_request("PATCH", "/users/ghost@example.com", &json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, empty_request("DELETE", "/users/ghost@example.com")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("User not found"));
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found_for_any_body() {
        let app = app();

        for body in [
            json!({}),
            json!({"firstName": "G"}),
            json!({"birthDate": null}),
            json!({"birthDate": "not-a-date"}),
        ] {
            let (status, response) =
                send(&app, json_request("PUT", "/users/ghost@example.com", &body)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "body {body}");
            assert!(response.contains("User not found"));
        }

        let (status, _) = send(
            &app,
            json_request(
                "PATCH",
                "/users/ghost@example.com",
                &json!({"firstName": 42}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_clears_fields_left_out() {
        let app = app();
        send(&app, json_request("POST", "/users", &john())).await;

        let (status, body) = send(
            &app,
            json_request(
                "PUT",
                "/users/john.doe@example.com",
                &json!({"firstName": "G", "birthDate": null}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User updated successfully");

        let (_, body) = send(&app, empty_request("GET", "/users")).await;
        let users: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            users,
            json!([{
                "email": "john.doe@example.com",
                "firstName": "G",
                "lastName": null,
                "birthDate": null,
                "address": null,
                "phoneNumber": null,
            }])
        );
    }

    #[tokio::test]
    async fn test_update_malformed_body_for_known_user() {
        let app = app();
        send(&app, json_request("POST", "/users", &john())).await;

        let (status, body) = send(
            &app,
            json_request(
                "PUT",
                "/users/john.doe@example.com",
                &json!({"birthDate": "not-a-date"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Bad request"));
    }

    #[tokio::test]
    async fn test_patch_then_delete() {
        let app = app();
        send(&app, json_request("POST", "/users", &john())).await;

        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                "/users/John.Doe@Example.com",
                &json!({"firstName": "Johnny", "address": "456 Oak St"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User patched successfully");

        let (_, body) = send(&app, empty_request("GET", "/users")).await;
        let users: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(users[0]["firstName"], "Johnny");
        assert_eq!(users[0]["lastName"], "Doe");
        assert_eq!(users[0]["address"], "456 Oak St");

        let (status, body) =
            send(&app, empty_request("DELETE", "/users/john.doe@example.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User deleted successfully");

        let (_, body) = send(&app, empty_request("GET", "/users")).await;
        assert_eq!(body, "[]");
    }
}
