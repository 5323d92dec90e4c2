use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{charity, matching, notifications, resources, transits};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

/// Basic-auth guard. Charities authenticate with their registered name and
/// password; the matched account is stored as a request extension.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let account: Option<charity::Model> = charity::Entity::find()
        .filter(charity::Column::Name.eq(auth_header.username()))
        .filter(charity::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(account) = account else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/resources", post(resources::create).get(resources::list))
        .route("/resources/{id}", get(resources::get))
        .route(
            "/resources/{id}/shareable",
            axum::routing::patch(resources::update_shareable),
        )
        .route("/transits", post(transits::request).get(transits::list))
        .route("/transits/{id}", get(transits::get))
        .route("/transits/{id}/dispatch", post(transits::dispatch))
        .route("/transits/{id}/receive", post(transits::receive))
        .route("/transits/{id}/reject", post(transits::reject))
        .route("/transits/{id}/cancel", post(transits::cancel))
        .route("/candidates", post(matching::candidates))
        .route("/notifications", get(notifications::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .route("/charity", post(charity::register))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory database");
        Migrator::up(&db, None).await.expect("run migrations");

        let engine = Engine::builder().database(db.clone()).build();
        router(ServerState {
            engine: Arc::new(engine),
            db,
        })
    }

    fn basic(name: &str, password: &str) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{name}:{password}"));
        format!("Basic {encoded}")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("parse body")
    }

    async fn register(app: &Router, name: &str) {
        let request = HttpRequest::post("/charity")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": name,
                    "password": "secret",
                    "primary_category": "food",
                })
                .to_string(),
            ))
            .expect("build request");

        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let app = test_router().await;
        register(&app, "Mensa dei Poveri").await;

        let request = HttpRequest::get("/resources")
            .header(header::AUTHORIZATION, basic("Mensa dei Poveri", "secret"))
            .body(Body::empty())
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_credentials_are_rejected() {
        let app = test_router().await;
        register(&app, "Mensa dei Poveri").await;

        let request = HttpRequest::get("/resources")
            .body(Body::empty())
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = HttpRequest::get("/resources")
            .header(header::AUTHORIZATION, basic("Mensa dei Poveri", "wrong"))
            .body(Body::empty())
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn resource_create_and_request_flow() {
        let app = test_router().await;
        register(&app, "Banco Alimentare").await;
        register(&app, "Casa di Accoglienza").await;

        let request = HttpRequest::post("/resources")
            .header(header::AUTHORIZATION, basic("Banco Alimentare", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": "Rice",
                    "category": "food",
                    "quantity": 100,
                    "shareable_quantity": 40,
                    "unit": "kg",
                })
                .to_string(),
            ))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let resource_id = created["id"].as_str().expect("resource id").to_string();

        let request = HttpRequest::post("/transits")
            .header(header::AUTHORIZATION, basic("Casa di Accoglienza", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "resource_id": resource_id,
                    "quantity": 15,
                })
                .to_string(),
            ))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);

        // The reservation is visible on the owner's inventory.
        let request = HttpRequest::get(format!("/resources/{resource_id}"))
            .header(header::AUTHORIZATION, basic("Banco Alimentare", "secret"))
            .body(Body::empty())
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
        let resource = body_json(response).await;
        assert_eq!(resource["quantity_reserved"], 15);
        assert_eq!(resource["shareable_quantity"], 25);
    }

    #[tokio::test]
    async fn over_request_maps_to_422() {
        let app = test_router().await;
        register(&app, "Banco Alimentare").await;
        register(&app, "Casa di Accoglienza").await;

        let request = HttpRequest::post("/resources")
            .header(header::AUTHORIZATION, basic("Banco Alimentare", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": "Blankets",
                    "category": "clothing",
                    "quantity": 10,
                    "shareable_quantity": 5,
                    "unit": "pieces",
                })
                .to_string(),
            ))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        let created = body_json(response).await;
        let resource_id = created["id"].as_str().expect("resource id").to_string();

        let request = HttpRequest::post("/transits")
            .header(header::AUTHORIZATION, basic("Casa di Accoglienza", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "resource_id": resource_id,
                    "quantity": 6,
                })
                .to_string(),
            ))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn candidates_are_ranked_for_the_caller() {
        let app = test_router().await;
        register(&app, "Banco Alimentare").await;
        register(&app, "Casa di Accoglienza").await;

        let request = HttpRequest::post("/resources")
            .header(header::AUTHORIZATION, basic("Banco Alimentare", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": "Canned Food",
                    "category": "food",
                    "quantity": 30,
                    "shareable_quantity": 30,
                    "unit": "cans",
                })
                .to_string(),
            ))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = HttpRequest::post("/candidates")
            .header(header::AUTHORIZATION, basic("Casa di Accoglienza", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({}).to_string()))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let candidates = body["candidates"].as_array().expect("candidates");
        assert_eq!(candidates.len(), 1);
        // Primary categories match ("food" both sides).
        assert_eq!(candidates[0]["score"], 90);

        // The owner does not see their own stock among candidates.
        let request = HttpRequest::post("/candidates")
            .header(header::AUTHORIZATION, basic("Banco Alimentare", "secret"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({}).to_string()))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        let body = body_json(response).await;
        assert!(body["candidates"].as_array().expect("candidates").is_empty());
    }
}
