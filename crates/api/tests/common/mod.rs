//! Common test utilities for integration tests.
//!
//! Tests run against the PostgreSQL database named by `TEST_DATABASE_URL` and
//! are skipped when it is unset. Each test truncates every table, so tests in
//! one binary take a shared lock and run one at a time.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use domain::models::UserRole;
use domain::services::AnalysisProvider;
use fake::{faker::name::en::Name, Fake};
use persistence::repositories::UserRepository;
use serde_json::Value;
use shared::jwt::JwtConfig;
use simsarpras_api::{app::create_app_with_analysis, config::*};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-with-32-bytes-min";

/// Placeholder hash for users that never log in through the API.
const UNUSABLE_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dW51c2FibGU$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn db_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Create a test database pool, or `None` when no test database is configured.
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    Some(pool)
}

/// Run migrations on the test database. Every migration is re-runnable.
pub async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");
        sqlx::raw_sql(&sql)
            .execute(pool)
            .await
            .unwrap_or_else(|e| panic!("Migration {:?} failed: {}", entry.file_name(), e));
    }
}

/// Remove all rows and reset identities.
pub async fn cleanup_all_test_data(pool: &PgPool) {
    sqlx::query(
        r#"
        TRUNCATE TABLE ledger_idempotency_keys, mutations, stock_opname,
            procurement_requests, inventory_items, rooms, users
        RESTART IDENTITY CASCADE
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to truncate test tables");
}

/// Test configuration with an HS256 secret.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: std::env::var("TEST_DATABASE_URL").unwrap_or_default(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        jwt: JwtAuthConfig {
            secret: TEST_JWT_SECRET.to_string(),
            token_expiry_secs: 3600,
            leeway_secs: 30,
        },
        admin: AdminConfig::default(),
        procurement: ProcurementConfig::default(),
        idempotency: IdempotencyConfig::default(),
        ai: AiConfig::default(),
    }
}

/// A user with a valid bearer token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub token: String,
}

/// Per-test database and router. Holds the database lock until dropped.
pub struct TestContext {
    pub pool: PgPool,
    pub app: Router,
    _guard: MutexGuard<'static, ()>,
}

impl TestContext {
    /// Fresh, empty database with the default configuration.
    pub async fn new() -> Option<Self> {
        Self::with_config(test_config(), None).await
    }

    pub async fn with_config(
        config: Config,
        analysis: Option<Arc<dyn AnalysisProvider>>,
    ) -> Option<Self> {
        let guard = db_lock().lock().await;
        let pool = create_test_pool().await?;
        run_migrations(&pool).await;
        cleanup_all_test_data(&pool).await;

        let app = create_app_with_analysis(config, pool.clone(), analysis)
            .expect("Failed to build app");

        Some(Self {
            pool,
            app,
            _guard: guard,
        })
    }

    /// Insert a user directly and sign a token for them.
    pub async fn create_user(&self, role: UserRole) -> TestUser {
        let username = format!("{}_{}", role, uuid::Uuid::new_v4().simple());
        let name: String = Name().fake();
        let entity = UserRepository::new(self.pool.clone())
            .create(&username, UNUSABLE_HASH, &name, role)
            .await
            .expect("Failed to create test user");

        let jwt = JwtConfig::new(TEST_JWT_SECRET, 3600, 30).unwrap();
        TestUser {
            id: entity.id,
            username,
            role,
            token: jwt.issue(entity.id, role.as_str()).unwrap(),
        }
    }

    /// Send a request and return the status and parsed JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&TestUser>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_with_headers(method, uri, user, body, &[]).await
    }

    pub async fn send_with_headers(
        &self,
        method: Method,
        uri: &str,
        user: Option<&TestUser>,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let token = user.map(|u| u.token.as_str());
        send_request(self.app.clone(), method, uri, token, body, headers).await
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(user), Some(body)).await
    }

    /// Create a room and return its id.
    pub async fn create_room(&self, user: &TestUser, code: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/rooms",
                user,
                serde_json::json!({ "code": code, "name": format!("Ruang {}", code) }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create room failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Register an asset and return its id.
    pub async fn register_asset(&self, user: &TestUser, body: Value) -> i64 {
        let (status, body) = self.post("/api/inventory", user, body).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["id"].as_i64().unwrap()
    }
}

/// Send a request through `app`. Takes an owned router so it can run inside
/// spawned tasks.
pub async fn send_request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// Parse a JSON response body, `Null` when empty or not JSON.
pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}
