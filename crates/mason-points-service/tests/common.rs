//! Common test utilities for mason-points integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::TempDir;

use mason_points_core::{BonusWindow, LoyaltyRulesConfig};
use mason_points_service::auth::JwtClaims;
use mason_points_service::{create_router, AppState, ServiceConfig};
use mason_points_store::RocksStore;

/// HS256 secret used by the harness.
const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Operator API key used by the harness.
const TEST_OPERATOR_KEY: &str = "test-operator-key";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// The operator API key for back-office requests.
    pub operator_api_key: String,
    /// An operator ID for back-office requests.
    pub operator_id: String,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            jwt_secret: Some(TEST_JWT_SECRET.into()),
            operator_api_key: Some(TEST_OPERATOR_KEY.into()),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            rules: test_rules(),
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
            operator_api_key: TEST_OPERATOR_KEY.into(),
            operator_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Mint a bearer token for the given mason ID.
    pub fn mason_auth_header(&self, mason_id: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: mason_id.to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("Failed to encode test JWT");
        format!("Bearer {token}")
    }

    /// Enroll a mason via the API and return its ID.
    pub async fn enroll_mason(&self, name: &str) -> String {
        let response = self
            .server
            .post("/v1/masons")
            .add_header("x-api-key", self.operator_api_key.clone())
            .add_header("x-operator-id", self.operator_id.clone())
            .json(&serde_json::json!({
                "name": name,
                "phone": "+91-9000000001"
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("mason id in response").to_string()
    }

    /// Create a reward via the API and return its ID.
    pub async fn create_reward(&self, name: &str, point_cost: i64, stock: i64) -> String {
        let response = self
            .server
            .put("/v1/rewards")
            .add_header("x-api-key", self.operator_api_key.clone())
            .add_header("x-operator-id", self.operator_id.clone())
            .json(&serde_json::json!({
                "name": name,
                "point_cost": point_cost,
                "stock": stock
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("reward id in response").to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Rules with wide-open campaign windows so test outcomes do not depend
/// on the wall clock.
fn test_rules() -> LoyaltyRulesConfig {
    let wide = BonusWindow {
        start: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap(),
    };

    LoyaltyRulesConfig {
        base_points_per_bag: 1,
        bonanza_additional_points_per_bag: 3,
        bonanza_window: wide,
        joining_bonus_points: 100,
        joining_bonus_window: wide,
        slab_size: 250,
        points_per_slab: 500,
        slab_bonus_window: wide,
        referral_threshold_bags: 200,
        referral_bonus_points: 1000,
    }
}
