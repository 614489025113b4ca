//! API route handlers for the gateway.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use rand::Rng;
use serde::Deserialize;
use serde_json::{Value, json};
use trailpass_store::{Difficulty, NewCheckIn, trails};
use trailpass_validate::{Rule, validate};

use super::error::ApiError;
use super::server::AppState;

static CHECK_IN_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::required("walletAddress", "Wallet address is required"),
        Rule::required("trailId", "Trail ID is required"),
        Rule::required("trailName", "Trail name is required"),
        Rule::one_of("difficulty", &Difficulty::ALL, "Invalid difficulty level"),
    ]
});

static SIGN_UP_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::required("name", "Name is required"),
        Rule::email("email", "Invalid email"),
        Rule::min_len("password", 6, "Password must contain at least 6 characters"),
        Rule::matches("password", r"\d", "Password must contain a number"),
    ]
});

/// Typed check-in input, extracted after the rules have passed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckInRequest {
    wallet_address: String,
    trail_id: String,
    trail_name: String,
    difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest {
    name: String,
    email: String,
    #[allow(dead_code)]
    password: String,
}

/// Decode a JSON body. Malformed JSON is an internal error, not a
/// validation failure — validation only sees well-formed objects.
fn decode_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::internal(format!("invalid JSON body: {e}")))
}

fn random_token(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// POST /api/trails/checkin
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let input = decode_body(&body)?;
    validate(&CHECK_IN_RULES, &input).map_err(ApiError::Validation)?;
    let request: CheckInRequest = serde_json::from_value(input)
        .map_err(|e| ApiError::internal(format!("body decode: {e}")))?;

    tracing::info!(
        "🎿 Processing check-in: {} -> {}",
        request.wallet_address,
        request.trail_name
    );

    // Simulated chain submission. The latency is deliberate; callers are
    // expected to tolerate it.
    tokio::time::sleep(Duration::from_millis(state.config.chain.submit_delay_ms)).await;

    let record = state.store.append(
        &request.wallet_address,
        NewCheckIn {
            trail_id: request.trail_id,
            trail_name: request.trail_name,
            difficulty: request.difficulty,
        },
    )?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Checked in to {} successfully!", record.trail_name),
        "data": record,
    })))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(rename = "walletAddress")]
    wallet_address: Option<String>,
}

/// GET /api/trails/history?walletAddress=...
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, ApiError> {
    let wallet = params
        .wallet_address
        .filter(|w| !w.is_empty())
        .ok_or_else(|| ApiError::Validation("Wallet address is required".into()))?;

    let check_ins = state.store.history(&wallet);
    let total = check_ins.len();
    Ok(Json(json!({
        "success": true,
        "data": {
            "walletAddress": wallet,
            "checkIns": check_ins,
            "totalCheckins": total,
        },
    })))
}

/// GET /api/trails
pub async fn list_trails() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": trails(),
    }))
}

/// GET /api/hello
pub async fn hello() -> Json<Value> {
    Json(json!({
        "message": "Hello from TrailPass Ski Trail Manager API!",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "server": "trailpass",
    }))
}

/// GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let stats = state.store.stats();
    Json(json!({
        "status": "online",
        "server": "trailpass",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptimeSecs": state.start_time.elapsed().as_secs(),
        "scheduler": state.scheduler.status(),
        "checkIns": {
            "total": stats.total_check_ins,
            "wallets": stats.distinct_wallets,
        },
    }))
}

/// POST /api/auth/signup
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let input = decode_body(&body)?;
    validate(&SIGN_UP_RULES, &input).map_err(ApiError::Validation)?;
    let request: SignUpRequest = serde_json::from_value(input)
        .map_err(|e| ApiError::internal(format!("body decode: {e}")))?;

    tracing::info!("👤 User signup: {} ({})", request.name, request.email);

    // Simulated account provisioning — half the chain submit delay.
    tokio::time::sleep(Duration::from_millis(state.config.chain.submit_delay_ms / 2)).await;

    Ok(Json(json!({
        "success": true,
        "message": "User created successfully",
        "user": {
            "id": format!("user_{}", random_token(9)),
            "name": request.name,
            "email": request.email,
        },
    })))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "trailpass-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /server-status — human-oriented status page.
pub async fn server_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "server": "TrailPass Ski Trail Manager",
        "status": "🟢 RUNNING",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": format!("{} seconds", state.start_time.elapsed().as_secs()),
        "version": env!("CARGO_PKG_VERSION"),
        "features": [
            "Continuous chain monitoring",
            "Real-time trail check-ins",
            "Wallet-keyed check-in history",
            "Background data processing",
        ],
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("API endpoint not found".into())
}

/// Per-route fallback for wrong HTTP methods.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
