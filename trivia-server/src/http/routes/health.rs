//! Health check endpoint
//!
//! Not wrapped in the success envelope. Reports whether the store answers
//! and how many categories and questions it holds.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::method_not_allowed;
use crate::http::server::AppState;
use crate::store::TriviaStore;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: StoreHealth,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StoreHealth {
    Reachable { categories: usize, questions: i64 },
    Unreachable { reason: String },
}

async fn check_store(store: &dyn TriviaStore) -> StoreHealth {
    let counts = async {
        let categories = store.list_categories().await?.len();
        let questions = store.count_questions().await?;
        Ok::<_, crate::store::StoreError>((categories, questions))
    };

    match counts.await {
        Ok((categories, questions)) => StoreHealth::Reachable { categories, questions },
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unreachable");
            StoreHealth::Unreachable { reason: e.to_string() }
        }
    }
}

/// GET /health - 200 when the store answers, 503 otherwise
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let store = check_store(state.store.as_ref()).await;
    let (code, status) = match store {
        StoreHealth::Reachable { .. } => (StatusCode::OK, "ok"),
        StoreHealth::Unreachable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store,
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health).fallback(method_not_allowed))
}
