//! Axum route handlers for the Drafting API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::drafting::category::Category;
use crate::drafting::composer::{request_drafts, DraftOutcome};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub category: Category,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/categories
///
/// Lists the selectable document categories in dropdown order.
pub async fn handle_list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryInfo { label: c.label() })
            .collect(),
    })
}

/// POST /api/v1/drafts
///
/// Composes the prompt and requests two rewrites. Empty text yields a
/// `needs_input` outcome and no outbound call.
pub async fn handle_create_drafts(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<DraftOutcome>, AppError> {
    let backend = state.backend()?;
    let Json(request) = payload?;

    let outcome = request_drafts(backend, request.category, &request.text).await?;

    Ok(Json(outcome))
}
