//! Axum route handlers for the HTML page.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::drafting::category::Category;
use crate::drafting::composer::{request_drafts, DraftOutcome};
use crate::errors::AppError;
use crate::page::render::{render_locked, render_page, PageStatus, PageView};
use crate::state::AppState;

/// Form fields posted by the page.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub text: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    if state.is_locked() {
        return Html(render_locked());
    }
    Html(render_page(&PageView::default()))
}

/// POST /
///
/// Runs one submission and re-renders the page with the outcome. Failures of
/// the completion call are shown inline; the user can simply submit again.
pub async fn handle_submit(
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Html<String> {
    let Ok(backend) = state.backend() else {
        return Html(render_locked());
    };

    let category = match form.category.parse::<Category>() {
        Ok(category) => category,
        Err(e) => {
            return Html(render_page(&PageView {
                selected: Category::default(),
                text: form.text,
                status: PageStatus::Error(AppError::Validation(e.to_string()).to_string()),
            }))
        }
    };

    let status = match request_drafts(backend, category, &form.text).await {
        Ok(DraftOutcome::NeedsInput { notice }) => PageStatus::Info(notice),
        Ok(DraftOutcome::Drafted { heading, text, .. }) => PageStatus::Success {
            heading,
            reply: text,
        },
        Err(e) => PageStatus::Error(e.to_string()),
    };

    Html(render_page(&PageView {
        selected: category,
        text: form.text,
        status,
    }))
}
