//! Request Composer: turns a category and raw bullet points into one prompt,
//! sends it once, and hands back the reply untouched.
//!
//! Flow: empty-input guard → compose_prompt → backend.complete → DraftOutcome.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::drafting::category::Category;
use crate::drafting::prompts::{BASE_INSTRUCTION, OUTPUT_FORMAT, PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::CompletionBackend;

/// Notice shown when the button is pressed with an empty text box.
pub const EMPTY_INPUT_NOTICE: &str = "Bitte gib erst einen Text ein.";

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DraftOutcome {
    /// Nothing was entered; no call was made.
    NeedsInput { notice: String },
    /// The model replied. `text` is the raw reply.
    Drafted {
        category: Category,
        heading: String,
        text: String,
    },
}

/// Builds the prompt for `category` around the verbatim `input`.
///
/// The input is substituted last so that braces inside it are never expanded.
pub fn compose_prompt(category: Category, input: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{base_instruction}", BASE_INSTRUCTION)
        .replace("{style_instruction}", category.style_instruction())
        .replace("{output_format}", OUTPUT_FORMAT)
        .replace("{input}", input)
}

pub fn success_heading(category: Category) -> String {
    format!("Vorschläge für: {}", category.label())
}

/// Runs one submission: guard, compose, a single completion call.
pub async fn request_drafts(
    backend: &dyn CompletionBackend,
    category: Category,
    input: &str,
) -> Result<DraftOutcome, AppError> {
    if input.is_empty() {
        return Ok(DraftOutcome::NeedsInput {
            notice: EMPTY_INPUT_NOTICE.to_string(),
        });
    }

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        category = category.label(),
        input_chars = input.chars().count(),
        "Requesting drafts"
    );

    let prompt = compose_prompt(category, input);

    let text = backend.complete(&prompt).await.map_err(|e| {
        warn!(%request_id, "Completion failed: {e}");
        AppError::Llm(e.to_string())
    })?;

    info!(%request_id, reply_chars = text.chars().count(), "Drafts received");

    Ok(DraftOutcome::Drafted {
        category,
        heading: success_heading(category),
        text,
    })
}
