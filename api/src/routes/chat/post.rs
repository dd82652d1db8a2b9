use crate::response::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use util::config;

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ReplyResponse {
    pub reply: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Serialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OpenUrl,
    Suggest,
}

impl Action {
    fn open_url(label: &str, url: &str) -> Self {
        Self {
            kind: ActionKind::OpenUrl,
            label: Some(label.to_string()),
            url: Some(url.to_string()),
            value: None,
        }
    }

    fn suggest(label: &str, value: &str) -> Self {
        Self {
            kind: ActionKind::Suggest,
            label: Some(label.to_string()),
            url: None,
            value: Some(value.to_string()),
        }
    }
}

/// Intent-free keyword matching: the first rule whose keyword appears in
/// the lowercased message wins. No session memory, no scoring.
fn answer(message: &str, max_actions: usize) -> ReplyResponse {
    let msg = message.to_lowercase();

    let (reply, actions): (&str, Vec<Action>) = if msg.contains("inventory")
        || msg.contains("stock")
    {
        (
            "You can review stock levels and alerts on the inventory page of your section.",
            vec![
                Action::open_url("Open inventory", "/sections/1/inventory"),
                Action::suggest("Low stock?", "show low stock items"),
            ],
        )
    } else if msg.contains("low stock") || msg.contains("critical") {
        (
            "Items at or below their reorder level are flagged low stock; at or below the critical level they are flagged critical.",
            vec![Action::open_url("Open inventory", "/sections/1/inventory?alert=low_stock")],
        )
    } else if msg.contains("batch") || msg.contains("processing") || msg.contains("yield") {
        (
            "Processing batches live on the processing page. Yield is output over input; duration is derived from the start and end times.",
            vec![Action::open_url("Open processing", "/sections/2/processing")],
        )
    } else if msg.contains("quality") || msg.contains("defect") || msg.contains("inspection") {
        (
            "Quality checks are recorded per batch with a passed/rework/rejected status and a grade.",
            vec![Action::open_url("Open quality checks", "/sections/3/quality")],
        )
    } else if msg.contains("temperature") || msg.contains("cold") || msg.contains("humidity") {
        (
            "Temperature readings are logged per location; warnings and criticals are flagged against the configured thresholds.",
            vec![Action::open_url("Open temperature logs", "/sections/2/temperature")],
        )
    } else if msg.contains("report") || msg.contains("export") || msg.contains("invoice") {
        (
            "Reports can be exported as CSV or opened as a print view; admins can also download a full SQL backup.",
            vec![
                Action::open_url("Financial report", "/reports/sections/1/financial/print"),
                Action::suggest("CSV export?", "how do I export a csv"),
            ],
        )
    } else if msg.contains("password") {
        (
            "You can change your password from your profile page.",
            vec![Action::open_url("Open profile", "/me")],
        )
    } else if msg.contains("hello") || msg.contains("hi ") || msg == "hi" || msg.contains("hey") {
        (
            "Hello! Ask me about inventory, processing batches, quality checks, temperatures, or reports.",
            vec![
                Action::suggest("Inventory", "show me inventory"),
                Action::suggest("Reports", "how do I export a report"),
            ],
        )
    } else if msg.contains("help") {
        (
            "I can point you at the right page. Try asking about inventory, processing, quality, temperature, or reports.",
            vec![],
        )
    } else {
        (
            "Sorry, I did not catch that. Try asking about inventory, processing, quality, temperature, or reports.",
            vec![Action::suggest("Help", "help")],
        )
    };

    ReplyResponse {
        reply: reply.to_string(),
        actions: actions.into_iter().take(max_actions).collect(),
    }
}

/// POST /api/chat/reply
///
/// Rule-based reply endpoint for the chat widget.
///
/// ### Request Body
/// ```json
/// { "message": "where do I see low stock?" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ reply, actions }`; `actions` carry either an
///   `open_url` or a `suggest` payload and are capped by configuration
/// - `400 Bad Request` - Empty message
/// - `401 Unauthorized` - Missing or invalid JWT (the widget shows its
///   session-expired message)
pub async fn reply(Json(req): Json<ReplyRequest>) -> impl IntoResponse {
    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ReplyResponse>::error("Message is required")),
        );
    }

    let reply = answer(message, config::chat_max_actions());
    (
        StatusCode::OK,
        Json(ApiResponse::success(reply, "Reply generated")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_routing() {
        assert!(answer("where is my INVENTORY", 3).reply.contains("stock"));
        assert!(answer("yield for batch B-1001", 3).reply.contains("Yield"));
        assert!(!answer("gibberish xyzzy", 3).actions.is_empty());
    }

    #[test]
    fn actions_are_capped() {
        let r = answer("hello", 1);
        assert_eq!(r.actions.len(), 1);
    }
}
