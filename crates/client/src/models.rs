use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub doc_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbEntry {
    pub id: String,
    pub service_key: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload for creating a documentation entry; the backend assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewKbEntry {
    pub service_key: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Partial update: only fields that actually changed are serialized, so
/// the wire payload for a title-only edit is exactly `{"title": …}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KbEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl KbEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub show_pipeline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub confidence: f64,
    pub is_sap_ai: bool,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub pipeline: Option<Pipeline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Optional diagnostic payload describing how the backend processed one
/// question before and after the model call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_masking: Option<Masking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_filtering: Option<Filtering>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_to_llm: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Masking {
    pub original_query: String,
    pub masked_query: String,
    #[serde(default)]
    pub entities_masked: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filtering {
    #[serde(default)]
    pub input: ScoreSet,
    #[serde(default)]
    pub output: ScoreSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSet {
    #[serde(default = "default_passed")]
    pub passed: bool,
    #[serde(default)]
    pub hate: f64,
    #[serde(default)]
    pub self_harm: f64,
    #[serde(default)]
    pub sexual: f64,
    #[serde(default)]
    pub violence: f64,
}

impl Default for ScoreSet {
    fn default() -> Self {
        Self {
            passed: true,
            hate: 0.0,
            self_harm: 0.0,
            sexual: 0.0,
            violence: 0.0,
        }
    }
}

fn default_passed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmStats {
    pub model: String,
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
    #[serde(default)]
    pub result_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_preview: Option<Vec<ResultPreview>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPreview {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}
