use sapdocs_client::models::AskResponse;

/// One question/answer exchange. Exactly one of `response`/`error` is set;
/// entries are immutable once appended.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub question: String,
    pub response: Option<AskResponse>,
    pub error: Option<String>,
}

impl HistoryEntry {
    pub fn success(question: String, response: AskResponse) -> Self {
        Self {
            question,
            response: Some(response),
            error: None,
        }
    }

    pub fn failure(question: String, error: String) -> Self {
        Self {
            question,
            response: None,
            error: Some(error),
        }
    }
}

/// UI-scoped state: the running exchange list plus the pipeline-details
/// toggle. Not persisted; cleared on "New Session".
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub history: Vec<HistoryEntry>,
    pub show_pipeline: bool,
}

impl Session {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
