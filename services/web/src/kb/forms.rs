//! Form payloads for the knowledge base modals and their validation.

use sapdocs_client::models::{KbEntryUpdate, NewKbEntry};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateEntryForm {
    #[serde(default)]
    pub service_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
}

impl CreateEntryForm {
    pub fn validate(&self) -> Result<NewKbEntry, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        Ok(NewKbEntry {
            service_key: self.service_key.trim().to_string(),
            title: title.to_string(),
            url: self.url.trim().to_string(),
            description: self.description.trim().to_string(),
            tags: parse_tags(&self.tags),
        })
    }
}

/// Edit form carries the entry's current values in hidden `original_*`
/// fields so the handler can send only the fields that changed.
#[derive(Debug, Deserialize)]
pub struct EditEntryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub original_description: String,
    #[serde(default)]
    pub original_tags: String,
}

impl EditEntryForm {
    /// Pre-filled form for a freshly opened modal: inputs and baseline
    /// both reflect the entry's current values.
    pub fn from_entry(entry: &sapdocs_client::models::KbEntry) -> Self {
        let tags = entry.tags.join(", ");
        Self {
            title: entry.title.clone(),
            url: entry.url.clone(),
            description: entry.description.clone(),
            tags: tags.clone(),
            original_title: entry.title.clone(),
            original_url: entry.url.clone(),
            original_description: entry.description.clone(),
            original_tags: tags,
        }
    }

    pub fn diff(&self) -> Result<KbEntryUpdate, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        let mut update = KbEntryUpdate::default();
        if title != self.original_title {
            update.title = Some(title.to_string());
        }
        if self.url.trim() != self.original_url {
            update.url = Some(self.url.trim().to_string());
        }
        if self.description.trim() != self.original_description {
            update.description = Some(self.description.trim().to_string());
        }
        let tags = parse_tags(&self.tags);
        if tags != parse_tags(&self.original_tags) {
            update.tags = Some(tags);
        }
        Ok(update)
    }
}

/// Comma-separated tag list; whitespace trimmed, empty items dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub service: Option<String>,
}

impl FilterQuery {
    /// "All services" arrives as an empty select value.
    pub fn service_key(&self) -> Option<&str> {
        match self.service.as_deref() {
            None | Some("") => None,
            Some(key) => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_empties_dropped() {
        assert_eq!(
            parse_tags(" deployment , gpu,,  serving "),
            vec!["deployment", "gpu", "serving"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn create_requires_title() {
        let form = CreateEntryForm {
            service_key: "ai_core".to_string(),
            title: "   ".to_string(),
            url: String::new(),
            description: String::new(),
            tags: String::new(),
        };
        assert_eq!(form.validate().unwrap_err(), "Title is required.");
    }

    fn edit_form() -> EditEntryForm {
        EditEntryForm {
            title: "Deploying models".to_string(),
            url: "https://help.sap.com/ai-core".to_string(),
            description: "How to deploy".to_string(),
            tags: "deployment, gpu".to_string(),
            original_title: "Deploying models".to_string(),
            original_url: "https://help.sap.com/ai-core".to_string(),
            original_description: "How to deploy".to_string(),
            original_tags: "deployment, gpu".to_string(),
        }
    }

    #[test]
    fn unchanged_edit_diffs_to_empty_update() {
        let update = edit_form().diff().expect("valid");
        assert!(update.is_empty());
    }

    #[test]
    fn only_changed_fields_appear_in_the_diff() {
        let mut form = edit_form();
        form.title = "Deploying models v2".to_string();
        let update = form.diff().expect("valid");
        assert_eq!(update.title.as_deref(), Some("Deploying models v2"));
        assert!(update.url.is_none());
        assert!(update.description.is_none());
        assert!(update.tags.is_none());
    }

    #[test]
    fn tag_reformatting_without_change_is_not_a_diff() {
        let mut form = edit_form();
        form.tags = " deployment ,gpu ".to_string();
        let update = form.diff().expect("valid");
        assert!(update.tags.is_none());
    }

    #[test]
    fn edit_requires_title() {
        let mut form = edit_form();
        form.title = String::new();
        assert_eq!(form.diff().unwrap_err(), "Title is required.");
    }

    #[test]
    fn empty_select_value_means_no_filter() {
        let all = FilterQuery {
            service: Some(String::new()),
        };
        assert_eq!(all.service_key(), None);
        let joule = FilterQuery {
            service: Some("joule".to_string()),
        };
        assert_eq!(joule.service_key(), Some("joule"));
    }
}
