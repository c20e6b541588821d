//! Static catalog for the UI: fallback service names, badge colors,
//! suggested starter questions, and the client-side masking-entity set.

/// Fallback display names when the services endpoint is unavailable.
pub const SERVICE_DISPLAY: &[(&str, &str)] = &[
    ("ai_core", "SAP AI Core"),
    ("genai_hub", "Generative AI Hub"),
    ("ai_launchpad", "SAP AI Launchpad"),
    ("joule", "SAP Joule"),
    ("hana_cloud_vector", "SAP HANA Cloud Vector Engine"),
    ("document_processing", "Document Information Extraction"),
];

/// Colors for service badges.
pub const SERVICE_COLORS: &[(&str, &str)] = &[
    ("ai_core", "#0A6ED1"),
    ("genai_hub", "#E78C07"),
    ("ai_launchpad", "#1A9898"),
    ("joule", "#945ECF"),
    ("hana_cloud_vector", "#D04A02"),
    ("document_processing", "#188918"),
];

pub const DEFAULT_SERVICE_COLOR: &str = "#6B7B8D";

pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "How do I deploy a model on SAP AI Core?",
    "How does the orchestration service work in Generative AI Hub?",
    "What SAP products support Joule as a copilot?",
    "How do I store and query vector embeddings in SAP HANA Cloud?",
];

/// Entity labels masked by the assistant's own regex recognizers rather
/// than the standard DPI profile entities. Anything outside this set is
/// shown under the SAP-native group.
pub const CLIENT_SIDE_MASK_ENTITIES: &[&str] = &[
    "API_KEY",
    "BEARER_TOKEN",
    "S_USER_ID",
    "SYSTEM_URL",
    "CLIENT_SECRET",
];

pub fn service_display_fallback(key: &str) -> Option<&'static str> {
    SERVICE_DISPLAY
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

pub fn service_color(key: &str) -> &'static str {
    SERVICE_COLORS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_SERVICE_COLOR)
}

pub fn is_client_side_entity(name: &str) -> bool {
    CLIENT_SIDE_MASK_ENTITIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_service_resolves_name_and_color() {
        assert_eq!(service_display_fallback("joule"), Some("SAP Joule"));
        assert_eq!(service_color("joule"), "#945ECF");
    }

    #[test]
    fn unknown_service_falls_back_to_default_color() {
        assert_eq!(service_display_fallback("nope"), None);
        assert_eq!(service_color("nope"), DEFAULT_SERVICE_COLOR);
    }

    #[test]
    fn entity_set_membership_is_exact() {
        assert!(is_client_side_entity("API_KEY"));
        assert!(!is_client_side_entity("profile-email"));
        assert!(!is_client_side_entity("api_key"));
    }
}
